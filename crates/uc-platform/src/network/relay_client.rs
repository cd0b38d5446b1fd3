//! Relay WebSocket client
//!
//! `open()` spawns one connection task per session and returns right away.
//! The task connects, sends `JOIN_ROOM`, reports `Opened`, then multiplexes
//! outbound frames (each acknowledged back to the caller of `send()`) with
//! inbound frames (parsed and forwarded as `Received`). Any failure ends the
//! task with a single `Closed` event for that session.
//!
//! 每个 session 一个连接任务；旧 session 的任务在新 `open()` 时被终止。

use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, info_span, warn, Instrument};
use uc_core::ports::{RelayTransportPort, TransportError};
use uc_core::{DeviceId, RelayMessage, RoomPin, SessionId, SyncEvent, TransportEvent};

const OUTBOUND_CAPACITY: usize = 32;
/// Extra time `send()` waits past the socket write timeout for the ack.
const SEND_ACK_SLACK: Duration = Duration::from_millis(500);

struct Outbound {
    text: String,
    ack: oneshot::Sender<Result<(), TransportError>>,
}

struct Connection {
    session: SessionId,
    outbound: mpsc::Sender<Outbound>,
    task: JoinHandle<()>,
}

pub struct WsRelayTransport {
    url: String,
    connect_timeout: Duration,
    send_timeout: Duration,
    events: mpsc::Sender<SyncEvent>,
    current: Mutex<Option<Connection>>,
}

impl WsRelayTransport {
    pub fn new(
        url: impl Into<String>,
        connect_timeout: Duration,
        send_timeout: Duration,
        events: mpsc::Sender<SyncEvent>,
    ) -> Self {
        Self {
            url: url.into(),
            connect_timeout,
            send_timeout,
            events,
            current: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RelayTransportPort for WsRelayTransport {
    async fn open(
        &self,
        session: SessionId,
        pin: &RoomPin,
        device_id: &DeviceId,
    ) -> Result<(), TransportError> {
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Err(TransportError::Io(format!("invalid relay url: {}", self.url)));
        }

        let join = RelayMessage::join(pin.clone(), device_id.clone())
            .to_text()
            .map_err(|e| TransportError::Io(e.to_string()))?;

        let mut current = self.current.lock().await;
        if let Some(previous) = current.take() {
            debug!(previous = %previous.session, "dropping superseded relay connection");
            previous.task.abort();
        }

        let (outbound_tx, outbound_rx) = mpsc::channel(OUTBOUND_CAPACITY);
        let session_task = SessionTask {
            session,
            url: self.url.clone(),
            join,
            connect_timeout: self.connect_timeout,
            send_timeout: self.send_timeout,
            events: self.events.clone(),
        };
        let span = info_span!("relay_client.session", session = %session, pin = %pin);
        let task = tokio::spawn(session_task.run(outbound_rx).instrument(span));

        *current = Some(Connection {
            session,
            outbound: outbound_tx,
            task,
        });
        Ok(())
    }

    async fn send(&self, message: RelayMessage) -> Result<(), TransportError> {
        let outbound = {
            let current = self.current.lock().await;
            match current.as_ref() {
                Some(connection) => connection.outbound.clone(),
                None => return Err(TransportError::NotConnected),
            }
        };

        let text = message
            .to_text()
            .map_err(|e| TransportError::Io(e.to_string()))?;
        let (ack_tx, ack_rx) = oneshot::channel();

        let delivery = async move {
            outbound
                .send(Outbound { text, ack: ack_tx })
                .await
                .map_err(|_| TransportError::Closed)?;
            ack_rx.await.map_err(|_| TransportError::Closed)?
        };

        // Outlives the task's own write timeout, so a frame is never written
        // after the caller has given up on it and re-queued the item.
        match tokio::time::timeout(ack_deadline(self.send_timeout), delivery).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout),
        }
    }

    async fn close(&self) {
        let Some(connection) = self.current.lock().await.take() else {
            return;
        };
        // Dropping the sender lets the task send a close frame and exit.
        drop(connection.outbound);
        let mut task = connection.task;
        if tokio::time::timeout(Duration::from_secs(1), &mut task)
            .await
            .is_err()
        {
            task.abort();
        }
        info!(session = %connection.session, "relay connection closed");
    }
}

struct SessionTask {
    session: SessionId,
    url: String,
    join: String,
    connect_timeout: Duration,
    send_timeout: Duration,
    events: mpsc::Sender<SyncEvent>,
}

impl SessionTask {
    async fn run(self, outbound: mpsc::Receiver<Outbound>) {
        let reason = self.drive(outbound).await;
        match &reason {
            Some(reason) => warn!(reason = %reason, "relay session ended"),
            None => debug!("relay session closed locally"),
        }
        self.emit(TransportEvent::Closed {
            session: self.session,
            reason,
        })
        .await;
    }

    async fn emit(&self, event: TransportEvent) {
        if self.events.send(event.into()).await.is_err() {
            debug!("engine loop gone, dropping transport event");
        }
    }

    /// Returns the reason the session ended, `None` for a local close.
    async fn drive(&self, mut outbound: mpsc::Receiver<Outbound>) -> Option<String> {
        let ws = match tokio::time::timeout(self.connect_timeout, connect_async(self.url.as_str()))
            .await
        {
            Ok(Ok((ws, _response))) => ws,
            Ok(Err(e)) => return Some(format!("connect failed: {e}")),
            Err(_) => return Some("connect timed out".to_string()),
        };
        let (mut sink, mut stream) = ws.split();

        if let Err(e) = sink.send(Message::Text(self.join.clone())).await {
            return Some(format!("failed to send join: {e}"));
        }
        info!(url = %self.url, "joined relay room");
        self.emit(TransportEvent::Opened {
            session: self.session,
        })
        .await;

        loop {
            tokio::select! {
                out = outbound.recv() => {
                    let Some(Outbound { text, ack }) = out else {
                        let _ = sink.close().await;
                        return None;
                    };
                    if ack.is_closed() {
                        debug!("caller gave up on frame, not writing it");
                        continue;
                    }
                    match tokio::time::timeout(self.send_timeout, sink.send(Message::Text(text))).await {
                        Ok(Ok(())) => {
                            let _ = ack.send(Ok(()));
                        }
                        Ok(Err(e)) => {
                            let _ = ack.send(Err(TransportError::Closed));
                            return Some(format!("send failed: {e}"));
                        }
                        Err(_) => {
                            let _ = ack.send(Err(TransportError::Timeout));
                            return Some("send timed out".to_string());
                        }
                    }
                }
                frame = stream.next() => match frame {
                    Some(Ok(Message::Text(text))) => match RelayMessage::from_text(&text) {
                        Ok(message) => {
                            debug!(kind = message.type_name(), "relay frame received");
                            self.emit(TransportEvent::Received {
                                session: self.session,
                                message,
                            })
                            .await;
                        }
                        Err(e) => warn!(error = %e, "dropping malformed relay frame"),
                    },
                    Some(Ok(Message::Close(frame))) => {
                        return Some(match frame {
                            Some(frame) => format!("relay closed: {}", frame.reason),
                            None => "relay closed".to_string(),
                        });
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Some(format!("socket error: {e}")),
                    None => return Some("relay connection ended".to_string()),
                },
            }
        }
    }
}

fn ack_deadline(send_timeout: Duration) -> Duration {
    send_timeout + SEND_ACK_SLACK
}
