//! Per-socket handling: `Unjoined -> Joined(pin)`, one way.

use std::net::SocketAddr;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, info_span, warn, Instrument};
use uc_core::{DeviceId, RelayMessage, RoomPin};

use crate::registry::{RoomRegistry, SharedRoom};
use crate::room::{ConnectionId, Member};
use crate::settings::RelaySettings;

enum Session {
    Unjoined,
    Joined {
        pin: RoomPin,
        device_id: DeviceId,
        room: SharedRoom,
    },
}

pub async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    registry: Arc<RoomRegistry>,
    settings: Arc<RelaySettings>,
) -> anyhow::Result<()> {
    let id = registry.next_connection_id();
    let span = info_span!("relay.connection", conn = %id, peer = %peer);
    handle(stream, id, registry, settings).instrument(span).await
}

async fn handle(
    stream: TcpStream,
    id: ConnectionId,
    registry: Arc<RoomRegistry>,
    settings: Arc<RelaySettings>,
) -> anyhow::Result<()> {
    let ws = accept_async(stream).await?;
    let (mut sink, mut frames) = ws.split();
    debug!("websocket accepted");

    let (tx, mut rx) = mpsc::channel::<String>(settings.member_queue);
    let send_timeout = settings.send_timeout;
    let mut writer = tokio::spawn(
        async move {
            while let Some(text) = rx.recv().await {
                match tokio::time::timeout(send_timeout, sink.send(Message::Text(text))).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        debug!(error = %e, "send failed, closing writer");
                        break;
                    }
                    Err(_) => {
                        warn!("send timed out, dropping slow member");
                        break;
                    }
                }
            }
            let _ = sink.close().await;
        }
        .in_current_span(),
    );

    let mut session = Session::Unjoined;
    let mut writer_done = false;

    loop {
        tokio::select! {
            frame = frames.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    session = on_text(&text, session, id, &tx, &registry).await;
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(Message::Binary(_))) => debug!("ignoring binary frame"),
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(error = %e, "socket error");
                    break;
                }
            },
            _ = &mut writer, if !writer_done => {
                writer_done = true;
                break;
            }
        }
    }

    if let Session::Joined {
        pin,
        device_id,
        room,
    } = session
    {
        let mut room = room.lock().await;
        room.leave(id);
        info!(pin = %pin, device_id = %device_id, members = room.member_count(), "device left room");
    }

    drop(tx);
    if !writer_done {
        let _ = writer.await;
    }
    Ok(())
}

async fn on_text(
    text: &str,
    session: Session,
    id: ConnectionId,
    tx: &mpsc::Sender<String>,
    registry: &RoomRegistry,
) -> Session {
    let message = match RelayMessage::from_text(text) {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, "dropping malformed frame");
            return session;
        }
    };

    match (message, session) {
        (RelayMessage::JoinRoom(join), Session::Unjoined) => {
            if !join.pin.is_valid() {
                warn!("join with empty pin ignored");
                return Session::Unjoined;
            }
            let member = Member {
                id,
                tx: tx.clone(),
            };
            let room = registry.join(&join.pin, member).await;
            info!(pin = %join.pin, device_id = %join.device_id, "connection joined");
            Session::Joined {
                pin: join.pin,
                device_id: join.device_id,
                room,
            }
        }
        (RelayMessage::JoinRoom(join), joined @ Session::Joined { .. }) => {
            warn!(requested = %join.pin, "already joined, second JOIN_ROOM ignored");
            joined
        }
        (RelayMessage::ClipboardPush(payload), Session::Joined { pin, device_id, room }) => {
            let delivered = room.lock().await.push(id, payload);
            debug!(pin = %pin, delivered, "clipboard push relayed");
            Session::Joined {
                pin,
                device_id,
                room,
            }
        }
        (RelayMessage::ClearHistory, Session::Joined { pin, device_id, room }) => {
            room.lock().await.clear();
            info!(pin = %pin, device_id = %device_id, "room history cleared by member");
            Session::Joined {
                pin,
                device_id,
                room,
            }
        }
        (message, Session::Unjoined) => {
            warn!(kind = message.type_name(), "frame before JOIN_ROOM dropped");
            Session::Unjoined
        }
        (message, joined) => {
            warn!(kind = message.type_name(), "unexpected client frame dropped");
            joined
        }
    }
}
