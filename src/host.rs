//! # Host Shell Boundary / 宿主边界
//!
//! Newline-delimited JSON over stdio: `HostCommand`s are read from stdin and
//! forwarded into the engine loop, `HostEvent`s are written to stdout.
//! 标准输出只用于事件流，日志全部写到 stderr。

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uc_core::ports::HostEventPort;
use uc_core::{HostCommand, HostEvent, SyncEvent};

/// `HostEventPort` backed by a writer task, so `emit` never blocks the engine.
pub struct JsonLinesHostEvents {
    tx: mpsc::UnboundedSender<HostEvent>,
}

impl HostEventPort for JsonLinesHostEvents {
    fn emit(&self, event: HostEvent) {
        if self.tx.send(event).is_err() {
            debug!("host event writer stopped, event dropped");
        }
    }
}

/// Spawn the event writer. The task ends once every `JsonLinesHostEvents` is dropped.
pub fn spawn_event_writer<W>(mut writer: W) -> (JsonLinesHostEvents, JoinHandle<()>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<HostEvent>();
    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let mut line = match serde_json::to_string(&event) {
                Ok(line) => line,
                Err(e) => {
                    warn!(event = event.type_name(), error = %e, "failed to encode host event");
                    continue;
                }
            };
            line.push('\n');
            let written = async {
                writer.write_all(line.as_bytes()).await?;
                writer.flush().await
            };
            if let Err(e) = written.await {
                warn!(error = %e, "host event stream closed");
                break;
            }
        }
    });
    (JsonLinesHostEvents { tx }, handle)
}

/// Forward commands from `reader` until EOF, then request shutdown.
///
/// Malformed lines are logged and skipped.
pub fn spawn_command_reader<R>(reader: R, events: mpsc::Sender<SyncEvent>) -> JoinHandle<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = reader.lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "failed to read host command stream");
                    break;
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<HostCommand>(line) {
                Ok(command) => {
                    if events.send(command.into()).await.is_err() {
                        return;
                    }
                }
                Err(e) => warn!(error = %e, "ignoring malformed host command"),
            }
        }
        info!("host command stream closed, shutting down");
        let _ = events.send(SyncEvent::Shutdown).await;
    })
}
