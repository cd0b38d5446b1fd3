//! Clipboard watcher
//!
//! Polls the local clipboard through [`ClipboardPort`] on a fixed interval
//! and emits [`SyncEvent::LocalChange`] whenever the content differs from the
//! previously observed value.
//!
//! ```text
//! Local Clipboard
//!      ↓
//! ClipboardPort
//!      ↓
//! ClipboardWatcher   (this module)
//!      ↓
//! SyncEvent::LocalChange
//!      ↓
//! SyncRuntime
//! ```
//!
//! The watcher **does not** decide anything: echoes of the engine's own
//! writes are reported like any other change and filtered by the engine.
//! Read errors and empty reads count as "no change this cycle"; an empty
//! read does not reset the last observed value.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info_span, Instrument};
use uc_core::ports::ClipboardPort;
use uc_core::{ClipboardContent, SyncEvent};

pub struct ClipboardWatcher {
    clipboard: Arc<dyn ClipboardPort>,
    interval: Duration,
    last: Option<ClipboardContent>,
}

impl ClipboardWatcher {
    pub fn new(clipboard: Arc<dyn ClipboardPort>, interval: Duration) -> Self {
        Self {
            clipboard,
            interval,
            last: None,
        }
    }

    /// Check clipboard once; returns the new content if it changed.
    pub async fn check_once(&mut self) -> Option<ClipboardContent> {
        let content = match self.clipboard.read_current().await {
            Ok(Some(content)) if !content.is_empty() => content,
            Ok(_) => return None,
            Err(e) => {
                debug!(error = %e, "clipboard read failed, treating as no change");
                return None;
            }
        };

        if self.last.as_ref() == Some(&content) {
            return None;
        }

        self.last = Some(content.clone());
        Some(content)
    }

    /// Poll until the engine loop goes away.
    pub fn spawn(mut self, events: mpsc::Sender<SyncEvent>) -> JoinHandle<()> {
        let span = info_span!("clipboard_watcher", interval_ms = self.interval.as_millis() as u64);
        tokio::spawn(
            async move {
                let mut ticker = tokio::time::interval(self.interval);
                ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    if events.is_closed() {
                        break;
                    }
                    if let Some(content) = self.check_once().await {
                        debug!(kind = content.kind().as_str(), size = content.size_bytes(), "clipboard changed");
                        if events.send(SyncEvent::LocalChange(content)).await.is_err() {
                            break;
                        }
                    }
                }
                debug!("clipboard watcher stopped");
            }
            .instrument(span),
        )
    }
}
