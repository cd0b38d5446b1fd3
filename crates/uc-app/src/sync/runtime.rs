//! The device's single reconciliation loop.
//!
//! Clipboard changes, relay events, reachability edges and host commands all
//! arrive on one channel and are applied to the [`SyncEngine`] one at a time.
//! A reconnect tick runs on the same loop.
//!
//! 单一事件循环：所有输入按到达顺序串行地作用于引擎，无需加锁。

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, info_span, Instrument};
use uc_core::{RoomPin, SyncEvent};

use super::SyncEngine;

/// Capacity of the engine event channel
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

pub struct SyncRuntime {
    engine: SyncEngine,
    events: mpsc::Receiver<SyncEvent>,
    reconnect_interval: Duration,
    initial_pin: Option<RoomPin>,
}

impl SyncRuntime {
    pub fn new(
        engine: SyncEngine,
        events: mpsc::Receiver<SyncEvent>,
        reconnect_interval: Duration,
    ) -> Self {
        Self {
            engine,
            events,
            reconnect_interval,
            initial_pin: None,
        }
    }

    /// Connect to `pin` as soon as the loop starts.
    pub fn with_initial_pin(mut self, pin: Option<RoomPin>) -> Self {
        self.initial_pin = pin.filter(RoomPin::is_valid);
        self
    }

    /// Run until a `Shutdown` event arrives or every sender is dropped.
    ///
    /// Returns the engine so callers can inspect its final state.
    pub async fn run(mut self) -> SyncEngine {
        let span = info_span!("sync_runtime", device_id = %self.engine.device_id());

        async move {
            self.engine.load().await;
            if let Some(pin) = self.initial_pin.take() {
                self.engine.connect(pin).await;
            }

            let mut reconnect = tokio::time::interval_at(
                tokio::time::Instant::now() + self.reconnect_interval,
                self.reconnect_interval,
            );
            reconnect.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            info!("sync runtime started");
            loop {
                tokio::select! {
                    event = self.events.recv() => match event {
                        None | Some(SyncEvent::Shutdown) => break,
                        Some(event) => self.engine.handle(event).await,
                    },
                    _ = reconnect.tick() => self.engine.on_reconnect_tick().await,
                }
            }

            debug!("closing relay transport");
            self.engine.shutdown().await;
            info!("sync runtime stopped");
            self.engine
        }
        .instrument(span)
        .await
    }
}
