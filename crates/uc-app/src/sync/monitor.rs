//! Connectivity monitor
//!
//! Probes host-level reachability on a fixed interval, independent of the
//! relay socket (which can die without a clean close), and reports only
//! edges: one event per online/offline transition, never one per probe.
//! The monitor starts out assuming "offline", so an unreachable network at
//! startup is silent and the first successful probe reports `Online`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, Instrument};
use uc_core::ports::ReachabilityProbePort;
use uc_core::{ReachabilityChange, SyncEvent};

pub struct ConnectivityMonitor {
    probe: Arc<dyn ReachabilityProbePort>,
    interval: Duration,
    online: bool,
}

impl ConnectivityMonitor {
    pub fn new(probe: Arc<dyn ReachabilityProbePort>, interval: Duration) -> Self {
        Self {
            probe,
            interval,
            online: false,
        }
    }

    /// Run one probe and return the edge it produced, if any.
    pub async fn check(&mut self) -> Option<ReachabilityChange> {
        let reachable = self.probe.probe().await;
        if reachable == self.online {
            return None;
        }
        self.online = reachable;
        Some(if reachable {
            ReachabilityChange::Online
        } else {
            ReachabilityChange::Offline
        })
    }

    /// Probe forever, forwarding edges into the engine loop.
    /// Stops when the loop's channel closes.
    pub fn spawn(mut self, events: mpsc::Sender<SyncEvent>) -> JoinHandle<()> {
        let span = info_span!("connectivity_monitor", interval_ms = self.interval.as_millis() as u64);
        tokio::spawn(
            async move {
                let mut ticker = tokio::time::interval(self.interval);
                ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    if events.is_closed() {
                        break;
                    }
                    if let Some(change) = self.check().await {
                        info!(?change, "reachability changed");
                        if events.send(change.into()).await.is_err() {
                            break;
                        }
                    }
                }
                debug!("connectivity monitor stopped");
            }
            .instrument(span),
        )
    }
}
