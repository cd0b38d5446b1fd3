use async_trait::async_trait;

/// Host-level "is the internet reachable" probe used by the connectivity monitor.
#[async_trait]
pub trait ReachabilityProbePort: Send + Sync {
    /// `true` when at least one probe target answered within the timeout.
    async fn probe(&self) -> bool;
}
