use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tracing::debug;
use uc_core::ports::ReachabilityProbePort;

/// Reachability probe that opens a TCP connection to well-known hosts.
///
/// Targets are tried in order; the first one that accepts within the
/// timeout makes the host "online".
pub struct TcpReachabilityProbe {
    targets: Vec<String>,
    timeout: Duration,
}

impl TcpReachabilityProbe {
    pub fn new(targets: Vec<String>, timeout: Duration) -> Self {
        Self { targets, timeout }
    }
}

#[async_trait]
impl ReachabilityProbePort for TcpReachabilityProbe {
    async fn probe(&self) -> bool {
        for target in &self.targets {
            match tokio::time::timeout(self.timeout, TcpStream::connect(target.as_str())).await {
                Ok(Ok(_)) => return true,
                Ok(Err(e)) => debug!(target = %target, error = %e, "probe target unreachable"),
                Err(_) => debug!(target = %target, "probe target timed out"),
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn reachable_when_a_target_accepts() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open = listener.local_addr().unwrap().to_string();

        let probe = TcpReachabilityProbe::new(vec![open], Duration::from_secs(1));

        assert!(probe.probe().await);
    }

    #[tokio::test]
    async fn falls_back_to_second_target() {
        let closed = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().to_string()
        };
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open = listener.local_addr().unwrap().to_string();

        let probe = TcpReachabilityProbe::new(vec![closed, open], Duration::from_secs(1));

        assert!(probe.probe().await);
    }

    #[tokio::test]
    async fn unreachable_when_every_target_fails() {
        let closed = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().to_string()
        };

        let probe = TcpReachabilityProbe::new(vec![closed], Duration::from_millis(500));

        assert!(!probe.probe().await);
    }
}
