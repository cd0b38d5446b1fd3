//! Accept loop and idle-room reaper.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::connection::serve_connection;
use crate::registry::RoomRegistry;
use crate::settings::RelaySettings;

pub struct RelayServer {
    listener: TcpListener,
    registry: Arc<RoomRegistry>,
    settings: Arc<RelaySettings>,
}

impl RelayServer {
    pub async fn bind(settings: RelaySettings) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&settings.bind)
            .await
            .with_context(|| format!("failed to bind relay on {}", settings.bind))?;
        Ok(Self {
            listener,
            registry: Arc::new(RoomRegistry::new(settings.history_limit)),
            settings: Arc::new(settings),
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn registry(&self) -> Arc<RoomRegistry> {
        Arc::clone(&self.registry)
    }

    /// Serve until `shutdown` resolves. Open connections are dropped with the runtime.
    pub async fn run_until<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        info!(%addr, "relay listening");

        let reaper = {
            let registry = Arc::clone(&self.registry);
            let ttl = self.settings.room_ttl;
            let period = self.settings.reap_interval;
            tokio::spawn(async move {
                let mut ticker =
                    tokio::time::interval_at(tokio::time::Instant::now() + period, period);
                loop {
                    ticker.tick().await;
                    registry.reap(ttl).await;
                }
            })
        };

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        debug!(%peer, "connection accepted");
                        let registry = Arc::clone(&self.registry);
                        let settings = Arc::clone(&self.settings);
                        tokio::spawn(async move {
                            if let Err(e) = serve_connection(stream, peer, registry, settings).await {
                                debug!(%peer, error = %e, "connection ended with error");
                            }
                        });
                    }
                    Err(e) => error!(error = %e, "failed to accept connection"),
                },
                _ = &mut shutdown => {
                    info!("relay shutting down");
                    break;
                }
            }
        }

        reaper.abort();
        Ok(())
    }
}
