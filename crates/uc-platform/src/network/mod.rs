mod reachability;
mod relay_client;

pub use reachability::TcpReachabilityProbe;
pub use relay_client::WsRelayTransport;
