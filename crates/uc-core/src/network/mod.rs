//! Relay network models: wire protocol and transport/reachability events.

pub mod events;
pub mod message;

pub use events::{ReachabilityChange, TransportEvent};
pub use message::{JoinRoom, RelayMessage};
