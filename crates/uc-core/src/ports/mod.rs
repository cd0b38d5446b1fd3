//! Port interfaces for the application layer
//!
//! Ports define the contract between the sync engine (`uc-app`) and the
//! infrastructure/platform implementations. The engine only ever talks to
//! these traits, so every side effect can be faked in tests.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `uc-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by the engine or the runtime loop?**
//! 3. **Is it implemented by the infrastructure or platform layer?**
//!
//! If all three answers are **yes**, place it in `uc-core/ports`.

mod clipboard;
mod clock;
pub mod errors;
mod host;
mod reachability;
mod storage;
mod transport;

pub use clipboard::ClipboardPort;
pub use clock::ClockPort;
pub use errors::{ClipboardError, ConfigError, TransportError};
pub use host::HostEventPort;
pub use reachability::ReachabilityProbePort;
pub use storage::SyncStorePort;
pub use transport::RelayTransportPort;
