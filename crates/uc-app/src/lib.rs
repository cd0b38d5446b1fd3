//! UniClipboard Sync application layer
//!
//! This crate contains the device-side sync engine, the connectivity
//! monitor and the reconciliation loop that drives them.

pub mod deps;
pub mod settings;
pub mod sync;

pub use deps::SyncDeps;
pub use settings::{resolve_device_id, EngineSettings};
pub use sync::{ConnectivityMonitor, SyncEngine, SyncRuntime, EVENT_CHANNEL_CAPACITY};
