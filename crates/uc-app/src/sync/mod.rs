mod engine;
mod monitor;
mod runtime;

pub use engine::SyncEngine;
pub use monitor::ConnectivityMonitor;
pub use runtime::{SyncRuntime, EVENT_CHANNEL_CAPACITY};
