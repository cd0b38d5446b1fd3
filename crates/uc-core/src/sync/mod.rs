//! Sync domain models and state machine.

pub mod echo;
pub mod event;
pub mod queue;
pub mod state;

pub use echo::EchoGuard;
pub use event::SyncEvent;
pub use queue::OfflineQueue;
pub use state::ConnectionState;
