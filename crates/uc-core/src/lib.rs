//! # uc-core
//!
//! Core domain models and business logic for Universal Clipboard Sync.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod clipboard;
pub mod config;
pub mod host;
pub mod ids;
pub mod network;
pub mod ports;
pub mod sync;

// Re-export commonly used types at the crate root
pub use clipboard::{ClipPayload, ClipboardContent, ClipboardHistory, ClipboardItem, ClipboardKind};
pub use config::{DeviceConfig, RelayConfig};
pub use host::{HostCommand, HostEvent, RestoreContent};
pub use ids::{DeviceId, ItemId, RoomPin, SessionId};
pub use network::{ReachabilityChange, RelayMessage, TransportEvent};
pub use sync::{ConnectionState, EchoGuard, OfflineQueue, SyncEvent};
