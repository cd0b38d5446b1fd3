//! Platform adapters for UniClipboard Sync
//!
//! Implementations of the `uc-core` ports that touch the operating system
//! or the network: the system clipboard, the relay WebSocket client and the
//! reachability probe, plus app directory and host identity helpers.

pub mod app_dirs;
pub mod clipboard;
pub mod identity;
pub mod network;

pub use app_dirs::{AppDirs, DirsAppDirsAdapter};
pub use clipboard::{ClipboardWatcher, SystemClipboard};
pub use network::{TcpReachabilityProbe, WsRelayTransport};
