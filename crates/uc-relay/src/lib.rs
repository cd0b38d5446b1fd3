//! UniClipboard Sync relay
//!
//! A room-multiplexed broadcast hub: devices that present the same pairing
//! code join one room, receive the room's recent history on join, and get
//! every clipboard push made by the other members.

pub mod connection;
pub mod logging;
pub mod registry;
pub mod room;
pub mod server;
pub mod settings;

pub use registry::RoomRegistry;
pub use room::{ConnectionId, Member, Room};
pub use server::RelayServer;
pub use settings::RelaySettings;
