//! ID type wrappers for type safety.

pub mod device_id;
pub mod item_id;
pub mod room_pin;
pub mod session_id;

pub use device_id::DeviceId;
pub use item_id::ItemId;
pub use room_pin::RoomPin;
pub use session_id::SessionId;
