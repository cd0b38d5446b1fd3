pub mod config;
pub mod storage;
pub mod time;

pub use config::{load_device_config, load_relay_config};
pub use storage::FileSyncStore;
pub use time::SystemClock;
