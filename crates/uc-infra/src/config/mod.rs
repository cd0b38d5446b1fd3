mod loader;

pub use loader::{load_device_config, load_relay_config};
