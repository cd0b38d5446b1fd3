pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, CliOverrides};
pub use wiring::run_device;
