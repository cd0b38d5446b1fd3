//! # Configuration Loader / 配置加载器
//!
//! Reads the optional TOML file and layers command-line values on top.
//! No defaulting happens here; `EngineSettings` owns the defaults.
//! 这里不做默认值处理，默认值由 `EngineSettings` 决定。

use std::path::{Path, PathBuf};

use uc_core::ports::ConfigError;
use uc_core::DeviceConfig;
use uc_infra::load_device_config;

/// Values given on the command line; each one wins over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub device_id: Option<String>,
    pub pin: Option<String>,
    pub relay_url: Option<String>,
    pub data_dir: Option<PathBuf>,
}

/// Load the device config. Without a path the config is empty, not an error.
pub fn load_config(path: Option<&Path>, overrides: CliOverrides) -> Result<DeviceConfig, ConfigError> {
    let config = match path {
        Some(path) => load_device_config(path)?,
        None => DeviceConfig::empty(),
    };
    Ok(apply_overrides(config, overrides))
}

fn apply_overrides(mut config: DeviceConfig, overrides: CliOverrides) -> DeviceConfig {
    if overrides.device_id.is_some() {
        config.device_id = overrides.device_id;
    }
    if overrides.pin.is_some() {
        config.pin = overrides.pin;
    }
    if overrides.relay_url.is_some() {
        config.relay_url = overrides.relay_url;
    }
    if overrides.data_dir.is_some() {
        config.data_dir = overrides.data_dir;
    }
    config
}
