//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into the config DTOs / 将 TOML 解析为配置 DTO
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No default value logic / 禁止默认值逻辑**

use std::path::Path;
use uc_core::config::{DeviceConfig, RelayConfig};
use uc_core::ports::ConfigError;

fn read_toml(config_path: &Path) -> Result<toml::Value, ConfigError> {
    let path = config_path.display().to_string();
    let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path,
        message: e.to_string(),
    })
}

/// Load device configuration from a TOML file
/// 从 TOML 文件加载设备配置
///
/// Missing sections and keys are facts (`None`), not errors.
/// 缺失的部分和键是事实（`None`），不是错误。
pub fn load_device_config(config_path: &Path) -> Result<DeviceConfig, ConfigError> {
    let value = read_toml(config_path)?;
    DeviceConfig::from_toml(&value).map_err(|e| ConfigError::Parse {
        path: config_path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load relay configuration from a TOML file
/// 从 TOML 文件加载中继配置
pub fn load_relay_config(config_path: &Path) -> Result<RelayConfig, ConfigError> {
    let value = read_toml(config_path)?;
    RelayConfig::from_toml(&value).map_err(|e| ConfigError::Parse {
        path: config_path.display().to_string(),
        message: e.to_string(),
    })
}
