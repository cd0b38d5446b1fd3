//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic or policies / 禁止任何业务逻辑或策略**
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No default value calculation / 禁止默认值计算**
//!
//! Missing keys stay `None`. Defaults are applied by the settings layer of
//! the process that consumes the DTO (`uc-app` for devices, `uc-relay` for the relay).
//! 缺失的键保持为 `None`，默认值由使用方的 settings 层负责。

use std::path::PathBuf;

/// Device (sync engine) configuration DTO
/// 设备端配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Explicit device id; falls back to env / hostname when absent
    /// 设备 ID；缺失时由调用方回退到环境变量或主机名
    pub device_id: Option<String>,

    /// Relay WebSocket URL, e.g. `ws://localhost:3000`
    pub relay_url: Option<String>,

    /// Room PIN to join on startup
    /// 启动时自动加入的房间 PIN
    pub pin: Option<String>,

    /// Directory that holds queue / history files
    pub data_dir: Option<PathBuf>,

    pub history_limit: Option<usize>,
    pub poll_interval_ms: Option<u64>,
    pub probe_interval_ms: Option<u64>,
    pub probe_timeout_ms: Option<u64>,
    pub probe_targets: Option<Vec<String>>,
    pub clipboard_timeout_ms: Option<u64>,
    pub send_timeout_ms: Option<u64>,
    pub connect_timeout_ms: Option<u64>,
    pub reconnect_interval_ms: Option<u64>,

    /// Optional log file path / 可选日志文件路径
    pub log_file: Option<PathBuf>,
}

impl DeviceConfig {
    /// Create DeviceConfig from TOML value
    /// 从 TOML 值创建 DeviceConfig
    ///
    /// **Prohibited / 禁止**: no validation, no defaults. A PIN of `""` is a
    /// fact here; the engine decides whether it is usable.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let device = toml_value.get("device");
        let relay = toml_value.get("relay");
        let sync = toml_value.get("sync");
        let probe = toml_value.get("probe");
        let storage = toml_value.get("storage");
        let logging = toml_value.get("logging");

        Ok(Self {
            device_id: str_at(device, "id"),
            relay_url: str_at(relay, "url"),
            pin: str_at(relay, "pin"),
            data_dir: str_at(storage, "data_dir").map(PathBuf::from),
            history_limit: int_at(sync, "history_limit").map(|v| v as usize),
            poll_interval_ms: int_at(sync, "poll_interval_ms").map(|v| v as u64),
            probe_interval_ms: int_at(probe, "interval_ms").map(|v| v as u64),
            probe_timeout_ms: int_at(probe, "timeout_ms").map(|v| v as u64),
            probe_targets: probe
                .and_then(|p| p.get("targets"))
                .and_then(|v| v.as_array())
                .map(|targets| {
                    targets
                        .iter()
                        .filter_map(|t| t.as_str().map(str::to_string))
                        .collect()
                }),
            clipboard_timeout_ms: int_at(sync, "clipboard_timeout_ms").map(|v| v as u64),
            send_timeout_ms: int_at(relay, "send_timeout_ms").map(|v| v as u64),
            connect_timeout_ms: int_at(relay, "connect_timeout_ms").map(|v| v as u64),
            reconnect_interval_ms: int_at(relay, "reconnect_interval_ms").map(|v| v as u64),
            log_file: str_at(logging, "file").map(PathBuf::from),
        })
    }

    /// Create empty DeviceConfig / 创建空配置
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Relay server configuration DTO
/// 中继服务器配置 DTO
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayConfig {
    /// Listen address, e.g. `0.0.0.0:3000`
    pub bind: Option<String>,
    pub history_limit: Option<usize>,
    pub member_queue: Option<usize>,
    pub send_timeout_ms: Option<u64>,
    pub room_ttl_secs: Option<u64>,
    pub reap_interval_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl RelayConfig {
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let server = toml_value.get("server");
        let rooms = toml_value.get("rooms");
        let logging = toml_value.get("logging");

        Ok(Self {
            bind: str_at(server, "bind"),
            history_limit: int_at(rooms, "history_limit").map(|v| v as usize),
            member_queue: int_at(rooms, "member_queue").map(|v| v as usize),
            send_timeout_ms: int_at(server, "send_timeout_ms").map(|v| v as u64),
            room_ttl_secs: int_at(rooms, "ttl_secs").map(|v| v as u64),
            reap_interval_secs: int_at(rooms, "reap_interval_secs").map(|v| v as u64),
            log_file: str_at(logging, "file").map(PathBuf::from),
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

fn str_at(table: Option<&toml::Value>, key: &str) -> Option<String> {
    table
        .and_then(|t| t.get(key))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn int_at(table: Option<&toml::Value>, key: &str) -> Option<i64> {
    table.and_then(|t| t.get(key)).and_then(|v| v.as_integer())
}
