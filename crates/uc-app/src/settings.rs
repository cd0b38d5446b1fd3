//! Effective engine settings.
//!
//! `DeviceConfig` is a pure DTO; this is the one place where missing or zero
//! values are turned into the documented defaults.
//! 配置 DTO 不含默认值，默认值统一在这里解析。

use std::time::Duration;
use uc_core::clipboard::DEFAULT_HISTORY_LIMIT;
use uc_core::ports::ConfigError;
use uc_core::{DeviceConfig, DeviceId};

pub const DEFAULT_RELAY_URL: &str = "ws://localhost:3000";
pub const DEFAULT_PROBE_TARGETS: [&str; 2] = ["8.8.8.8:53", "1.1.1.1:53"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub relay_url: String,
    pub history_limit: usize,
    pub poll_interval: Duration,
    pub probe_interval: Duration,
    pub probe_timeout: Duration,
    pub probe_targets: Vec<String>,
    pub clipboard_timeout: Duration,
    pub send_timeout: Duration,
    pub connect_timeout: Duration,
    pub reconnect_interval: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            poll_interval: Duration::from_millis(1000),
            probe_interval: Duration::from_millis(5000),
            probe_timeout: Duration::from_millis(2000),
            probe_targets: DEFAULT_PROBE_TARGETS.iter().map(|t| t.to_string()).collect(),
            clipboard_timeout: Duration::from_millis(2000),
            send_timeout: Duration::from_millis(3000),
            connect_timeout: Duration::from_millis(5000),
            reconnect_interval: Duration::from_millis(5000),
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &DeviceConfig) -> Self {
        let defaults = Self::default();
        Self {
            relay_url: non_empty(config.relay_url.as_deref()).unwrap_or(defaults.relay_url),
            history_limit: config
                .history_limit
                .filter(|n| *n > 0)
                .unwrap_or(defaults.history_limit),
            poll_interval: millis_or(config.poll_interval_ms, defaults.poll_interval),
            probe_interval: millis_or(config.probe_interval_ms, defaults.probe_interval),
            probe_timeout: millis_or(config.probe_timeout_ms, defaults.probe_timeout),
            probe_targets: config
                .probe_targets
                .clone()
                .filter(|targets| !targets.is_empty())
                .unwrap_or(defaults.probe_targets),
            clipboard_timeout: millis_or(config.clipboard_timeout_ms, defaults.clipboard_timeout),
            send_timeout: millis_or(config.send_timeout_ms, defaults.send_timeout),
            connect_timeout: millis_or(config.connect_timeout_ms, defaults.connect_timeout),
            reconnect_interval: millis_or(
                config.reconnect_interval_ms,
                defaults.reconnect_interval,
            ),
        }
    }
}

/// Resolve the device identity: config value, then `DEVICE_ID`, then host name.
///
/// Blank candidates are skipped. No candidate at all is a fatal startup error.
pub fn resolve_device_id(
    configured: Option<&str>,
    env_value: Option<&str>,
    hostname: Option<&str>,
) -> Result<DeviceId, ConfigError> {
    [configured, env_value, hostname]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .map(DeviceId::new)
        .ok_or(ConfigError::MissingDeviceId)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn millis_or(value: Option<u64>, default: Duration) -> Duration {
    value
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(default)
}
