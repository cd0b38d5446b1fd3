//! Effective relay settings resolved from `RelayConfig`.

use std::path::PathBuf;
use std::time::Duration;

use uc_core::RelayConfig;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_ROOM_HISTORY_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    pub bind: String,
    /// Payloads retained per room for late joiners
    pub history_limit: usize,
    /// Outbound frames buffered per member before frames are dropped
    pub member_queue: usize,
    pub send_timeout: Duration,
    /// How long an empty room keeps its history before it is reaped
    pub room_ttl: Duration,
    pub reap_interval: Duration,
    pub log_file: Option<PathBuf>,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            history_limit: DEFAULT_ROOM_HISTORY_LIMIT,
            member_queue: 64,
            send_timeout: Duration::from_millis(5000),
            room_ttl: Duration::from_secs(3600),
            reap_interval: Duration::from_secs(60),
            log_file: None,
        }
    }
}

impl RelaySettings {
    pub fn from_config(config: &RelayConfig) -> Self {
        let defaults = Self::default();
        Self {
            bind: config
                .bind
                .as_deref()
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.bind),
            history_limit: config
                .history_limit
                .filter(|n| *n > 0)
                .unwrap_or(defaults.history_limit),
            member_queue: config
                .member_queue
                .filter(|n| *n > 0)
                .unwrap_or(defaults.member_queue),
            send_timeout: config
                .send_timeout_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.send_timeout),
            room_ttl: config
                .room_ttl_secs
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.room_ttl),
            reap_interval: config
                .reap_interval_secs
                .filter(|s| *s > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.reap_interval),
            log_file: config.log_file.clone(),
        }
    }

    /// Replace the port of `bind`, keeping its host part.
    pub fn with_port(mut self, port: u16) -> Self {
        let host = match self.bind.rsplit_once(':') {
            Some((host, _)) if !host.is_empty() => host.to_string(),
            _ => "0.0.0.0".to_string(),
        };
        self.bind = format!("{host}:{port}");
        self
    }
}
