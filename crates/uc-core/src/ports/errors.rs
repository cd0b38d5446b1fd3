use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("relay connection is not open")]
    NotConnected,

    #[error("relay operation timed out")]
    Timeout,

    /// The connection went away while the frame was in flight
    #[error("relay connection closed")]
    Closed,

    #[error("relay io error: {0}")]
    Io(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard access timed out")]
    Timeout,

    #[error("clipboard format not supported: {0}")]
    Unsupported(String),

    #[error("clipboard backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("no usable device id (set device.id, DEVICE_ID, or a hostname)")]
    MissingDeviceId,
}
