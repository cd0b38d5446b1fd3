use serde::{Deserialize, Serialize};

/// Relay connectivity state machine
///
/// Design principle: This is a pure type state machine with only state
/// definitions and transition validation logic. Runtime behaviors like
/// retries and timeouts are handled by the application layer (uc-app).
///
/// State transitions:
///
/// ```text
/// Offline ──connect()──→ Connecting ──socket open──→ Online
///    ↑                        │                         │
///    └──── close / error ─────┴──────── close / error ──┘
/// ```
///
/// The state only changes on explicit socket open/close/error events and on
/// `connect()` calls. It gates whether a send is attempted or the item is
/// queued directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// No relay session
    #[default]
    Offline,

    /// A relay session is being established
    Connecting,

    /// Joined the room and able to push
    Online,
}

impl ConnectionState {
    /// Check if a session exists or is being established
    pub fn is_active(self) -> bool {
        matches!(self, Self::Connecting | Self::Online)
    }

    pub fn is_online(self) -> bool {
        self == Self::Online
    }

    /// Start connecting; `None` when a session already exists or is pending.
    pub fn start_connecting(self) -> Option<Self> {
        match self {
            Self::Offline => Some(Self::Connecting),
            _ => None,
        }
    }

    /// Transition after the relay socket opened and the join was sent
    pub fn on_opened(self) -> Self {
        Self::Online
    }

    /// Transition after the relay socket closed or failed
    pub fn on_closed(self) -> Self {
        Self::Offline
    }
}
