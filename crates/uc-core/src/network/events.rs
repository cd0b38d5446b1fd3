use super::RelayMessage;
use crate::ids::SessionId;

/// Events reported by the relay transport to the sync engine.
///
/// Every event names the session (connection attempt) it belongs to. The
/// engine drops events whose session is not the current one.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Socket is open and `JOIN_ROOM` has been sent
    Opened { session: SessionId },

    /// Socket closed, failed to open, or failed mid-session
    Closed {
        session: SessionId,
        reason: Option<String>,
    },

    /// A well-formed frame arrived from the relay
    Received {
        session: SessionId,
        message: RelayMessage,
    },
}

impl TransportEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::Opened { session }
            | Self::Closed { session, .. }
            | Self::Received { session, .. } => *session,
        }
    }
}

/// Edge-triggered host reachability change reported by the connectivity monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReachabilityChange {
    Online,
    Offline,
}
