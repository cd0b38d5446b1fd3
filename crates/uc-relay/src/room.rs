//! A single relay room: its members and its retained history.
//!
//! All methods take `&mut self`; the registry wraps every room in its own
//! mutex, so a room is the unit of mutual exclusion and different rooms
//! never contend with each other.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};
use uc_core::{ClipPayload, RelayMessage, RoomPin};

/// Process-unique id of one accepted socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Outbound half of a member: a bounded queue drained by the socket writer.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: ConnectionId,
    pub tx: mpsc::Sender<String>,
}

impl Member {
    /// Best-effort, never blocks. A full or closed queue drops the frame.
    fn deliver(&self, text: &str) -> bool {
        match self.tx.try_send(text.to_string()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(member = %self.id, "member queue full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        }
    }
}

#[derive(Debug)]
pub struct Room {
    pin: RoomPin,
    members: HashMap<ConnectionId, Member>,
    history: VecDeque<ClipPayload>,
    history_limit: usize,
    idle_since: Option<Instant>,
    reaped: bool,
}

impl Room {
    pub fn new(pin: RoomPin, history_limit: usize) -> Self {
        Self {
            pin,
            members: HashMap::new(),
            history: VecDeque::new(),
            history_limit,
            idle_since: Some(Instant::now()),
            reaped: false,
        }
    }

    pub fn pin(&self) -> &RoomPin {
        &self.pin
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn history(&self) -> Vec<ClipPayload> {
        self.history.iter().cloned().collect()
    }

    pub fn is_reaped(&self) -> bool {
        self.reaped
    }

    /// Add `member`, replay retained history to it alone, then tell everyone the new count.
    pub fn join(&mut self, member: Member) {
        if !self.history.is_empty() {
            let batch = RelayMessage::HistoryBatch(self.history());
            if let Some(text) = encode(&batch) {
                member.deliver(&text);
            }
        }
        self.members.insert(member.id, member);
        self.idle_since = None;
        self.notify_count();
    }

    /// Retain `payload` and fan it out to every member except `from`.
    ///
    /// Returns how many members the frame was queued for.
    pub fn push(&mut self, from: ConnectionId, payload: ClipPayload) -> usize {
        let Some(text) = encode(&RelayMessage::ClipboardPush(payload.clone())) else {
            return 0;
        };

        self.history.push_back(payload);
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }

        self.members
            .values()
            .filter(|member| member.id != from)
            .filter(|member| member.deliver(&text))
            .count()
    }

    pub fn clear(&mut self) {
        debug!(pin = %self.pin, dropped = self.history.len(), "room history cleared");
        self.history.clear();
    }

    pub fn leave(&mut self, id: ConnectionId) {
        if self.members.remove(&id).is_none() {
            return;
        }
        if self.members.is_empty() {
            self.idle_since = Some(Instant::now());
        }
        self.notify_count();
    }

    /// True when the room has been empty for at least `ttl` as of `now`.
    pub fn is_expired(&self, now: Instant, ttl: std::time::Duration) -> bool {
        self.members.is_empty()
            && self
                .idle_since
                .is_some_and(|since| now.saturating_duration_since(since) >= ttl)
    }

    pub(crate) fn mark_reaped(&mut self) {
        self.reaped = true;
    }

    fn notify_count(&self) {
        if let Some(text) = encode(&RelayMessage::DeviceNotify(self.members.len())) {
            for member in self.members.values() {
                member.deliver(&text);
            }
        }
    }
}

fn encode(message: &RelayMessage) -> Option<String> {
    match message.to_text() {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(kind = message.type_name(), error = %e, "failed to encode relay frame");
            None
        }
    }
}
