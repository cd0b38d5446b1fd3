//! Registry of live rooms keyed by pairing code.
//!
//! The map lock is held only to look up, insert or remove a room; every room
//! operation happens under that room's own mutex.
//! 全局表只负责查找/插入/删除，房间内的操作只持有房间自己的锁。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info};
use uc_core::{ClipPayload, RoomPin};

use crate::room::{ConnectionId, Member, Room};

pub type SharedRoom = Arc<Mutex<Room>>;

#[derive(Debug)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomPin, SharedRoom>>,
    history_limit: usize,
    next_connection: AtomicU64,
}

impl RoomRegistry {
    pub fn new(history_limit: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            history_limit,
            next_connection: AtomicU64::new(1),
        }
    }

    pub fn next_connection_id(&self) -> ConnectionId {
        ConnectionId::new(self.next_connection.fetch_add(1, Ordering::Relaxed))
    }

    /// Join `member` to the room for `pin`, creating the room if needed.
    ///
    /// Returns the room handle the connection keeps for later pushes and leave.
    pub async fn join(&self, pin: &RoomPin, member: Member) -> SharedRoom {
        loop {
            let room = self.get_or_create(pin).await;
            let mut guard = room.lock().await;
            // Lost a race with the reaper; the next lookup creates a fresh room.
            if guard.is_reaped() {
                continue;
            }
            guard.join(member);
            info!(pin = %pin, members = guard.member_count(), "device joined room");
            drop(guard);
            return room;
        }
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    pub async fn history(&self, pin: &RoomPin) -> Option<Vec<ClipPayload>> {
        let room = self.rooms.read().await.get(pin).cloned()?;
        let history = room.lock().await.history();
        Some(history)
    }

    pub async fn member_count(&self, pin: &RoomPin) -> usize {
        let Some(room) = self.rooms.read().await.get(pin).cloned() else {
            return 0;
        };
        let count = room.lock().await.member_count();
        count
    }

    /// Remove rooms that have been empty for at least `ttl`.
    ///
    /// Rooms locked by a connection at sweep time are skipped until the next pass.
    pub async fn reap(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut rooms = self.rooms.write().await;
        let before = rooms.len();
        rooms.retain(|pin, room| {
            let Ok(mut guard) = room.try_lock() else {
                return true;
            };
            if !guard.is_expired(now, ttl) {
                return true;
            }
            guard.mark_reaped();
            debug!(pin = %pin, "reaping idle room");
            false
        });
        let reaped = before - rooms.len();
        if reaped > 0 {
            info!(reaped, remaining = rooms.len(), "idle rooms reaped");
        }
        reaped
    }

    async fn get_or_create(&self, pin: &RoomPin) -> SharedRoom {
        if let Some(room) = self.rooms.read().await.get(pin) {
            return Arc::clone(room);
        }
        let mut rooms = self.rooms.write().await;
        Arc::clone(rooms.entry(pin.clone()).or_insert_with(|| {
            debug!(pin = %pin, "creating room");
            Arc::new(Mutex::new(Room::new(pin.clone(), self.history_limit)))
        }))
    }
}
