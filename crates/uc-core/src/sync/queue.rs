use std::collections::VecDeque;

use crate::clipboard::ClipPayload;

/// FIFO of payloads captured while no relay session could take them.
///
/// A flush drains the whole queue atomically with [`OfflineQueue::take_all`]
/// and hands back whatever failed with [`OfflineQueue::requeue_front`], so
/// two overlapping flushes never see the same entry.
#[derive(Debug, Clone, Default)]
pub struct OfflineQueue {
    entries: VecDeque<ClipPayload>,
}

impl OfflineQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<ClipPayload>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, payload: ClipPayload) {
        self.entries.push_back(payload);
    }

    /// Remove and return every entry, oldest first.
    pub fn take_all(&mut self) -> Vec<ClipPayload> {
        self.entries.drain(..).collect()
    }

    /// Put failed entries back ahead of anything queued since they were taken.
    pub fn requeue_front(&mut self, failed: Vec<ClipPayload>) {
        for payload in failed.into_iter().rev() {
            self.entries.push_front(payload);
        }
    }

    pub fn to_vec(&self) -> Vec<ClipPayload> {
        self.entries.iter().cloned().collect()
    }
}
