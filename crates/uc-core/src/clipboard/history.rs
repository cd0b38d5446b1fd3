use std::collections::VecDeque;

use super::{ClipboardContent, ClipboardItem};
use crate::ids::ItemId;

/// Number of items a device keeps in its history.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Bounded, most-recent-first clipboard history.
///
/// Invariants:
/// - `items[0]` is the newest item
/// - `len() <= limit` after every mutation; the oldest item is evicted first
#[derive(Debug, Clone)]
pub struct ClipboardHistory {
    items: VecDeque<ClipboardItem>,
    limit: usize,
}

impl ClipboardHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit: limit.max(1),
        }
    }

    /// Rebuild a history from persisted items (already most-recent-first).
    pub fn from_items(items: Vec<ClipboardItem>, limit: usize) -> Self {
        let mut history = Self::new(limit);
        history.items = items.into_iter().take(history.limit).collect();
        history
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn head(&self) -> Option<&ClipboardItem> {
        self.items.front()
    }

    /// Cheap duplicate check: compares against the newest item only.
    pub fn head_matches(&self, content: &ClipboardContent) -> bool {
        self.head().is_some_and(|item| item.matches(content))
    }

    pub fn contains(&self, content: &ClipboardContent) -> bool {
        self.items.iter().any(|item| item.matches(content))
    }

    /// Id for the next item, strictly greater than every id handed out so far.
    pub fn next_id(&self, now_ms: i64) -> ItemId {
        let newest = self.items.iter().map(|item| item.id).max();
        ItemId::next_after(newest, now_ms)
    }

    /// Insert `item` as the newest entry; returns the evicted tail item, if any.
    pub fn push_front(&mut self, item: ClipboardItem) -> Option<ClipboardItem> {
        self.items.push_front(item);
        if self.items.len() > self.limit {
            self.items.pop_back()
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClipboardItem> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<ClipboardItem> {
        self.items.iter().cloned().collect()
    }
}

impl Default for ClipboardHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: i64, text: &str) -> ClipboardItem {
        ClipboardItem::new(ItemId::new(id), &ClipboardContent::text(text), Utc::now())
    }

    #[test]
    fn newest_item_is_head() {
        let mut history = ClipboardHistory::default();
        history.push_front(item(1, "a"));
        history.push_front(item(2, "b"));

        assert_eq!(history.head().unwrap().content, "b");
        assert!(history.head_matches(&ClipboardContent::text("b")));
        assert!(!history.head_matches(&ClipboardContent::text("a")));
        assert!(history.contains(&ClipboardContent::text("a")));
    }

    #[test]
    fn history_never_exceeds_limit_and_evicts_oldest() {
        let mut history = ClipboardHistory::default();
        for i in 0..DEFAULT_HISTORY_LIMIT as i64 {
            assert!(history.push_front(item(i, &format!("item-{i}"))).is_none());
        }
        assert_eq!(history.len(), DEFAULT_HISTORY_LIMIT);

        let evicted = history.push_front(item(50, "item-50")).unwrap();
        assert_eq!(evicted.content, "item-0");
        assert_eq!(history.len(), DEFAULT_HISTORY_LIMIT);
        assert_eq!(history.iter().last().unwrap().content, "item-1");
    }

    #[test]
    fn from_items_truncates_to_limit() {
        let items = (0..5).map(|i| item(i, &i.to_string())).collect();
        let history = ClipboardHistory::from_items(items, 3);

        assert_eq!(history.len(), 3);
        assert_eq!(history.head().unwrap().content, "0");
    }

    #[test]
    fn next_id_is_strictly_increasing() {
        let mut history = ClipboardHistory::default();
        history.push_front(item(100, "a"));

        assert_eq!(history.next_id(50), ItemId::new(101));
        assert_eq!(history.next_id(200), ItemId::new(200));
    }

    #[test]
    fn empty_history_has_no_head() {
        let history = ClipboardHistory::default();
        assert!(history.head().is_none());
        assert!(!history.head_matches(&ClipboardContent::text("")));
    }
}
