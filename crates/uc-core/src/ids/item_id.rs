use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Time-derived identifier of a history item.
///
/// Milliseconds since the Unix epoch, bumped past the previous id when the
/// clock has not advanced, so ids stay unique and increasing per device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Next id given the current time and the newest id handed out so far.
    pub fn next_after(previous: Option<ItemId>, now_ms: i64) -> Self {
        match previous {
            Some(prev) if prev.0 >= now_ms => Self(prev.0 + 1),
            _ => Self(now_ms),
        }
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
