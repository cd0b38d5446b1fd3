use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClipboardContent, ClipboardKind, PayloadError};
use crate::ids::ItemId;

/// One entry of a device's clipboard history.
///
/// Items are immutable once created. `content` holds the text, or the
/// base64 encoding of an image, exactly as it is persisted and shown to the
/// host shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipboardItem {
    pub id: ItemId,
    pub kind: ClipboardKind,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ClipboardItem {
    pub fn new(id: ItemId, content: &ClipboardContent, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: content.kind(),
            content: content.encoded().into_owned(),
            created_at,
        }
    }

    /// Whether this item holds exactly `content`.
    pub fn matches(&self, content: &ClipboardContent) -> bool {
        self.kind == content.kind() && self.content == content.encoded()
    }

    pub fn to_content(&self) -> Result<ClipboardContent, PayloadError> {
        ClipboardContent::decode(self.kind, &self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_713_000_000_000).unwrap()
    }

    #[test]
    fn item_serializes_with_camel_case_fields() {
        let item = ClipboardItem::new(ItemId::new(5), &ClipboardContent::text("hi"), ts());
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["id"], 5);
        assert_eq!(json["kind"], "text");
        assert_eq!(json["content"], "hi");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn image_item_matches_same_bytes_only() {
        let content = ClipboardContent::image(vec![1, 2, 3]);
        let item = ClipboardItem::new(ItemId::new(1), &content, ts());

        assert!(item.matches(&content));
        assert!(!item.matches(&ClipboardContent::image(vec![1, 2, 4])));
        assert_eq!(item.to_content().unwrap(), content);
    }
}
