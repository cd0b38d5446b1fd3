//! Clipboard domain models.
mod content;
mod history;
mod item;
mod payload;

pub use content::{ClipboardContent, ClipboardKind, PayloadError};
pub use history::{ClipboardHistory, DEFAULT_HISTORY_LIMIT};
pub use item::ClipboardItem;
pub use payload::{BinaryPayload, ClipPayload};
