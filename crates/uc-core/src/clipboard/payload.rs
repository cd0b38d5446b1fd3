//! Wire payload of a clipboard push.
//!
//! Text travels as a bare JSON string; binary content as a tagged object:
//!
//! ```json
//! "some copied text"
//! {"kind": "image", "data": "iVBORw0KGgo..."}
//! ```
//!
//! The same shape is used for entries of the persisted offline queue.
use serde::{Deserialize, Serialize};

use super::{ClipboardContent, ClipboardKind, PayloadError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClipPayload {
    Text(String),
    Binary(BinaryPayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BinaryPayload {
    Image { data: String },
}

impl ClipPayload {
    pub fn from_content(content: &ClipboardContent) -> Self {
        match content {
            ClipboardContent::Text(text) => Self::Text(text.clone()),
            ClipboardContent::Image(_) => Self::Binary(BinaryPayload::Image {
                data: content.encoded().into_owned(),
            }),
        }
    }

    pub fn kind(&self) -> ClipboardKind {
        match self {
            Self::Text(_) => ClipboardKind::Text,
            Self::Binary(BinaryPayload::Image { .. }) => ClipboardKind::Image,
        }
    }

    pub fn to_content(&self) -> Result<ClipboardContent, PayloadError> {
        match self {
            Self::Text(text) => Ok(ClipboardContent::text(text.clone())),
            Self::Binary(BinaryPayload::Image { data }) => {
                let content = ClipboardContent::decode(ClipboardKind::Image, data)?;
                if content.is_empty() {
                    return Err(PayloadError::Empty);
                }
                Ok(content)
            }
        }
    }
}

impl From<&ClipboardContent> for ClipPayload {
    fn from(content: &ClipboardContent) -> Self {
        Self::from_content(content)
    }
}
