//! Clipboard content model
//!
//! [`ClipboardContent`] is what the clipboard holds at one point in time:
//! either UTF-8 text or the bytes of an image. It is the unit of
//! deduplication, echo suppression and synchronization.
//!
//! Content never carries timestamps or ids. Those belong to
//! [`ClipboardItem`](super::ClipboardItem), which is created when content
//! enters the history.
//!
//! ## Text encoding
//!
//! Text travels and is stored as-is. Image bytes are encoded with standard
//! base64 whenever they leave memory (relay frames, persisted history).
//! [`ClipboardContent::encoded`] is the single place that performs that
//! mapping, so every equality check between a stored item and a live
//! content goes through the same representation.
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardKind {
    Text,
    Image,
}

impl ClipboardKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("image payload is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("payload is empty")]
    Empty,
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum ClipboardContent {
    Text(String),
    Image(Vec<u8>),
}

impl ClipboardContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn image(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Image(bytes.into())
    }

    pub fn kind(&self) -> ClipboardKind {
        match self {
            Self::Text(_) => ClipboardKind::Text,
            Self::Image(_) => ClipboardKind::Image,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Image(bytes) => bytes.is_empty(),
        }
    }

    pub fn size_bytes(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Image(bytes) => bytes.len(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image(_) => None,
        }
    }

    /// String form used on the wire and on disk: the text itself, or base64 for images.
    pub fn encoded(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            Self::Image(bytes) => Cow::Owned(STANDARD.encode(bytes)),
        }
    }

    /// Inverse of [`ClipboardContent::encoded`].
    pub fn decode(kind: ClipboardKind, encoded: &str) -> Result<Self, PayloadError> {
        match kind {
            ClipboardKind::Text => Ok(Self::Text(encoded.to_string())),
            ClipboardKind::Image => STANDARD
                .decode(encoded.trim())
                .map(Self::Image)
                .map_err(|e| PayloadError::InvalidBase64(e.to_string())),
        }
    }

    /// Short, log-safe description of the content.
    pub fn preview(&self) -> String {
        match self {
            Self::Text(text) => {
                let head: String = text.chars().take(50).collect();
                if head.len() < text.len() {
                    format!("{head}…")
                } else {
                    head
                }
            }
            Self::Image(bytes) => format!("<image {} bytes>", bytes.len()),
        }
    }
}

// Custom Debug implementation to keep clipboard payloads out of logs
impl std::fmt::Debug for ClipboardContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f
                .debug_struct("Text")
                .field("len", &text.len())
                .finish(),
            Self::Image(bytes) => f
                .debug_struct("Image")
                .field("len", &bytes.len())
                .finish(),
        }
    }
}
