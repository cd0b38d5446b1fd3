//! Relay wire protocol
//!
//! Text-framed, one JSON object per WebSocket frame, adjacently tagged:
//!
//! ```json
//! {"type": "JOIN_ROOM",      "payload": {"pin": "1234", "deviceId": "laptop"}}
//! {"type": "CLIPBOARD_PUSH", "payload": "copied text"}
//! {"type": "CLIPBOARD_PUSH", "payload": {"kind": "image", "data": "<base64>"}}
//! {"type": "HISTORY_BATCH",  "payload": ["a", "b", "c"]}
//! {"type": "DEVICE_NOTIFY",  "payload": 3}
//! {"type": "CLEAR_HISTORY"}
//! ```
//!
//! | message          | direction                 |
//! |------------------|---------------------------|
//! | `JOIN_ROOM`      | client → server, first    |
//! | `CLIPBOARD_PUSH` | both                      |
//! | `HISTORY_BATCH`  | server → new joiner only  |
//! | `DEVICE_NOTIFY`  | server → room             |
//! | `CLEAR_HISTORY`  | client → server           |
use serde::{Deserialize, Serialize};

use crate::clipboard::ClipPayload;
use crate::ids::{DeviceId, RoomPin};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoom {
    pub pin: RoomPin,
    pub device_id: DeviceId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelayMessage {
    JoinRoom(JoinRoom),
    ClipboardPush(ClipPayload),
    HistoryBatch(Vec<ClipPayload>),
    DeviceNotify(usize),
    ClearHistory,
}

impl RelayMessage {
    pub fn join(pin: RoomPin, device_id: DeviceId) -> Self {
        Self::JoinRoom(JoinRoom { pin, device_id })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::JoinRoom(_) => "JOIN_ROOM",
            Self::ClipboardPush(_) => "CLIPBOARD_PUSH",
            Self::HistoryBatch(_) => "HISTORY_BATCH",
            Self::DeviceNotify(_) => "DEVICE_NOTIFY",
            Self::ClearHistory => "CLEAR_HISTORY",
        }
    }

    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_text(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
