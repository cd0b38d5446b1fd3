//! Host-shell protocol
//!
//! The engine process is driven by a host shell (tray app, terminal, test
//! harness) over newline-delimited JSON. Commands flow in, events flow out.
//!
//! ```json
//! {"type": "CMD_CONNECT", "pin": "1234"}
//! {"type": "RESTORE_CLIPBOARD", "content": "text to restore"}
//! {"type": "RESTORE_CLIPBOARD", "content": {"kind": "image", "content": "<base64>"}}
//! {"type": "CLEAR_HISTORY"}
//! {"type": "REQUEST_STATE"}
//! ```
//!
//! Events describe facts only; the shell never has to ask what they mean.
use serde::{Deserialize, Serialize};

use crate::clipboard::{ClipboardContent, ClipboardItem, ClipboardKind, PayloadError};
use crate::ids::RoomPin;
use crate::sync::ConnectionState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostCommand {
    /// 连接到指定房间
    CmdConnect { pin: RoomPin },
    /// 把历史记录中的某一项写回剪切板
    RestoreClipboard { content: RestoreContent },
    /// 清空历史
    ClearHistory,
    /// 重新发送当前状态
    RequestState,
}

/// Content the shell asks to restore: either raw text or a history entry.
///
/// Extra fields of a history entry (`id`, `createdAt`) are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RestoreContent {
    Text(String),
    Entry {
        #[serde(alias = "type")]
        kind: ClipboardKind,
        content: String,
    },
}

impl RestoreContent {
    pub fn to_content(&self) -> Result<ClipboardContent, PayloadError> {
        let content = match self {
            Self::Text(text) => ClipboardContent::text(text.clone()),
            Self::Entry { kind, content } => ClipboardContent::decode(*kind, content)?,
        };
        if content.is_empty() {
            return Err(PayloadError::Empty);
        }
        Ok(content)
    }
}

impl From<&ClipboardItem> for RestoreContent {
    fn from(item: &ClipboardItem) -> Self {
        Self::Entry {
            kind: item.kind,
            content: item.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostEvent {
    /// 当前完整历史（最新在前）
    ClipboardHistory { history: Vec<ClipboardItem> },
    /// 房间内设备概况
    DeviceList { devices: Vec<String> },
    /// 与中继的连接状态
    ConnectionState {
        state: ConnectionState,
        error: Option<String>,
    },
}

impl HostEvent {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ClipboardHistory { .. } => "CLIPBOARD_HISTORY",
            Self::DeviceList { .. } => "DEVICE_LIST",
            Self::ConnectionState { .. } => "CONNECTION_STATE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_connect_command() {
        let cmd: HostCommand =
            serde_json::from_value(json!({"type": "CMD_CONNECT", "pin": "1234"})).unwrap();
        assert_eq!(
            cmd,
            HostCommand::CmdConnect {
                pin: RoomPin::from("1234")
            }
        );
    }

    #[test]
    fn parses_unit_commands() {
        let clear: HostCommand = serde_json::from_str(r#"{"type":"CLEAR_HISTORY"}"#).unwrap();
        let state: HostCommand = serde_json::from_str(r#"{"type":"REQUEST_STATE"}"#).unwrap();
        assert_eq!(clear, HostCommand::ClearHistory);
        assert_eq!(state, HostCommand::RequestState);
    }

    #[test]
    fn restore_accepts_text_or_history_entry() {
        let text: HostCommand = serde_json::from_value(
            json!({"type": "RESTORE_CLIPBOARD", "content": "hello"}),
        )
        .unwrap();
        let HostCommand::RestoreClipboard { content } = text else {
            panic!("expected restore command");
        };
        assert_eq!(content.to_content().unwrap(), ClipboardContent::text("hello"));

        let entry: HostCommand = serde_json::from_value(json!({
            "type": "RESTORE_CLIPBOARD",
            "content": {"id": 1, "kind": "image", "content": "AQID", "createdAt": "2024-01-01T00:00:00Z"}
        }))
        .unwrap();
        let HostCommand::RestoreClipboard { content } = entry else {
            panic!("expected restore command");
        };
        assert_eq!(content.to_content().unwrap(), ClipboardContent::image(vec![1, 2, 3]));
    }

    #[test]
    fn restore_of_empty_text_is_rejected() {
        let content = RestoreContent::Text(String::new());
        assert_eq!(content.to_content().unwrap_err(), PayloadError::Empty);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = HostEvent::DeviceList {
            devices: vec!["2 Device(s) Connected".into()],
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "DEVICE_LIST", "devices": ["2 Device(s) Connected"]})
        );

        let state = HostEvent::ConnectionState {
            state: ConnectionState::Online,
            error: None,
        };
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({"type": "CONNECTION_STATE", "state": "online", "error": null})
        );
    }
}
