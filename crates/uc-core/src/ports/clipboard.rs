use async_trait::async_trait;

use super::errors::ClipboardError;
use crate::clipboard::ClipboardContent;

/// OS clipboard access
/// 系统剪切板读写
///
/// Implementations must bound every call with a timeout: a stuck clipboard
/// owner must never stall the engine loop.
#[async_trait]
pub trait ClipboardPort: Send + Sync {
    /// Read the current clipboard value. `Ok(None)` means "nothing usable"
    /// (empty clipboard or an unsupported format).
    async fn read_current(&self) -> Result<Option<ClipboardContent>, ClipboardError>;

    /// Replace the clipboard value.
    async fn write_content(&self, content: ClipboardContent) -> Result<(), ClipboardError>;
}
