//! Sync store port - persistence of the offline queue and clipboard history
//!
//! Both collections are saved as whole snapshots after every mutation.
//! A missing or unreadable store loads as empty; it is never fatal.

use anyhow::Result;
use async_trait::async_trait;

use crate::clipboard::{ClipPayload, ClipboardItem};

#[async_trait]
pub trait SyncStorePort: Send + Sync {
    async fn load_queue(&self) -> Result<Vec<ClipPayload>>;
    async fn save_queue(&self, entries: &[ClipPayload]) -> Result<()>;

    /// History, newest first
    async fn load_history(&self) -> Result<Vec<ClipboardItem>>;
    async fn save_history(&self, items: &[ClipboardItem]) -> Result<()>;
}
