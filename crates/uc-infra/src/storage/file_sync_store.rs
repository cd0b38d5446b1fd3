//! JSON-file persistence for the offline queue and clipboard history.
//!
//! One file per collection and per device:
//!
//! - `clipboard-queue-<device>.json`
//! - `clipboard-history-<device>.json`
//!
//! Writes are atomic (temp file + rename), so a crash leaves either the old
//! or the new snapshot on disk. A missing file loads as empty; a corrupt one
//! is logged and also loads as empty, so the engine can always start.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use uc_core::{ports::SyncStorePort, ClipPayload, ClipboardItem, DeviceId};

pub struct FileSyncStore {
    queue_path: PathBuf,
    history_path: PathBuf,
}

impl FileSyncStore {
    pub fn new(data_dir: impl AsRef<Path>, device_id: &DeviceId) -> Self {
        let dir = data_dir.as_ref();
        let stem = device_id.file_stem();
        Self {
            queue_path: dir.join(format!("clipboard-queue-{stem}.json")),
            history_path: dir.join(format!("clipboard-history-{stem}.json")),
        }
    }

    pub fn queue_path(&self) -> &Path {
        &self.queue_path
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    async fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        let content = match fs::read_to_string(path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "store file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("read store failed: {}", path.display()))
            }
        };

        match serde_json::from_str::<Vec<T>>(&content) {
            Ok(list) => Ok(list),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "store file is corrupt, starting empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_list<T: Serialize>(path: &Path, list: &[T]) -> Result<()> {
        let content = serde_json::to_string(list).context("serialize store failed")?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create store dir failed: {}", dir.display()))?;
        }

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp store failed: {}", tmp_path.display()))?;

        // TODO: Windows 上 rename 覆盖可能不一致；macOS/Linux OK。
        fs::rename(&tmp_path, path).await.with_context(|| {
            format!(
                "rename temp store to target failed: {} -> {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl SyncStorePort for FileSyncStore {
    async fn load_queue(&self) -> Result<Vec<ClipPayload>> {
        Self::read_list(&self.queue_path).await
    }

    async fn save_queue(&self, entries: &[ClipPayload]) -> Result<()> {
        Self::write_list(&self.queue_path, entries).await
    }

    async fn load_history(&self) -> Result<Vec<ClipboardItem>> {
        Self::read_list(&self.history_path).await
    }

    async fn save_history(&self, items: &[ClipboardItem]) -> Result<()> {
        Self::write_list(&self.history_path, items).await
    }
}
