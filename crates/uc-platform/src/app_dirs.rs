use std::path::PathBuf;

use thiserror::Error;

const APP_DIR_NAME: &str = "uniclipboard-sync";

fn resolved_app_dir_name() -> String {
    match std::env::var("UC_PROFILE") {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}

/// Directories used by the device process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Queue and history files live here
    pub app_data_root: PathBuf,
    pub app_log_root: PathBuf,
}

pub struct DirsAppDirsAdapter {
    base_data_local_dir_override: Option<PathBuf>,
}

impl Default for DirsAppDirsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DirsAppDirsAdapter {
    pub fn new() -> Self {
        Self {
            base_data_local_dir_override: None,
        }
    }

    /// Creates a test-only adapter that overrides the base local data directory.
    #[cfg(test)]
    pub fn with_base_data_local_dir(base: PathBuf) -> Self {
        Self {
            base_data_local_dir_override: Some(base),
        }
    }

    /// Overridden base directory if set, otherwise `dirs::data_local_dir()`.
    pub fn base_data_local_dir(&self) -> Option<PathBuf> {
        if let Some(base) = &self.base_data_local_dir_override {
            return Some(base.clone());
        }
        dirs::data_local_dir()
    }

    /// `<data_local_dir>/uniclipboard-sync[-<UC_PROFILE>]` and its `logs/` subdirectory.
    pub fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let base_data = self
            .base_data_local_dir()
            .ok_or(AppDirsError::DataLocalDirUnavailable)?;
        let app_data_root = base_data.join(resolved_app_dir_name());

        Ok(AppDirs {
            app_log_root: app_data_root.join("logs"),
            app_data_root,
        })
    }
}
