//! Tracing configuration for the device process
//!
//! ## Behavior / 行为
//!
//! - **Console**: human-readable logs on **stderr**; stdout carries the host event stream
//! - **File**: non-blocking copy in the configured log file, or `<app data>/logs/clipsync.log`
//! - **Environment filter**: respects `RUST_LOG`, with per-crate defaults
//!
//! Call once from `main`, before anything logs.

use std::path::{Path, PathBuf};
use std::{fs, io, sync::OnceLock};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};
use uc_platform::app_dirs::DirsAppDirsAdapter;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_NAME: &str = "clipsync.log";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Default filter directives
///
/// - **Development**: debug for our crates
/// - **Production**: info for our crates
/// - WebSocket internals stay at info either way
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        "tungstenite=info".to_string(),
        "tokio_tungstenite=info".to_string(),
        format!("uc_app={level}"),
        format!("uc_platform={level}"),
        format!("uc_infra={level}"),
    ]
}

pub fn init_tracing_subscriber(log_file: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives(is_development()).join(",")));

    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(BoxMakeWriter::new(io::stderr));

    let file_layer = match resolve_log_path(log_file).and_then(|path| build_file_writer(&path)) {
        Ok(writer) => Some(
            fmt::layer()
                .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer),
        ),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stderr: {err:#}");
            None
        }
    };

    registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn resolve_log_path(configured: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = configured {
        return Ok(path.to_path_buf());
    }
    let app_dirs = DirsAppDirsAdapter::new().get_app_dirs()?;
    Ok(app_dirs.app_log_root.join(LOG_FILE_NAME))
}

fn build_file_writer(path: &Path) -> anyhow::Result<NonBlocking> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", path.display()))?;
    fs::create_dir_all(dir)?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert!(dev_directives.contains(&"debug".to_string()));
        assert!(dev_directives.contains(&"uc_platform=debug".to_string()));
        assert!(dev_directives.contains(&"tungstenite=info".to_string()));

        let prod_directives = build_filter_directives(false);
        assert!(prod_directives.contains(&"info".to_string()));
        assert!(prod_directives.contains(&"uc_app=info".to_string()));
    }

    #[test]
    fn configured_log_path_wins() {
        let path = resolve_log_path(Some(Path::new("/tmp/custom.log"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.log"));
    }
}
