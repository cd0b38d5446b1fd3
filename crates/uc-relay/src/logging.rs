//! Tracing initialisation for the relay binary.
//!
//! ## Behavior / 行为
//!
//! - Respects `RUST_LOG`; otherwise debug in debug builds, info in release
//! - Always logs to stdout
//! - Optionally mirrors to a non-blocking log file (`[logging] file`)

use std::path::Path;
use std::{fs, io, sync::OnceLock};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        if is_dev { "debug" } else { "info" }.to_string(),
        "tungstenite=info".to_string(),
        "tokio_tungstenite=info".to_string(),
        if is_dev { "uc_relay=debug" } else { "uc_relay=info" }.to_string(),
    ]
}

pub fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives(cfg!(debug_assertions)).join(",")));

    let stdout_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(BoxMakeWriter::new(io::stdout));

    let file_layer = match log_file.map(build_file_writer).transpose() {
        Ok(writer) => writer.map(|writer| {
            fmt::layer()
                .with_timer(fmt::time::ChronoUtc::new(TIME_FORMAT.to_string()))
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer)
        }),
        Err(err) => {
            eprintln!("Failed to initialize file logging, falling back to stdout: {err:#}");
            None
        }
    };

    registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;
    Ok(())
}

fn build_file_writer(path: &Path) -> anyhow::Result<NonBlocking> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let (non_blocking, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;
    Ok(non_blocking)
}
