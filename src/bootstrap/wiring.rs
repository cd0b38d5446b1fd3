//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (file store, clock) / 创建 infra 层具体实现
//! - ✅ Create platform implementations (clipboard, relay, probe) / 创建 platform 层具体实现
//! - ✅ Feed every producer into one engine event channel / 所有事件源汇入同一通道
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No sync logic / 禁止包含同步逻辑**
//! - Queueing, dedup and echo handling belong to `SyncEngine`
//! - 排队、去重、回声处理都属于 `SyncEngine`
//!
//! > **This is the only place allowed to depend on uc-infra + uc-platform + uc-app simultaneously.**
//! > **这是唯一允许同时依赖 uc-infra、uc-platform 和 uc-app 的地方。**

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uc_app::{
    resolve_device_id, ConnectivityMonitor, EngineSettings, SyncDeps, SyncEngine, SyncRuntime,
    EVENT_CHANNEL_CAPACITY,
};
use uc_core::{DeviceConfig, RoomPin, SyncEvent};
use uc_infra::{FileSyncStore, SystemClock};
use uc_platform::identity::hostname;
use uc_platform::{
    ClipboardWatcher, DirsAppDirsAdapter, SystemClipboard, TcpReachabilityProbe, WsRelayTransport,
};

use crate::host::{spawn_command_reader, spawn_event_writer};

const EVENT_WRITER_DRAIN: Duration = Duration::from_secs(1);

/// Data directory: configured value, else the per-user app data root.
fn resolve_data_dir(config: &DeviceConfig) -> anyhow::Result<PathBuf> {
    if let Some(dir) = config.data_dir.as_ref().filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir.clone());
    }
    let app_dirs = DirsAppDirsAdapter::new()
        .get_app_dirs()
        .context("failed to resolve app data directory")?;
    Ok(app_dirs.app_data_root)
}

/// Assemble the device process and run it until shutdown.
///
/// # Errors / 错误
///
/// Fatal startup errors only: no resolvable device identity, no data
/// directory, or no clipboard access. Everything after startup is absorbed
/// by the engine.
pub async fn run_device(config: DeviceConfig) -> anyhow::Result<()> {
    let settings = EngineSettings::from_config(&config);
    let env_device_id = std::env::var("DEVICE_ID").ok();
    let host_name = hostname();
    let device_id = resolve_device_id(
        config.device_id.as_deref(),
        env_device_id.as_deref(),
        host_name.as_deref(),
    )?;
    let data_dir = resolve_data_dir(&config)?;
    info!(
        device_id = %device_id,
        relay_url = %settings.relay_url,
        data_dir = %data_dir.display(),
        "starting clipsync"
    );

    let (tx, rx) = mpsc::channel::<SyncEvent>(EVENT_CHANNEL_CAPACITY);

    let clipboard = Arc::new(
        SystemClipboard::new(settings.clipboard_timeout)
            .context("failed to start clipboard worker")?,
    );
    let transport = Arc::new(WsRelayTransport::new(
        settings.relay_url.clone(),
        settings.connect_timeout,
        settings.send_timeout,
        tx.clone(),
    ));
    let (host, event_writer) = spawn_event_writer(tokio::io::stdout());

    let deps = SyncDeps {
        clipboard: clipboard.clone(),
        store: Arc::new(FileSyncStore::new(&data_dir, &device_id)),
        transport,
        host: Arc::new(host),
        clock: Arc::new(SystemClock),
    };
    let engine = SyncEngine::new(device_id, deps, settings.history_limit);

    let watcher = ClipboardWatcher::new(clipboard, settings.poll_interval).spawn(tx.clone());
    let probe = TcpReachabilityProbe::new(settings.probe_targets.clone(), settings.probe_timeout);
    let monitor =
        ConnectivityMonitor::new(Arc::new(probe), settings.probe_interval).spawn(tx.clone());
    let commands = spawn_command_reader(BufReader::new(tokio::io::stdin()), tx.clone());
    let ctrl_c = {
        let tx = tx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("ctrl-c received");
                let _ = tx.send(SyncEvent::Shutdown).await;
            }
        })
    };
    drop(tx);

    let engine = SyncRuntime::new(engine, rx, settings.reconnect_interval)
        .with_initial_pin(config.pin.map(RoomPin::from))
        .run()
        .await;

    for task in [watcher, monitor, commands, ctrl_c] {
        task.abort();
    }
    // The engine owns the last event sink; dropping it lets the writer drain and exit.
    drop(engine);
    if tokio::time::timeout(EVENT_WRITER_DRAIN, event_writer)
        .await
        .is_err()
    {
        warn!("host event writer did not drain in time");
    }
    Ok(())
}
