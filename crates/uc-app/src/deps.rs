//! # Engine Dependencies / 引擎依赖
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! **这不是 Builder 模式。**
//! - No default values / 无默认值
//! - Just parameter grouping / 仅用于参数打包

use std::sync::Arc;
use uc_core::ports::*;

/// Ports the sync engine talks to
/// 同步引擎依赖的端口
pub struct SyncDeps {
    // Clipboard / 剪贴板
    pub clipboard: Arc<dyn ClipboardPort>,

    // Persistence / 持久化
    pub store: Arc<dyn SyncStorePort>,

    // Relay / 中继
    pub transport: Arc<dyn RelayTransportPort>,

    // Host shell / 宿主
    pub host: Arc<dyn HostEventPort>,

    // System / 系统
    pub clock: Arc<dyn ClockPort>,
}
