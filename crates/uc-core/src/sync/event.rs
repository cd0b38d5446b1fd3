//! Inputs of the device-side reconciliation loop.
//!
//! Every producer (clipboard watcher, relay transport, connectivity monitor,
//! host shell reader, timers) sends a [`SyncEvent`] into one channel, and a
//! single loop applies them to the engine in arrival order.
use crate::clipboard::ClipboardContent;
use crate::host::HostCommand;
use crate::network::{ReachabilityChange, TransportEvent};

#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// 本地剪切板内容变化
    LocalChange(ClipboardContent),
    /// 中继连接事件
    Transport(TransportEvent),
    /// 网络可达性边沿
    Reachability(ReachabilityChange),
    /// 宿主命令
    Command(HostCommand),
    /// 停止事件循环
    Shutdown,
}

impl From<TransportEvent> for SyncEvent {
    fn from(event: TransportEvent) -> Self {
        Self::Transport(event)
    }
}

impl From<ReachabilityChange> for SyncEvent {
    fn from(change: ReachabilityChange) -> Self {
        Self::Reachability(change)
    }
}

impl From<HostCommand> for SyncEvent {
    fn from(command: HostCommand) -> Self {
        Self::Command(command)
    }
}
