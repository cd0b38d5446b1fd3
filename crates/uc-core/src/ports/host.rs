use crate::host::HostEvent;

/// Outbound channel to the host shell.
///
/// Emitting is fire-and-forget: a missing or slow shell must not affect sync.
pub trait HostEventPort: Send + Sync {
    fn emit(&self, event: HostEvent);
}
