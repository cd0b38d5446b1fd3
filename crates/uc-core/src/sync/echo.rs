//! Echo suppression for clipboard writes made by the engine itself.
//!
//! When the engine writes remote (or restored) content to the system
//! clipboard, the clipboard watcher will observe that write as an ordinary
//! local change. Without context it would be re-added to history and pushed
//! back to the room.
//!
//! ## Semantics
//!
//! - The guard is **armed before** the write with the exact content written
//! - The **first** local change after arming clears the guard (one-shot)
//! - That change is swallowed only when it equals the armed content
//! - Arming again replaces the previous marker
//!
//! The write may produce no change at all when the clipboard already holds
//! the content, so the guard never outlives the next observed change. An
//! echo overtaken by an unrelated change is left to history head dedup.
use crate::clipboard::ClipboardContent;

#[derive(Debug, Default)]
pub struct EchoGuard {
    pending: Option<ClipboardContent>,
}

impl EchoGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the upcoming clipboard change with `content` as self-inflicted.
    ///
    /// **Must be called before writing to the clipboard**, otherwise a fast
    /// watcher may observe the write first.
    pub fn arm(&mut self, content: ClipboardContent) {
        self.pending = Some(content);
    }

    /// Forget the marker, e.g. because the write it announced failed.
    pub fn disarm(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Clears the marker and returns `true` when `observed` is its echo.
    pub fn consume(&mut self, observed: &ClipboardContent) -> bool {
        self.pending.take().as_ref() == Some(observed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn armed_content_is_consumed_once() {
        let mut guard = EchoGuard::new();
        guard.arm(ClipboardContent::text("remote"));

        assert!(guard.consume(&ClipboardContent::text("remote")));
        assert!(!guard.consume(&ClipboardContent::text("remote")));
        assert!(!guard.is_armed());
    }

    #[test]
    fn different_content_passes_and_clears_guard() {
        let mut guard = EchoGuard::new();
        guard.arm(ClipboardContent::text("remote"));

        assert!(!guard.consume(&ClipboardContent::text("user edit")));
        assert!(!guard.is_armed());
        assert!(!guard.consume(&ClipboardContent::text("remote")));
    }

    #[test]
    fn disarm_clears_marker() {
        let mut guard = EchoGuard::new();
        guard.arm(ClipboardContent::image(vec![1]));
        guard.disarm();

        assert!(!guard.consume(&ClipboardContent::image(vec![1])));
    }
}
