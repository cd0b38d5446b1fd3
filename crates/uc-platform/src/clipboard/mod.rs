mod system_clipboard;
pub mod watcher;

pub use system_clipboard::SystemClipboard;
pub use watcher::ClipboardWatcher;
