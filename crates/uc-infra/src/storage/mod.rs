mod file_sync_store;

pub use file_sync_store::FileSyncStore;
