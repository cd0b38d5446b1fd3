//! File Sync Store Tests
//! 文件存储测试：验证磁盘格式与跨实例持久化

use chrono::{TimeZone, Utc};
use uc_core::ports::SyncStorePort;
use uc_core::{ClipPayload, ClipboardContent, ClipboardItem, DeviceId, ItemId};
use uc_infra::FileSyncStore;

#[tokio::test]
async fn documents_use_the_wire_shapes_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSyncStore::new(dir.path(), &DeviceId::from("laptop"));
    let created_at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

    store
        .save_queue(&[
            ClipPayload::Text("queued".into()),
            ClipPayload::from_content(&ClipboardContent::image(vec![1, 2, 3])),
        ])
        .await
        .unwrap();
    store
        .save_history(&[ClipboardItem::new(
            ItemId::new(1_700_000_000_000),
            &ClipboardContent::text("hello"),
            created_at,
        )])
        .await
        .unwrap();

    let queue: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.queue_path()).unwrap()).unwrap();
    assert_eq!(
        queue,
        serde_json::json!(["queued", {"kind": "image", "data": "AQID"}])
    );

    let history: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.history_path()).unwrap()).unwrap();
    assert_eq!(history[0]["id"], 1_700_000_000_000i64);
    assert_eq!(history[0]["kind"], "text");
    assert_eq!(history[0]["content"], "hello");
    assert!(history[0]["createdAt"].is_string());
}

#[tokio::test]
async fn a_fresh_store_instance_sees_what_the_last_one_wrote() {
    let dir = tempfile::tempdir().unwrap();
    let device = DeviceId::from("desk");
    let queue = vec![
        ClipPayload::Text("one".into()),
        ClipPayload::Text("two".into()),
        ClipPayload::Text("three".into()),
    ];

    FileSyncStore::new(dir.path(), &device)
        .save_queue(&queue)
        .await
        .unwrap();

    let reopened = FileSyncStore::new(dir.path(), &device);
    assert_eq!(reopened.load_queue().await.unwrap(), queue);
    assert!(reopened.load_history().await.unwrap().is_empty());
}

#[tokio::test]
async fn devices_sharing_a_directory_do_not_see_each_other() {
    let dir = tempfile::tempdir().unwrap();
    let laptop = FileSyncStore::new(dir.path(), &DeviceId::from("laptop"));
    let desk = FileSyncStore::new(dir.path(), &DeviceId::from("desk"));

    laptop
        .save_queue(&[ClipPayload::Text("mine".into())])
        .await
        .unwrap();

    assert!(desk.load_queue().await.unwrap().is_empty());
    assert_ne!(laptop.queue_path(), desk.queue_path());
}
