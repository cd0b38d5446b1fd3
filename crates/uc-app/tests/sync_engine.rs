//! End-to-end engine behaviour with real file persistence.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use tempfile::tempdir;
use tokio::sync::mpsc;
use uc_app::{SyncDeps, SyncEngine, SyncRuntime};
use uc_core::{
    ClipPayload, ClipboardContent, ConnectionState, DeviceId, HostCommand, HostEvent,
    RelayMessage, RoomPin, SyncEvent, TransportEvent,
};

fn text(s: &str) -> ClipboardContent {
    ClipboardContent::text(s)
}

#[tokio::test]
async fn offline_queue_survives_restart() {
    let dir = tempdir().unwrap();
    let device = DeviceId::from("desk");

    let mut engine = SyncEngine::new(
        device.clone(),
        SyncDeps {
            clipboard: Arc::new(FakeClipboard::default()),
            store: store_for(dir.path(), &device),
            transport: Arc::new(DeadTransport::default()),
            host: Arc::new(RecordingHost::default()),
            clock: StepClock::new(),
        },
        50,
    );
    engine.load().await;
    assert_eq!(engine.state(), ConnectionState::Offline);

    for s in ["one", "two", "three"] {
        engine.on_local_change(text(s)).await;
    }
    assert_eq!(engine.queue().len(), 3);
    drop(engine);

    let mut restarted = SyncEngine::new(
        device.clone(),
        SyncDeps {
            clipboard: Arc::new(FakeClipboard::default()),
            store: store_for(dir.path(), &device),
            transport: Arc::new(DeadTransport::default()),
            host: Arc::new(RecordingHost::default()),
            clock: StepClock::new(),
        },
        50,
    );
    restarted.load().await;

    assert_eq!(
        restarted.queue().to_vec(),
        vec![
            ClipPayload::Text("one".into()),
            ClipPayload::Text("two".into()),
            ClipPayload::Text("three".into()),
        ]
    );
    let restored: Vec<String> = restarted
        .history()
        .iter()
        .map(|item| item.content.clone())
        .collect();
    assert_eq!(restored, vec!["three", "two", "one"]);
}

#[tokio::test]
async fn runtime_connects_flushes_and_applies_remote_items() {
    let dir = tempdir().unwrap();
    let device = DeviceId::from("desk");
    let (tx, rx) = mpsc::channel(64);

    let transport = Arc::new(LoopbackTransport::new());
    transport.attach(tx.clone());
    let clipboard = Arc::new(FakeClipboard::default());
    let host = Arc::new(RecordingHost::default());

    let engine = SyncEngine::new(
        device.clone(),
        SyncDeps {
            clipboard: clipboard.clone(),
            store: store_for(dir.path(), &device),
            transport: transport.clone(),
            host: host.clone(),
            clock: StepClock::new(),
        },
        50,
    );
    let runtime = SyncRuntime::new(engine, rx, Duration::from_secs(60));
    let handle = tokio::spawn(runtime.run());

    tx.send(SyncEvent::LocalChange(text("queued while offline")))
        .await
        .unwrap();
    tx.send(SyncEvent::Command(HostCommand::CmdConnect {
        pin: RoomPin::from("1234"),
    }))
    .await
    .unwrap();

    // Let the loopback `Opened` event land before the remote push.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let session = uc_core::SessionId::INITIAL.next();
    tx.send(SyncEvent::Transport(TransportEvent::Received {
        session,
        message: RelayMessage::DeviceNotify(2),
    }))
    .await
    .unwrap();
    tx.send(SyncEvent::Transport(TransportEvent::Received {
        session,
        message: RelayMessage::ClipboardPush(ClipPayload::Text("from phone".into())),
    }))
    .await
    .unwrap();
    tx.send(SyncEvent::LocalChange(text("from phone")))
        .await
        .unwrap();
    tx.send(SyncEvent::Shutdown).await.unwrap();

    let engine = handle.await.unwrap();

    assert_eq!(
        transport.sent(),
        vec![RelayMessage::ClipboardPush(ClipPayload::Text(
            "queued while offline".into()
        ))]
    );
    assert!(engine.queue().is_empty());
    assert_eq!(*clipboard.writes.lock().unwrap(), vec![text("from phone")]);
    assert_eq!(engine.history().len(), 2);
    assert_eq!(engine.devices(), ["2 Device(s) Connected".to_string()]);

    let events = host.events();
    assert_eq!(events.first().map(HostEvent::type_name), Some("CLIPBOARD_HISTORY"));
    assert!(events.contains(&HostEvent::ConnectionState {
        state: ConnectionState::Online,
        error: None,
    }));
}

#[tokio::test(start_paused = true)]
async fn runtime_retries_connect_on_reconnect_tick() {
    let device = DeviceId::from("desk");
    let (tx, rx) = mpsc::channel(16);
    let transport = Arc::new(DeadTransport::default());

    let engine = SyncEngine::new(
        device.clone(),
        SyncDeps {
            clipboard: Arc::new(FakeClipboard::default()),
            store: Arc::new(MemoryStore::default()),
            transport: transport.clone(),
            host: Arc::new(RecordingHost::default()),
            clock: StepClock::new(),
        },
        50,
    );
    let runtime = SyncRuntime::new(engine, rx, Duration::from_secs(5))
        .with_initial_pin(Some(RoomPin::from("1234")));
    let handle = tokio::spawn(runtime.run());

    // First attempt fails to open.
    tokio::time::sleep(Duration::from_millis(10)).await;
    tx.send(SyncEvent::Transport(TransportEvent::Closed {
        session: uc_core::SessionId::INITIAL.next(),
        reason: Some("connection refused".into()),
    }))
    .await
    .unwrap();

    tokio::time::sleep(Duration::from_secs(6)).await;
    tx.send(SyncEvent::Shutdown).await.unwrap();
    let engine = handle.await.unwrap();

    assert_eq!(*transport.opens.lock().unwrap(), 2);
    assert_eq!(engine.state(), ConnectionState::Offline);
}

#[tokio::test]
async fn request_state_replays_everything() {
    let dir = tempdir().unwrap();
    let device = DeviceId::from("desk");
    let (tx, rx) = mpsc::channel(16);
    let host = Arc::new(RecordingHost::default());

    let engine = SyncEngine::new(
        device.clone(),
        SyncDeps {
            clipboard: Arc::new(FakeClipboard::default()),
            store: store_for(dir.path(), &device),
            transport: Arc::new(DeadTransport::default()),
            host: host.clone(),
            clock: StepClock::new(),
        },
        50,
    );
    let handle = tokio::spawn(SyncRuntime::new(engine, rx, Duration::from_secs(60)).run());

    tx.send(SyncEvent::Command(HostCommand::RequestState))
        .await
        .unwrap();
    drop(tx);
    handle.await.unwrap();

    let names: Vec<&str> = host.events().iter().map(HostEvent::type_name).collect();
    assert_eq!(
        names,
        vec![
            "CLIPBOARD_HISTORY",
            "CLIPBOARD_HISTORY",
            "DEVICE_LIST",
            "CONNECTION_STATE"
        ]
    );
}
