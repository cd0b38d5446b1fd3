//! In-memory port fakes shared by the engine integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use uc_core::ports::{
    ClipboardError, ClipboardPort, ClockPort, HostEventPort, RelayTransportPort, SyncStorePort,
    TransportError,
};
use uc_core::{
    ClipboardContent, DeviceId, HostEvent, RelayMessage, RoomPin, SessionId, SyncEvent,
    TransportEvent,
};

#[derive(Default)]
pub struct FakeClipboard {
    pub writes: Mutex<Vec<ClipboardContent>>,
}

#[async_trait]
impl ClipboardPort for FakeClipboard {
    async fn read_current(&self) -> Result<Option<ClipboardContent>, ClipboardError> {
        Ok(self.writes.lock().expect("writes lock").last().cloned())
    }

    async fn write_content(&self, content: ClipboardContent) -> Result<(), ClipboardError> {
        self.writes.lock().expect("writes lock").push(content);
        Ok(())
    }
}

/// Transport that "connects" instantly by posting `Opened` back into the loop.
pub struct LoopbackTransport {
    pub events: Mutex<Option<mpsc::Sender<SyncEvent>>>,
    pub sent: Mutex<Vec<RelayMessage>>,
    pub online: Mutex<bool>,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(None),
            sent: Mutex::new(Vec::new()),
            online: Mutex::new(false),
        }
    }

    pub fn attach(&self, events: mpsc::Sender<SyncEvent>) {
        *self.events.lock().expect("events lock") = Some(events);
    }

    pub fn sent(&self) -> Vec<RelayMessage> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl RelayTransportPort for LoopbackTransport {
    async fn open(
        &self,
        session: SessionId,
        _pin: &RoomPin,
        _device_id: &DeviceId,
    ) -> Result<(), TransportError> {
        let sender = self.events.lock().expect("events lock").clone();
        let Some(sender) = sender else {
            return Err(TransportError::NotConnected);
        };
        *self.online.lock().expect("online lock") = true;
        tokio::spawn(async move {
            let _ = sender
                .send(SyncEvent::Transport(TransportEvent::Opened { session }))
                .await;
        });
        Ok(())
    }

    async fn send(&self, message: RelayMessage) -> Result<(), TransportError> {
        if !*self.online.lock().expect("online lock") {
            return Err(TransportError::NotConnected);
        }
        self.sent.lock().expect("sent lock").push(message);
        Ok(())
    }

    async fn close(&self) {
        *self.online.lock().expect("online lock") = false;
    }
}

/// Transport whose connection attempts never complete.
#[derive(Default)]
pub struct DeadTransport {
    pub opens: Mutex<usize>,
}

#[async_trait]
impl RelayTransportPort for DeadTransport {
    async fn open(
        &self,
        _session: SessionId,
        _pin: &RoomPin,
        _device_id: &DeviceId,
    ) -> Result<(), TransportError> {
        *self.opens.lock().expect("opens lock") += 1;
        Ok(())
    }

    async fn send(&self, _message: RelayMessage) -> Result<(), TransportError> {
        Err(TransportError::NotConnected)
    }

    async fn close(&self) {}
}

#[derive(Default)]
pub struct RecordingHost {
    pub events: Mutex<Vec<HostEvent>>,
}

impl RecordingHost {
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().expect("events lock").clone()
    }
}

impl HostEventPort for RecordingHost {
    fn emit(&self, event: HostEvent) {
        self.events.lock().expect("events lock").push(event);
    }
}

pub struct StepClock(AtomicI64);

impl StepClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self(AtomicI64::new(1_700_000_000_000)))
    }
}

impl ClockPort for StepClock {
    fn now_ms(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

pub fn store_for(dir: &std::path::Path, device: &DeviceId) -> Arc<dyn SyncStorePort> {
    Arc::new(uc_infra::FileSyncStore::new(dir, device))
}

/// Store kept in memory; avoids blocking file io in paused-clock tests.
#[derive(Default)]
pub struct MemoryStore {
    pub queue: Mutex<Vec<uc_core::ClipPayload>>,
    pub history: Mutex<Vec<uc_core::ClipboardItem>>,
}

#[async_trait]
impl SyncStorePort for MemoryStore {
    async fn load_queue(&self) -> anyhow::Result<Vec<uc_core::ClipPayload>> {
        Ok(self.queue.lock().expect("queue lock").clone())
    }

    async fn save_queue(&self, entries: &[uc_core::ClipPayload]) -> anyhow::Result<()> {
        *self.queue.lock().expect("queue lock") = entries.to_vec();
        Ok(())
    }

    async fn load_history(&self) -> anyhow::Result<Vec<uc_core::ClipboardItem>> {
        Ok(self.history.lock().expect("history lock").clone())
    }

    async fn save_history(&self, items: &[uc_core::ClipboardItem]) -> anyhow::Result<()> {
        *self.history.lock().expect("history lock") = items.to_vec();
        Ok(())
    }
}
