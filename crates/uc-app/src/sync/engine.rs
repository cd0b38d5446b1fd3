//! Device-side sync engine.
//!
//! The engine is the single authority over this device's clipboard history
//! and offline queue. It decides, per item, whether to send, queue, apply
//! locally, or drop as a duplicate/echo.
//!
//! All methods take `&mut self` and are driven by one loop
//! ([`SyncRuntime`](super::SyncRuntime)), so history and queue mutations never
//! interleave. Side effects go through the ports in [`SyncDeps`].
//!
//! 同步引擎：本设备剪切板历史与离线队列的唯一权威。

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uc_core::ports::ClipboardError;
use uc_core::{
    ClipPayload, ClipboardContent, ClipboardHistory, ClipboardItem, ConnectionState, DeviceId,
    EchoGuard, HostCommand, HostEvent, OfflineQueue, ReachabilityChange, RelayMessage,
    RestoreContent, RoomPin, SessionId, SyncEvent, TransportEvent,
};

use crate::deps::SyncDeps;

pub struct SyncEngine {
    device_id: DeviceId,
    deps: SyncDeps,
    history: ClipboardHistory,
    queue: OfflineQueue,
    state: ConnectionState,
    echo_guard: EchoGuard,
    devices: Vec<String>,
    pin: Option<RoomPin>,
    session: SessionId,
}

impl SyncEngine {
    pub fn new(device_id: DeviceId, deps: SyncDeps, history_limit: usize) -> Self {
        Self {
            device_id,
            deps,
            history: ClipboardHistory::new(history_limit),
            queue: OfflineQueue::new(),
            state: ConnectionState::Offline,
            echo_guard: EchoGuard::new(),
            devices: Vec::new(),
            pin: None,
            session: SessionId::INITIAL,
        }
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn history(&self) -> &ClipboardHistory {
        &self.history
    }

    pub fn queue(&self) -> &OfflineQueue {
        &self.queue
    }

    pub fn devices(&self) -> &[String] {
        &self.devices
    }

    pub fn pin(&self) -> Option<&RoomPin> {
        self.pin.as_ref()
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Load persisted queue and history, then publish the history.
    ///
    /// Store failures are logged and the engine starts empty.
    pub async fn load(&mut self) {
        match self.deps.store.load_queue().await {
            Ok(entries) => {
                info!(count = entries.len(), "loaded offline queue");
                self.queue = OfflineQueue::from_entries(entries);
            }
            Err(e) => warn!(error = %e, "failed to load offline queue, starting empty"),
        }

        match self.deps.store.load_history().await {
            Ok(items) => {
                info!(count = items.len(), "loaded clipboard history");
                self.history = ClipboardHistory::from_items(items, self.history.limit());
            }
            Err(e) => warn!(error = %e, "failed to load clipboard history, starting empty"),
        }

        self.emit_history();
    }

    /// Apply one event from the reconciliation loop.
    pub async fn handle(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::LocalChange(content) => self.on_local_change(content).await,
            SyncEvent::Transport(event) => self.on_transport_event(event).await,
            SyncEvent::Reachability(change) => self.on_reachability(change).await,
            SyncEvent::Command(command) => self.handle_command(command).await,
            SyncEvent::Shutdown => {}
        }
    }

    pub async fn handle_command(&mut self, command: HostCommand) {
        match command {
            HostCommand::CmdConnect { pin } => self.connect(pin).await,
            HostCommand::RestoreClipboard { content } => self.restore(content).await,
            HostCommand::ClearHistory => self.clear_history().await,
            HostCommand::RequestState => self.request_state(),
        }
    }

    /// A change observed on the local clipboard.
    pub async fn on_local_change(&mut self, content: ClipboardContent) {
        let span = info_span!(
            "engine.on_local_change",
            kind = content.kind().as_str(),
            size = content.size_bytes(),
        );

        async move {
            if content.is_empty() {
                return;
            }

            if self.echo_guard.consume(&content) {
                debug!("swallowed echo of our own clipboard write");
                return;
            }

            if self.history.head_matches(&content) {
                debug!("local change equals history head, skipping");
                return;
            }

            info!(preview = %content.preview(), "local clipboard change");
            self.append_to_history(&content).await;

            let payload = ClipPayload::from_content(&content);
            if !self.state.is_online() {
                debug!(state = ?self.state, "not online, queuing item");
                self.enqueue(payload).await;
                return;
            }

            if let Err(e) = self
                .deps
                .transport
                .send(RelayMessage::ClipboardPush(payload.clone()))
                .await
            {
                warn!(error = %e, "push failed, queuing item");
                self.enqueue(payload).await;
            }
        }
        .instrument(span)
        .await
    }

    /// A `CLIPBOARD_PUSH` delivered by the relay.
    pub async fn on_remote_item(&mut self, payload: ClipPayload) {
        let span = info_span!("engine.on_remote_item", kind = payload.kind().as_str());

        async move {
            let content = match payload.to_content() {
                Ok(content) => content,
                Err(e) => {
                    warn!(error = %e, "dropping undecodable remote item");
                    return;
                }
            };

            if self.history.head_matches(&content) {
                debug!("remote item equals history head, dropping");
                return;
            }

            if self.apply_to_clipboard(content.clone()).await.is_err() {
                return;
            }

            info!(preview = %content.preview(), "applied remote item");
            self.append_to_history(&content).await;
        }
        .instrument(span)
        .await
    }

    /// A `HISTORY_BATCH` replayed by the relay after joining.
    ///
    /// Items are merged oldest first; anything already present anywhere in
    /// the history is skipped. The clipboard itself is not touched.
    pub async fn on_history_batch(&mut self, payloads: Vec<ClipPayload>) {
        let received = payloads.len();
        let mut added = 0usize;

        for payload in payloads {
            let content = match payload.to_content() {
                Ok(content) => content,
                Err(e) => {
                    warn!(error = %e, "skipping undecodable batch entry");
                    continue;
                }
            };
            if self.history.contains(&content) {
                continue;
            }
            self.push_item(&content);
            added += 1;
        }

        info!(received, added, "merged history batch");
        if added > 0 {
            self.persist_history().await;
            self.emit_history();
            self.emit_devices();
        }
    }

    pub fn on_device_count(&mut self, count: usize) {
        info!(count, "room member count changed");
        self.devices = vec![format!("{count} Device(s) Connected")];
        self.emit_devices();
        self.emit_history();
    }

    /// Join the room `pin`. No-op while a session is pending or open.
    pub async fn connect(&mut self, pin: RoomPin) {
        if !pin.is_valid() {
            error!("connect requested without a pairing code");
            self.emit_state(Some("missing pairing code".to_string()));
            return;
        }

        let Some(next) = self.state.start_connecting() else {
            debug!(state = ?self.state, pin = %pin, "connect ignored, session already active");
            return;
        };

        self.state = next;
        self.session = self.session.next();
        self.pin = Some(pin.clone());
        info!(pin = %pin, session = %self.session, "connecting to relay");
        self.emit_state(None);

        if let Err(e) = self
            .deps
            .transport
            .open(self.session, &pin, &self.device_id)
            .await
        {
            warn!(error = %e, session = %self.session, "failed to start relay session");
            self.state = self.state.on_closed();
            self.emit_state(Some(e.to_string()));
        }
    }

    pub async fn on_transport_event(&mut self, event: TransportEvent) {
        if event.session() != self.session {
            debug!(
                event_session = %event.session(),
                current = %self.session,
                "ignoring event from superseded session"
            );
            return;
        }

        match event {
            TransportEvent::Opened { .. } => {
                self.state = self.state.on_opened();
                info!(session = %self.session, "relay session online");
                self.emit_state(None);
                self.flush_queue().await;
            }
            TransportEvent::Closed { reason, .. } => {
                self.state = self.state.on_closed();
                info!(session = %self.session, reason = ?reason, "relay session offline");
                self.emit_state(reason);
            }
            TransportEvent::Received { message, .. } => match message {
                RelayMessage::ClipboardPush(payload) => self.on_remote_item(payload).await,
                RelayMessage::HistoryBatch(payloads) => self.on_history_batch(payloads).await,
                RelayMessage::DeviceNotify(count) => self.on_device_count(count),
                other => debug!(kind = other.type_name(), "ignoring unexpected relay frame"),
            },
        }
    }

    /// Edge reported by the connectivity monitor.
    pub async fn on_reachability(&mut self, change: ReachabilityChange) {
        match change {
            ReachabilityChange::Online => {
                info!(state = ?self.state, "network reachable");
                if !self.state.is_active() {
                    self.reconnect().await;
                    self.flush_queue().await;
                }
            }
            ReachabilityChange::Offline => {
                info!(state = ?self.state, "network unreachable");
            }
        }
    }

    /// Periodic reconnect nudge while offline.
    pub async fn on_reconnect_tick(&mut self) {
        if self.state == ConnectionState::Offline {
            self.reconnect().await;
        }
    }

    async fn reconnect(&mut self) {
        if let Some(pin) = self.pin.clone() {
            debug!(pin = %pin, "re-issuing connect");
            self.connect(pin).await;
        }
    }

    /// Send every queued entry in FIFO order.
    ///
    /// The queue is drained up front, so a second call right after a
    /// successful flush finds it empty and does nothing. On the first failed
    /// send the rest is put back in original order for the next trigger.
    /// Returns the number of entries sent.
    pub async fn flush_queue(&mut self) -> usize {
        if self.queue.is_empty() {
            return 0;
        }
        if !self.state.is_online() {
            debug!(queued = self.queue.len(), state = ?self.state, "not online, flush deferred");
            return 0;
        }

        let pending = self.queue.take_all();
        let total = pending.len();
        let mut sent = 0usize;
        let mut remaining = pending.into_iter();

        while let Some(payload) = remaining.next() {
            match self
                .deps
                .transport
                .send(RelayMessage::ClipboardPush(payload.clone()))
                .await
            {
                Ok(()) => sent += 1,
                Err(e) => {
                    warn!(error = %e, sent, total, "flush interrupted");
                    let mut failed = vec![payload];
                    failed.extend(remaining.by_ref());
                    self.queue.requeue_front(failed);
                    break;
                }
            }
        }

        if self.queue.is_empty() {
            info!(sent, "offline queue flushed");
        } else {
            info!(sent, still_queued = self.queue.len(), "offline queue partially flushed");
        }
        self.persist_queue().await;
        sent
    }

    /// Put a historical item back on the clipboard. History is unchanged.
    pub async fn restore(&mut self, content: RestoreContent) {
        let content = match content.to_content() {
            Ok(content) => content,
            Err(e) => {
                warn!(error = %e, "cannot restore item");
                return;
            }
        };

        info!(preview = %content.preview(), "restoring clipboard item");
        let _ = self.apply_to_clipboard(content).await;
    }

    pub async fn clear_history(&mut self) {
        info!(count = self.history.len(), "clearing history");
        self.history.clear();
        self.persist_history().await;
        self.emit_history();
        self.emit_devices();

        if self.state.is_online() {
            if let Err(e) = self.deps.transport.send(RelayMessage::ClearHistory).await {
                warn!(error = %e, "failed to ask relay to clear room history");
            }
        }
    }

    /// Drop the relay session before the process exits.
    pub async fn shutdown(&mut self) {
        self.deps.transport.close().await;
        self.state = self.state.on_closed();
    }

    pub fn request_state(&self) {
        self.emit_history();
        self.emit_devices();
        self.emit_state(None);
    }

    /// Write to the OS clipboard behind the echo guard.
    async fn apply_to_clipboard(&mut self, content: ClipboardContent) -> Result<(), ClipboardError> {
        self.echo_guard.arm(content.clone());
        match self.deps.clipboard.write_content(content).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.echo_guard.disarm();
                warn!(error = %e, "clipboard write failed");
                Err(e)
            }
        }
    }

    async fn append_to_history(&mut self, content: &ClipboardContent) {
        self.push_item(content);
        self.persist_history().await;
        self.emit_history();
        self.emit_devices();
    }

    fn push_item(&mut self, content: &ClipboardContent) {
        let now_ms = self.deps.clock.now_ms();
        let id = self.history.next_id(now_ms);
        let created_at = DateTime::<Utc>::from_timestamp_millis(now_ms).unwrap_or_else(Utc::now);
        if let Some(evicted) = self
            .history
            .push_front(ClipboardItem::new(id, content, created_at))
        {
            debug!(evicted = %evicted.id, "history full, evicted oldest item");
        }
    }

    async fn enqueue(&mut self, payload: ClipPayload) {
        self.queue.push(payload);
        self.persist_queue().await;
    }

    async fn persist_history(&self) {
        if let Err(e) = self.deps.store.save_history(&self.history.to_vec()).await {
            warn!(error = %e, "failed to persist history");
        }
    }

    async fn persist_queue(&self) {
        if let Err(e) = self.deps.store.save_queue(&self.queue.to_vec()).await {
            warn!(error = %e, "failed to persist offline queue");
        }
    }

    fn emit_history(&self) {
        self.deps.host.emit(HostEvent::ClipboardHistory {
            history: self.history.to_vec(),
        });
    }

    fn emit_devices(&self) {
        self.deps.host.emit(HostEvent::DeviceList {
            devices: self.devices.clone(),
        });
    }

    fn emit_state(&self, error: Option<String>) {
        self.deps.host.emit(HostEvent::ConnectionState {
            state: self.state,
            error,
        });
    }
}
