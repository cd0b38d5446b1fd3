//! Relay transport port
//!
//! 中继连接抽象：一次 `open` 对应一个 session，所有事件都带 session 标记，
//! 由引擎丢弃过期 session 的事件。

use async_trait::async_trait;

use super::errors::TransportError;
use crate::ids::{DeviceId, RoomPin, SessionId};
use crate::network::RelayMessage;

#[async_trait]
pub trait RelayTransportPort: Send + Sync {
    /// Start opening a connection for `session`.
    ///
    /// Returns once the attempt is underway. Progress is reported through
    /// `TransportEvent`s tagged with `session`: `Opened` after the socket is
    /// up and `JOIN_ROOM` was sent, `Closed` on failure or disconnect.
    /// Any previous connection is dropped; its late events carry the old session.
    async fn open(
        &self,
        session: SessionId,
        pin: &RoomPin,
        device_id: &DeviceId,
    ) -> Result<(), TransportError>;

    /// Send one frame on the current connection.
    ///
    /// `Ok` means the frame was handed to the socket. Any error means it was not
    /// sent and the caller still owns the payload.
    async fn send(&self, message: RelayMessage) -> Result<(), TransportError>;

    /// Drop the current connection, if any.
    async fn close(&self);
}
