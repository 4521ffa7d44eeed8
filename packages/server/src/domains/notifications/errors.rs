use thiserror::Error;

use crate::domains::rooms::RoomId;

/// Failures while handling a single room. None of these stop the engine.
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Room {room_id} no longer exists")]
    RoomNotFound { room_id: RoomId },

    #[error("Failed to deliver notification for room {room_id} to {channel_id}: {source}")]
    SendFailure {
        room_id: RoomId,
        channel_id: String,
        #[source]
        source: anyhow::Error,
    },
}
