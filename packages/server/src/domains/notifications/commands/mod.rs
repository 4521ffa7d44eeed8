use crate::domains::rooms::RoomId;

/// Notification domain commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationCommand {
    /// Announce that a room has people in it
    AnnounceOccupied { room_id: RoomId, channel_id: String },
    /// Announce that the last person left a room
    AnnounceEmpty { room_id: RoomId, channel_id: String },
}

impl NotificationCommand {
    pub fn room_id(&self) -> &RoomId {
        match self {
            Self::AnnounceOccupied { room_id, .. } | Self::AnnounceEmpty { room_id, .. } => room_id,
        }
    }

    pub fn channel_id(&self) -> &str {
        match self {
            Self::AnnounceOccupied { channel_id, .. } | Self::AnnounceEmpty { channel_id, .. } => {
                channel_id
            }
        }
    }
}
