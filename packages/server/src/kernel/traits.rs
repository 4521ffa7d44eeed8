// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Notification rules live in domains/notifications and only talk to these traits.
//
// Naming convention: Base* for trait names (e.g., BaseMessenger, BaseClock)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use crate::domains::notifications::DisplayBlock;
use crate::domains::rooms::{MembershipEvent, Room, RoomError, RoomId};

// =============================================================================
// Room Registry Trait (Source of truth for rooms and participants)
// =============================================================================

#[async_trait]
pub trait BaseRoomRegistry: Send + Sync {
    /// Point-in-time snapshot of every room
    async fn get_all_rooms(&self) -> Result<Vec<Room>>;

    /// Current state of one room, or `RoomError::NotFound` if it no longer exists
    async fn get_room_with_participants(&self, room_id: &RoomId) -> Result<Room, RoomError>;

    /// Receive membership events emitted after this call.
    /// Events for the same room arrive in the order they happened.
    fn subscribe(&self) -> broadcast::Receiver<MembershipEvent>;
}

// =============================================================================
// Messenger Trait (Infrastructure - chat delivery)
// =============================================================================

/// Delivery receipt returned by the messaging endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Endpoint-assigned message id (Slack: the message `ts`)
    pub id: String,
    pub channel_id: String,
}

#[async_trait]
pub trait BaseMessenger: Send + Sync {
    /// Post a message made of `blocks` to a channel
    async fn send(&self, channel_id: &str, blocks: &[DisplayBlock]) -> Result<Receipt>;
}

// =============================================================================
// Clock Trait (Infrastructure - time source)
// =============================================================================

pub trait BaseClock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
