use serde::{Deserialize, Serialize};

use crate::domains::rooms::models::RoomId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipEventKind {
    Join,
    Leave,
}

/// A participant joined or left a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipEvent {
    #[serde(rename = "type")]
    pub kind: MembershipEventKind,
    pub room_id: RoomId,
    /// Participant count right after this change, when the emitter knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<usize>,
}

impl MembershipEvent {
    pub fn join(room_id: impl Into<RoomId>) -> Self {
        Self {
            kind: MembershipEventKind::Join,
            room_id: room_id.into(),
            participant_count: None,
        }
    }

    pub fn leave(room_id: impl Into<RoomId>) -> Self {
        Self {
            kind: MembershipEventKind::Leave,
            room_id: room_id.into(),
            participant_count: None,
        }
    }

    pub fn with_participant_count(mut self, count: usize) -> Self {
        self.participant_count = Some(count);
        self
    }
}
