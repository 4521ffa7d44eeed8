//! Decision layer for room notifications.
//!
//! Everything here is synchronous and free of IO: given room state (and, for
//! the sweep, the room's last dispatch time), decide whether a notification
//! command should be issued.

use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::debug;

use crate::domains::notifications::commands::NotificationCommand;
use crate::domains::rooms::{MembershipEvent, MembershipEventKind, NotificationConfig, Room};

/// Whether enough time has passed since `last_notified` to notify again.
///
/// Strictly greater than: at exactly `interval` elapsed the room is not yet due.
/// A last-notified time in the future (clock moved backwards) is never due.
pub fn is_due(last_notified: Option<DateTime<Utc>>, now: DateTime<Utc>, interval: Duration) -> bool {
    let Some(last) = last_notified else {
        return true;
    };
    match (now - last).to_std() {
        Ok(elapsed) => elapsed > interval,
        Err(_) => false,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NotificationMachine {
    default_min_interval: Duration,
}

impl NotificationMachine {
    pub fn new(default_min_interval: Duration) -> Self {
        Self {
            default_min_interval,
        }
    }

    pub fn effective_interval(&self, config: &NotificationConfig) -> Duration {
        config
            .notification_interval
            .unwrap_or(self.default_min_interval)
    }

    /// React to a join/leave.
    ///
    /// Only 0↔1 transitions produce a command, and they bypass the throttle.
    /// The count carried by the event wins over the room's current count.
    pub fn decide_membership(
        &self,
        event: &MembershipEvent,
        room: &Room,
    ) -> Option<NotificationCommand> {
        let config = room.notification.as_ref()?;
        let count = event
            .participant_count
            .unwrap_or_else(|| room.participant_count());

        match (event.kind, count) {
            (MembershipEventKind::Join, 1) => Some(NotificationCommand::AnnounceOccupied {
                room_id: room.id.clone(),
                channel_id: config.channel_id.clone(),
            }),
            (MembershipEventKind::Leave, 0) => Some(NotificationCommand::AnnounceEmpty {
                room_id: room.id.clone(),
                channel_id: config.channel_id.clone(),
            }),
            _ => {
                debug!(
                    room_id = %room.id,
                    kind = ?event.kind,
                    count,
                    "Not an occupancy transition, leaving it to the sweep"
                );
                None
            }
        }
    }

    /// Periodic re-announcement for rooms that stay occupied.
    pub fn decide_sweep(
        &self,
        room: &Room,
        last_notified: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Option<NotificationCommand> {
        let config = room.notification.as_ref()?;
        if !room.is_occupied() {
            return None;
        }
        if !is_due(last_notified, now, self.effective_interval(config)) {
            return None;
        }

        Some(NotificationCommand::AnnounceOccupied {
            room_id: room.id.clone(),
            channel_id: config.channel_id.clone(),
        })
    }
}
