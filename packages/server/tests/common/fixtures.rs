//! Test fixtures for rooms and participants.

use notifier_core::domains::rooms::{NotificationConfig, Participant, Room};
use std::time::Duration;

pub const LOBBY: &str = "lobby";
pub const LOBBY_CHANNEL: &str = "C-LOBBY";

/// A room with notifications enabled and nobody in it
pub fn notified_room(id: &str, channel_id: &str) -> Room {
    Room::new(id, capitalize(id), format!("https://meet.example.org/{}", id))
        .with_notification(NotificationConfig::new(channel_id))
}

/// Same, but with its own minimum interval
pub fn notified_room_with_interval(id: &str, channel_id: &str, interval: Duration) -> Room {
    Room::new(id, capitalize(id), format!("https://meet.example.org/{}", id))
        .with_notification(NotificationConfig::new(channel_id).with_interval(interval))
}

/// A room that never notifies
pub fn silent_room(id: &str) -> Room {
    Room::new(id, capitalize(id), format!("https://meet.example.org/{}", id))
}

pub fn participant(id: &str) -> Participant {
    Participant::new(id, format!("user-{}", id))
}

pub fn participant_with_avatar(id: &str) -> Participant {
    participant(id).with_image_url(format!("https://img.example.org/{}.png", id))
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
