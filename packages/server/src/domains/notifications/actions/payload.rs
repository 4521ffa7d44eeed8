//! Message payloads for room announcements.

use crate::domains::notifications::commands::NotificationCommand;
use crate::domains::notifications::models::{ContextElement, DisplayBlock};
use crate::domains::rooms::Room;

/// "1 participant", "2 participants", "0 participants".
pub fn participant_count_text(count: usize) -> String {
    if count == 1 {
        "1 participant".to_string()
    } else {
        format!("{} participants", count)
    }
}

fn room_line(room: &Room, state: &str) -> String {
    format!("*{}* is {} - <{}|Join>", room.name, state, room.join_url)
}

/// Room name and join link, then avatars of everyone who has one and the head count.
pub fn occupied_payload(room: &Room) -> Vec<DisplayBlock> {
    let mut elements: Vec<ContextElement> = room
        .participants
        .iter()
        .filter_map(|participant| {
            participant
                .image_url
                .as_ref()
                .map(|image_url| ContextElement::Image {
                    image_url: image_url.clone(),
                    alt_text: participant.username.clone(),
                })
        })
        .collect();

    elements.push(ContextElement::Text {
        text: participant_count_text(room.participant_count()),
    });

    vec![
        DisplayBlock::section(room_line(room, "occupied")),
        DisplayBlock::Context { elements },
    ]
}

pub fn empty_payload(room: &Room) -> Vec<DisplayBlock> {
    vec![DisplayBlock::section(room_line(room, "empty"))]
}

pub fn build_payload(command: &NotificationCommand, room: &Room) -> Vec<DisplayBlock> {
    match command {
        NotificationCommand::AnnounceOccupied { .. } => occupied_payload(room),
        NotificationCommand::AnnounceEmpty { .. } => empty_payload(room),
    }
}
