pub mod room;

pub use room::{NotificationConfig, Participant, Room, RoomId};
