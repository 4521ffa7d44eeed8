pub mod errors;
pub mod events;
pub mod models;
pub mod registry;

// Re-export commonly used types
pub use errors::RoomError;
pub use events::{MembershipEvent, MembershipEventKind};
pub use models::{NotificationConfig, Participant, Room, RoomId};
pub use registry::InMemoryRoomRegistry;
