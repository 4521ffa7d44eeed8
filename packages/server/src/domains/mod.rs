pub mod notifications;
pub mod rooms;
