// Room Occupancy Notifier - Core
//
// Watches room membership and announces occupancy to a Slack channel.
// Join/leave transitions are announced immediately; rooms that stay occupied
// are re-announced by a periodic sweep, throttled per room.

pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
