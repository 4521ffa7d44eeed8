pub mod actions;
pub mod commands;
pub mod effects;
pub mod engine;
pub mod errors;
pub mod machines;
pub mod models;

// Re-export commonly used types
pub use commands::NotificationCommand;
pub use engine::NotificationEngine;
pub use errors::NotificationError;
pub use machines::NotificationMachine;
pub use models::{ContextElement, DisplayBlock, LastNotifiedStore};
