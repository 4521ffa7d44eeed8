pub mod display_block;
pub mod last_notified;

pub use display_block::{ContextElement, DisplayBlock};
pub use last_notified::LastNotifiedStore;
