//! Kernel module - infrastructure traits, adapters and background scheduling.

pub mod deps;
pub mod scheduled_tasks;
pub mod test_dependencies;
pub mod traits;

pub use deps::{to_block_kit, ServerDeps, SlackAdapter, SystemClock};
pub use scheduled_tasks::start_scheduler;
pub use test_dependencies::TestDependencies;
pub use traits::*;
