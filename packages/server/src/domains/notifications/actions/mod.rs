pub mod payload;

pub use payload::{build_payload, empty_payload, occupied_payload, participant_count_text};
