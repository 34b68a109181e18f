mod extraction;
mod remind_at;
mod reminder;
mod shared;
mod user;

pub use extraction::{ExtractedReminder, ExtractionParseError, EXTRACTION_INSTRUCTION};
pub use remind_at::{parse_remind_at, parse_utc_offset};
pub use reminder::Reminder;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::{User, DEFAULT_USER_ROLE};

pub use chrono::FixedOffset;
