use crate::{
    remind_at::parse_remind_at,
    shared::entity::{Entity, ID},
};
use chrono::FixedOffset;

/// A `Reminder` is a message that the owner `User` should be notified
/// about once `remind_at` has passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The text that is sent to the owner when the `Reminder` is due
    pub reminder_msg: String,
    /// The due time exactly as it was given by the client or the extraction service
    pub remind_at: String,
    /// `remind_at` parsed into millis. `None` when `remind_at` could not be
    /// parsed, in which case the `Reminder` is never due.
    pub remind_at_ts: Option<i64>,
    /// Set once by the due-check job and never reset
    pub is_reminded: bool,
    /// The `User` owning this `Reminder`
    pub user_id: ID,
}

impl Reminder {
    pub fn new(
        reminder_msg: String,
        remind_at: String,
        user_id: ID,
        local_offset: &FixedOffset,
    ) -> Self {
        let remind_at_ts = parse_remind_at(&remind_at, local_offset);
        Self {
            id: Default::default(),
            reminder_msg,
            remind_at,
            remind_at_ts,
            is_reminded: false,
            user_id,
        }
    }

    /// Whether the owner should be notified at `now`
    pub fn is_due(&self, now: i64) -> bool {
        if self.is_reminded {
            return false;
        }
        match self.remind_at_ts {
            Some(ts) => ts <= now,
            None => false,
        }
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
