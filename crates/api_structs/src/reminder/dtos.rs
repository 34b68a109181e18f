use reminder_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub reminder_msg: String,
    pub remind_at: String,
    pub is_reminded: bool,
    pub user_id: ID,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            reminder_msg: reminder.reminder_msg,
            remind_at: reminder.remind_at,
            is_reminded: reminder.is_reminded,
            user_id: reminder.user_id,
        }
    }

    pub fn new_list(reminders: Vec<Reminder>) -> Vec<Self> {
        reminders.into_iter().map(Self::new).collect()
    }
}
