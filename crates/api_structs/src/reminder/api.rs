use crate::dtos::ReminderDTO;
use reminder_domain::ID;
use serde::{Deserialize, Serialize};

pub type RemindersResponse = Vec<ReminderDTO>;

pub mod get_all_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub user_id: ID,
    }

    pub type APIResponse = RemindersResponse;
}

pub mod add_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminder_msg: String,
        pub remind_at: String,
        pub user_id: ID,
    }

    pub type APIResponse = RemindersResponse;
}

pub mod generate_reminder {
    use super::*;
    use reminder_domain::Reminder;

    /// Name of the multipart field carrying the image
    pub const PHOTO_FIELD: &str = "photo";
    /// Name of the multipart field carrying the owner id
    pub const USER_ID_FIELD: &str = "userId";

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub reminder: ReminderDTO,
    }

    impl APIResponse {
        pub fn new(reminder: Reminder) -> Self {
            Self {
                message: "Reminder generated and saved".into(),
                reminder: ReminderDTO::new(reminder),
            }
        }
    }
}

pub mod delete_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub id: ID,
    }

    pub type APIResponse = RemindersResponse;
}
