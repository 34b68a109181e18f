mod base;
mod reminder;
mod status;
mod user;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
pub use reminder::{AddReminderInput, GenerateReminderInput};
use reminder::ReminderClient;
pub use reminder_api_structs::dtos::*;
pub use reminder_domain::ID;
use status::StatusClient;
use std::sync::Arc;
pub use user::SignupInput;
use user::UserClient;

// Domain
pub use reminder_api_structs::dtos::ReminderDTO as Reminder;
pub use reminder_api_structs::dtos::UserDTO as User;

/// Reminder Server SDK
///
/// The SDK contains methods for interacting with the Reminder server
/// API.
#[derive(Clone)]
pub struct ReminderSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub user: UserClient,
}

impl ReminderSDK {
    pub fn new(address: String) -> Self {
        let base = Arc::new(BaseClient::new(address));
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            reminder,
            status,
            user,
        }
    }
}
