use crate::dtos::UserDTO;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new<T: Into<String>>(message: T) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub mod signup {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub email: String,
        pub password: String,
        #[serde(default)]
        pub role: Option<String>,
        /// Messaging address reminders are delivered to, e.g. `whatsapp:+4712345678`
        #[serde(default)]
        pub notification_address: Option<String>,
    }

    pub type APIResponse = MessageResponse;
}

pub mod login {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub token: String,
        pub user: UserDTO,
    }
}
