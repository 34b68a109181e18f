use crate::{APIError, APIErrorVariant, APIResponse, BaseClient, ID};
use reminder_api_structs::*;
use reqwest::{
    multipart::{Form, Part},
    StatusCode,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct AddReminderInput {
    pub reminder_msg: String,
    pub remind_at: String,
    pub user_id: ID,
}

pub struct GenerateReminderInput {
    pub file_name: String,
    /// e.g. `image/png`
    pub mime_type: String,
    pub photo: Vec<u8>,
    pub user_id: ID,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_all(&self, user_id: ID) -> APIResponse<get_all_reminders::APIResponse> {
        self.base
            .get(&format!("getAllReminder?userId={}", user_id), StatusCode::OK)
            .await
    }

    pub async fn add(&self, input: AddReminderInput) -> APIResponse<add_reminder::APIResponse> {
        let body = add_reminder::RequestBody {
            reminder_msg: input.reminder_msg,
            remind_at: input.remind_at,
            user_id: input.user_id,
        };

        self.base.post(body, "addReminder", StatusCode::OK).await
    }

    pub async fn generate(
        &self,
        input: GenerateReminderInput,
    ) -> APIResponse<generate_reminder::APIResponse> {
        let photo = Part::bytes(input.photo)
            .file_name(input.file_name)
            .mime_str(&input.mime_type)
            .map_err(|_| APIError {
                variant: APIErrorVariant::BadClientData,
                message: format!("Invalid mime type: {}", input.mime_type),
            })?;
        let form = Form::new()
            .part(generate_reminder::PHOTO_FIELD, photo)
            .text(generate_reminder::USER_ID_FIELD, input.user_id.to_string());

        self.base
            .post_multipart(form, "generateReminder", StatusCode::OK)
            .await
    }

    pub async fn delete(&self, reminder_id: ID) -> APIResponse<delete_reminder::APIResponse> {
        let body = delete_reminder::RequestBody { id: reminder_id };

        self.base.post(body, "deleteReminder", StatusCode::OK).await
    }
}
