use crate::error::ReminderError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use reminder_api_structs::add_reminder::*;
use reminder_api_structs::dtos::ReminderDTO;
use reminder_domain::{FixedOffset, Reminder, ID};
use reminder_infra::ReminderContext;
use tracing::warn;

pub async fn add_reminder_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderError> {
    let body = body.0;
    let usecase = AddReminderUseCase {
        reminder_msg: body.reminder_msg,
        remind_at: body.remind_at,
        user_id: body.user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(ReminderDTO::new_list(reminders)))
        .map_err(ReminderError::from)
}

#[derive(Debug, PartialEq)]
pub enum InvalidReminder {
    EmptyMessage,
    EmptyRemindAt,
}

/// Validates the input and creates a pending `Reminder`.
///
/// A `remind_at` that cannot be parsed is accepted, but the resulting
/// `Reminder` will never become due.
pub fn new_reminder(
    reminder_msg: &str,
    remind_at: &str,
    user_id: &ID,
    local_offset: &FixedOffset,
) -> Result<Reminder, InvalidReminder> {
    if reminder_msg.trim().is_empty() {
        return Err(InvalidReminder::EmptyMessage);
    }
    if remind_at.trim().is_empty() {
        return Err(InvalidReminder::EmptyRemindAt);
    }

    let reminder = Reminder::new(
        reminder_msg.to_string(),
        remind_at.to_string(),
        user_id.clone(),
        local_offset,
    );
    if reminder.remind_at_ts.is_none() {
        warn!(
            "Reminder: {} has a remindAt: {} that could not be parsed, it will never be due",
            reminder.id, reminder.remind_at
        );
    }
    Ok(reminder)
}

#[derive(Debug)]
pub struct AddReminderUseCase {
    pub reminder_msg: String,
    pub remind_at: String,
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidReminder(InvalidReminder),
    StorageError,
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidReminder(InvalidReminder::EmptyMessage) => {
                Self::BadClientData("The reminderMsg field must not be empty".into())
            }
            UseCaseError::InvalidReminder(InvalidReminder::EmptyRemindAt) => {
                Self::BadClientData("The remindAt field must not be empty".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AddReminderUseCase {
    /// All the `Reminder`s of the owner, including the new one
    type Response = Vec<Reminder>;
    type Error = UseCaseError;

    const NAME: &'static str = "AddReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let reminder = new_reminder(
            &self.reminder_msg,
            &self.remind_at,
            &self.user_id,
            &ctx.config.reminder_utc_offset,
        )
        .map_err(UseCaseError::InvalidReminder)?;

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        ctx.repos
            .reminders
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
