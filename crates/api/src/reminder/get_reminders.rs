use crate::error::ReminderError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use reminder_api_structs::dtos::ReminderDTO;
use reminder_api_structs::get_all_reminders::*;
use reminder_domain::{Reminder, ID};
use reminder_infra::ReminderContext;

pub async fn get_reminders_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderError> {
    let usecase = GetRemindersUseCase {
        user_id: query_params.0.user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(ReminderDTO::new_list(reminders)))
        .map_err(ReminderError::from)
}

#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
