use crate::error::ReminderError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use reminder_api_structs::delete_reminder::*;
use reminder_api_structs::dtos::ReminderDTO;
use reminder_domain::{Reminder, ID};
use reminder_infra::ReminderContext;
use tracing::info;

pub async fn delete_reminder_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderError> {
    let usecase = DeleteReminderUseCase {
        reminder_id: body.0.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(ReminderDTO::new_list(reminders)))
        .map_err(ReminderError::from)
}

#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub reminder_id: ID,
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
impl UseCase for DeleteReminderUseCase {
    /// All remaining `Reminder`s
    type Response = Vec<Reminder>;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let deleted = ctx
            .repos
            .reminders
            .delete(&self.reminder_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if deleted.is_none() {
            info!("Reminder: {} did not exist, nothing deleted", self.reminder_id);
        }

        ctx.repos
            .reminders
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{insert_reminder, test_context};

    #[actix_web::main]
    #[test]
    async fn it_deletes_exactly_the_given_reminder() {
        let ctx = test_context();
        let user_id = ID::new();
        let r1 = insert_reminder(&ctx, "One", "2030-01-01T09:00:00", &user_id).await;
        let r2 = insert_reminder(&ctx, "Two", "2030-01-01T09:00:00", &user_id).await;
        let r3 = insert_reminder(&ctx, "Three", "2030-01-01T09:00:00", &ID::new()).await;

        let remaining = execute(
            DeleteReminderUseCase {
                reminder_id: r2.id.clone(),
            },
            &ctx,
        )
        .await
        .expect("To delete reminder");
        assert_eq!(remaining, vec![r1.clone(), r3.clone()]);

        let remaining = execute(
            DeleteReminderUseCase {
                reminder_id: ID::new(),
            },
            &ctx,
        )
        .await
        .expect("Unknown ids to be ignored");
        assert_eq!(remaining, vec![r1, r3]);
    }
}
