use super::add_reminder::new_reminder;
use super::upload::{read_generate_reminder_form, StoredPhoto};
use crate::error::ReminderError;
use crate::shared::usecase::{execute, UseCase};
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use reminder_api_structs::generate_reminder::*;
use reminder_domain::{ExtractedReminder, Reminder, EXTRACTION_INSTRUCTION, ID};
use reminder_infra::{ImagePayload, ReminderContext};
use tracing::{error, warn};

pub async fn generate_reminder_controller(
    payload: Multipart,
    ctx: web::Data<ReminderContext>,
) -> Result<HttpResponse, ReminderError> {
    let form = read_generate_reminder_form(
        payload,
        &ctx.config.upload_dir,
        ctx.sys.get_timestamp_millis(),
    )
    .await?;

    let usecase = GenerateReminderUseCase {
        photo: form.photo,
        user_id: form.user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(ReminderError::from)
}

#[derive(Debug)]
pub struct GenerateReminderUseCase {
    pub photo: StoredPhoto,
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    UnreadableImage,
    ExtractionFailed,
    InvalidExtraction,
    StorageError,
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            _ => Self::UpstreamFailure("Error processing image".into()),
        }
    }
}

impl GenerateReminderUseCase {
    /// Reads the stored photo and removes it from disk whether or not the read succeeded
    async fn take_photo(&self) -> Result<ImagePayload, UseCaseError> {
        let res = tokio::fs::read(&self.photo.path).await;
        if let Err(e) = tokio::fs::remove_file(&self.photo.path).await {
            warn!(
                "Unable to remove uploaded file: {:?}. Error: {:?}",
                self.photo.path, e
            );
        }

        match res {
            Ok(bytes) => Ok(ImagePayload {
                mime_type: self.photo.mime_type.clone(),
                bytes,
            }),
            Err(e) => {
                error!(
                    "Unable to read uploaded file: {:?}. Error: {:?}",
                    self.photo.path, e
                );
                Err(UseCaseError::UnreadableImage)
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GenerateReminderUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "GenerateReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let image = self.take_photo().await?;

        let content = ctx
            .services
            .extraction
            .extract(&image, EXTRACTION_INSTRUCTION)
            .await
            .map_err(|e| {
                error!("Extraction service failed: {:?}", e);
                UseCaseError::ExtractionFailed
            })?;

        let offset = &ctx.config.reminder_utc_offset;
        let extracted = ExtractedReminder::parse(&content, offset).map_err(|e| {
            error!("Unusable extraction response: {:?}. Content: {}", e, content);
            UseCaseError::InvalidExtraction
        })?;

        let reminder = new_reminder(
            &extracted.reminder_msg,
            &extracted.remind_at,
            &self.user_id,
            offset,
        )
        .map_err(|_| UseCaseError::InvalidExtraction)?;

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }
}
