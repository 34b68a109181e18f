use crate::error::ReminderError;
use crate::shared::guard::Guard;
use actix_multipart::{Field, Multipart};
use futures::TryStreamExt;
use reminder_api_structs::generate_reminder::{PHOTO_FIELD, USER_ID_FIELD};
use reminder_domain::ID;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::warn;

const ALLOWED_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];

/// A photo that has been written to the upload directory
#[derive(Debug, Clone)]
pub struct StoredPhoto {
    pub path: PathBuf,
    pub mime_type: String,
}

#[derive(Debug)]
pub struct GenerateReminderForm {
    pub photo: StoredPhoto,
    pub user_id: ID,
}

fn allowed_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Some(ext)
    } else {
        None
    }
}

fn allowed_mime_type(mime_type: &str) -> bool {
    let mime_type = mime_type.to_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| mime_type.contains(ext))
}

/// Checks that both the content type and the extension of the uploaded file
/// denote an image and returns the extension to store the file with
pub fn validate_image(file_name: &str, mime_type: &str) -> Result<String, ReminderError> {
    match allowed_extension(file_name) {
        Some(ext) if allowed_mime_type(mime_type) => Ok(ext),
        _ => Err(ReminderError::BadClientData("Images only!".into())),
    }
}

async fn read_text(field: &mut Field) -> Result<String, ReminderError> {
    let mut bytes = vec![];
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| ReminderError::BadClientData(e.to_string()))?
    {
        bytes.extend_from_slice(&chunk);
    }
    String::from_utf8(bytes).map_err(|e| ReminderError::BadClientData(e.to_string()))
}

async fn write_chunks(field: &mut Field, file: &mut tokio::fs::File) -> Result<(), ReminderError> {
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| ReminderError::BadClientData(e.to_string()))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|_| ReminderError::InternalError)?;
    }
    file.flush().await.map_err(|_| ReminderError::InternalError)
}

/// Writes the field to a new file at `path`, removing it again if the upload fails
async fn store_file(field: &mut Field, path: &Path) -> Result<(), ReminderError> {
    // Never reuse the file of another upload
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|_| ReminderError::InternalError)?;
    let res = write_chunks(field, &mut file).await;
    if res.is_err() {
        drop(file);
        let _ = tokio::fs::remove_file(path).await;
    }
    res
}

async fn remove_stored(photo: Option<StoredPhoto>) {
    if let Some(photo) = photo {
        if let Err(e) = tokio::fs::remove_file(&photo.path).await {
            warn!(
                "Unable to remove uploaded file: {:?}. Error: {:?}",
                photo.path, e
            );
        }
    }
}

async fn read_fields(
    payload: &mut Multipart,
    upload_dir: &Path,
    timestamp: i64,
    photo: &mut Option<StoredPhoto>,
    user_id: &mut Option<String>,
) -> Result<(), ReminderError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ReminderError::BadClientData(e.to_string()))?
    {
        let content_disposition = field.content_disposition().clone();
        match content_disposition.get_name() {
            Some(PHOTO_FIELD) => {
                let file_name = content_disposition.get_filename().unwrap_or_default();
                let mime_type = field
                    .content_type()
                    .map(|m| m.to_string())
                    .unwrap_or_default();
                let ext = validate_image(file_name, &mime_type)?;
                let path = upload_dir.join(format!("{}-{}.{}", timestamp, ID::new(), ext));
                store_file(&mut field, &path).await?;
                remove_stored(photo.replace(StoredPhoto { path, mime_type })).await;
            }
            Some(USER_ID_FIELD) => {
                *user_id = Some(read_text(&mut field).await?);
            }
            _ => {
                // Drain unknown fields
                while field
                    .try_next()
                    .await
                    .map_err(|e| ReminderError::BadClientData(e.to_string()))?
                    .is_some()
                {}
            }
        }
    }
    Ok(())
}

/// Reads the `photo` and `userId` fields of the multipart form.
/// The photo is written to `upload_dir` as `<timestamp>-<unique id>.<ext>`
/// and is removed again when the form turns out to be invalid.
pub async fn read_generate_reminder_form(
    mut payload: Multipart,
    upload_dir: &Path,
    timestamp: i64,
) -> Result<GenerateReminderForm, ReminderError> {
    let mut photo: Option<StoredPhoto> = None;
    let mut user_id: Option<String> = None;

    if let Err(e) = read_fields(
        &mut payload,
        upload_dir,
        timestamp,
        &mut photo,
        &mut user_id,
    )
    .await
    {
        remove_stored(photo).await;
        return Err(e);
    }

    let photo = match photo {
        Some(photo) => photo,
        None => return Err(ReminderError::BadClientData("Image upload failed!".into())),
    };
    let user_id = match user_id {
        Some(user_id) => Guard::against_malformed_id(&user_id),
        None => Err(ReminderError::BadClientData(
            "The userId field is missing".into(),
        )),
    };
    match user_id {
        Ok(user_id) => Ok(GenerateReminderForm { photo, user_id }),
        Err(e) => {
            remove_stored(Some(photo)).await;
            Err(e)
        }
    }
}
