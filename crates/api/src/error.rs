use actix_web::{http::StatusCode, HttpResponse};
use reminder_api_structs::MessageResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("Internal server error")]
    InternalError,
    #[error("{0}")]
    BadClientData(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    AlreadyExists(String),
    #[error("{0}")]
    UpstreamFailure(String),
}

impl actix_web::error::ResponseError for ReminderError {
    fn status_code(&self) -> StatusCode {
        // Client caused errors are all reported as bad requests
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::AlreadyExists(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(MessageResponse::new(self.to_string()))
    }
}
