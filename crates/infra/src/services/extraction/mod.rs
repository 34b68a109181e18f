mod openai;

pub use openai::OpenAIExtractionService;
use thiserror::Error;

/// An uploaded image held in memory
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// e.g. `image/png`
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Request to extraction service failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Extraction service responded with status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("Extraction service response did not contain any content")]
    EmptyResponse,
}

/// Derives a reminder candidate from an image.
///
/// Implementations return the raw text content produced by the model.
/// Parsing it into a reminder is left to `ExtractedReminder::parse`.
#[async_trait::async_trait]
pub trait IExtractionService: Send + Sync {
    async fn extract(&self, image: &ImagePayload, instruction: &str)
        -> Result<String, ExtractionError>;
}
