use reminder_infra::{
    ExtractionError, IExtractionService, INotificationGateway, ImagePayload, Notification,
    NotificationError,
};
use std::sync::Mutex;

/// Answers every extraction with the given content, or fails when there is none
pub struct FakeExtractionService {
    pub content: Option<String>,
}

#[async_trait::async_trait]
impl IExtractionService for FakeExtractionService {
    async fn extract(
        &self,
        _image: &ImagePayload,
        _instruction: &str,
    ) -> Result<String, ExtractionError> {
        self.content.clone().ok_or(ExtractionError::EmptyResponse)
    }
}

#[derive(Default)]
pub struct RecordingGateway {
    pub sent: Mutex<Vec<Notification>>,
}

#[async_trait::async_trait]
impl INotificationGateway for RecordingGateway {
    async fn send(&self, notification: &Notification) -> Result<String, NotificationError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(notification.clone());
        Ok(format!("SM{}", sent.len()))
    }
}
