mod twilio;

use thiserror::Error;
pub use twilio::TwilioGateway;

/// A single text message to deliver
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub body: String,
    pub recipient: String,
}

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Request to notification gateway failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Notification gateway responded with status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Delivers messages to an external messaging address.
///
/// Returns the gateway's identifier of the sent message.
#[async_trait::async_trait]
pub trait INotificationGateway: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<String, NotificationError>;
}
