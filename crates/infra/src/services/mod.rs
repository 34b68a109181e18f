mod extraction;
mod notification;

pub use extraction::{ExtractionError, IExtractionService, ImagePayload, OpenAIExtractionService};
pub use notification::{INotificationGateway, Notification, NotificationError, TwilioGateway};

use std::time::Duration;

const EXTERNAL_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn create_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(EXTERNAL_REQUEST_TIMEOUT)
        .build()
        .unwrap_or_default()
}
