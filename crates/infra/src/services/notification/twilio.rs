use super::{INotificationGateway, Notification, NotificationError};
use crate::{config::NotificationConfig, services::create_http_client};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Sends messages through the Twilio Messages API, e.g. on the WhatsApp channel
/// when the addresses are prefixed with `whatsapp:`.
pub struct TwilioGateway {
    client: Client,
    config: NotificationConfig,
}

impl TwilioGateway {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            client: create_http_client(),
            config,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.base_url, self.config.account_sid
        )
    }
}

#[async_trait::async_trait]
impl INotificationGateway for TwilioGateway {
    async fn send(&self, notification: &Notification) -> Result<String, NotificationError> {
        let form = [
            ("Body", notification.body.as_str()),
            ("From", self.config.sender.as_str()),
            ("To", notification.recipient.as_str()),
        ];

        let res = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(NotificationError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let message: MessageResponse = res.json().await?;
        Ok(message.sid)
    }
}
