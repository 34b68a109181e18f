use crate::shared::auth::hash_password;
use reminder_domain::{FixedOffset, Reminder, User, ID};
use reminder_infra::{
    ExtractionError, IExtractionService, INotificationGateway, ISys, ImagePayload, Notification,
    NotificationError, ReminderContext,
};
use std::sync::{Arc, Mutex};

pub struct StaticTimeSys(pub i64);
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

/// Extraction service returning a canned response
pub struct FakeExtractionService {
    pub response: Option<String>,
    pub calls: Mutex<Vec<ImagePayload>>,
}

impl FakeExtractionService {
    pub fn responding(response: &str) -> Self {
        Self {
            response: Some(response.into()),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IExtractionService for FakeExtractionService {
    async fn extract(
        &self,
        image: &ImagePayload,
        _instruction: &str,
    ) -> Result<String, ExtractionError> {
        self.calls.lock().unwrap().push(image.clone());
        self.response.clone().ok_or(ExtractionError::EmptyResponse)
    }
}

/// Gateway recording every notification it is asked to send
#[derive(Default)]
pub struct RecordingGateway {
    pub fail: bool,
    pub sent: Mutex<Vec<Notification>>,
}

#[async_trait::async_trait]
impl INotificationGateway for RecordingGateway {
    async fn send(&self, notification: &Notification) -> Result<String, NotificationError> {
        self.sent.lock().unwrap().push(notification.clone());
        if self.fail {
            return Err(NotificationError::UnexpectedStatus {
                status: 500,
                body: "gateway down".into(),
            });
        }
        Ok(format!("SM{}", self.sent.lock().unwrap().len()))
    }
}

pub fn test_context() -> ReminderContext {
    let mut ctx = ReminderContext::create_inmemory();
    ctx.services.extraction = Arc::new(FakeExtractionService::failing());
    ctx.services.notifications = Arc::new(RecordingGateway::default());
    ctx.config.notifications.default_recipient = Some("whatsapp:+10000000000".into());
    ctx.config.reminder_utc_offset = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
    ctx
}

pub async fn insert_user(ctx: &ReminderContext, email: &str, password: &str) -> User {
    let hash = hash_password(password.into()).await.unwrap();
    let user = User::new("Ada".into(), email.into(), hash, None);
    ctx.repos.users.insert(&user).await.unwrap();
    user
}

pub async fn insert_reminder(
    ctx: &ReminderContext,
    msg: &str,
    remind_at: &str,
    user_id: &ID,
) -> Reminder {
    let reminder = Reminder::new(
        msg.into(),
        remind_at.into(),
        user_id.clone(),
        &ctx.config.reminder_utc_offset,
    );
    ctx.repos.reminders.insert(&reminder).await.unwrap();
    reminder
}
