use crate::shared::usecase::UseCase;
use reminder_domain::Reminder;
use reminder_infra::{Notification, ReminderContext};
use tracing::{error, warn};

/// Notifies the owners of all `Reminder`s that are due and flags them as reminded.
///
/// Every due `Reminder` is flagged before its notification is sent and a
/// failed send is never retried, so an owner is notified at most once.
#[derive(Debug)]
pub struct SendDueRemindersUseCase {}

#[derive(Debug, Default, PartialEq)]
pub struct DueRemindersSummary {
    /// Notifications handed over to the gateway
    pub notified: usize,
    /// Due `Reminder`s that were flagged but whose notification was not delivered
    pub failed: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl SendDueRemindersUseCase {
    async fn recipient(reminder: &Reminder, ctx: &ReminderContext) -> Option<String> {
        let owner_address = ctx
            .repos
            .users
            .find(&reminder.user_id)
            .await
            .and_then(|user| user.notification_address);

        owner_address.or_else(|| ctx.config.notifications.default_recipient.clone())
    }

    /// Returns whether the owner was notified
    async fn notify(reminder: Reminder, ctx: &ReminderContext) -> bool {
        match ctx.repos.reminders.mark_reminded(&reminder.id).await {
            Ok(true) => (),
            Ok(false) => return false,
            Err(e) => {
                error!("Unable to flag reminder: {} as reminded: {:?}", reminder.id, e);
                return false;
            }
        }

        let recipient = match Self::recipient(&reminder, ctx).await {
            Some(recipient) => recipient,
            None => {
                warn!(
                    "No notification address found for reminder: {}. Skipping notification.",
                    reminder.id
                );
                return false;
            }
        };

        let notification = Notification {
            body: reminder.reminder_msg,
            recipient,
        };
        match ctx.services.notifications.send(&notification).await {
            Ok(_) => true,
            Err(e) => {
                error!(
                    "Unable to send notification for reminder: {}. Error: {:?}",
                    reminder.id, e
                );
                false
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendDueRemindersUseCase {
    type Response = DueRemindersSummary;
    type Error = UseCaseError;

    const NAME: &'static str = "SendDueReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due = ctx
            .repos
            .reminders
            .find_due(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut summary = DueRemindersSummary::default();
        for reminder in due {
            if Self::notify(reminder, ctx).await {
                summary.notified += 1;
            } else {
                summary.failed += 1;
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use crate::test_utils::{insert_reminder, test_context, RecordingGateway, StaticTimeSys};
    use reminder_domain::{User, ID};
    use std::sync::{Arc, Mutex};

    // 2024-01-01T00:00:00Z
    const NOW: i64 = 1704067200000;

    fn setup() -> (ReminderContext, Arc<RecordingGateway>) {
        let mut ctx = test_context();
        let gateway = Arc::new(RecordingGateway::default());
        ctx.services.notifications = gateway.clone();
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        (ctx, gateway)
    }

    #[actix_web::main]
    #[test]
    async fn it_notifies_due_reminders_once() {
        let (ctx, gateway) = setup();
        let user_id = ID::new();
        let due = insert_reminder(&ctx, "Take medicine", "2023-12-31T23:59:00Z", &user_id).await;
        let future = insert_reminder(&ctx, "Later", "2024-01-01T00:01:00Z", &user_id).await;
        let never = insert_reminder(&ctx, "Whenever", "some day", &user_id).await;

        let summary = execute(SendDueRemindersUseCase {}, &ctx).await.unwrap();
        assert_eq!(
            summary,
            DueRemindersSummary {
                notified: 1,
                failed: 0
            }
        );
        assert_eq!(
            *gateway.sent.lock().unwrap(),
            vec![Notification {
                body: "Take medicine".into(),
                recipient: "whatsapp:+10000000000".into(),
            }]
        );
        assert!(ctx.repos.reminders.find(&due.id).await.unwrap().is_reminded);
        assert!(!ctx.repos.reminders.find(&future.id).await.unwrap().is_reminded);
        assert!(!ctx.repos.reminders.find(&never.id).await.unwrap().is_reminded);

        // A second pass has nothing left to do
        let summary = execute(SendDueRemindersUseCase {}, &ctx).await.unwrap();
        assert_eq!(summary, DueRemindersSummary::default());
        assert_eq!(gateway.sent.lock().unwrap().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn it_interprets_naive_remind_at_in_configured_offset() {
        let (ctx, gateway) = setup();
        let user_id = ID::new();
        // 05:29 at +05:30 is 23:59 the previous day in UTC
        insert_reminder(&ctx, "Due", "2024-01-01T05:29:00", &user_id).await;
        insert_reminder(&ctx, "Not yet", "2024-01-01T05:31:00", &user_id).await;

        execute(SendDueRemindersUseCase {}, &ctx).await.unwrap();
        let sent = gateway.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, "Due");
    }

    #[actix_web::main]
    #[test]
    async fn it_prefers_the_owners_notification_address() {
        let (ctx, gateway) = setup();
        let mut user = User::new("Ada".into(), "ada@example.com".into(), "hash".into(), None);
        user.notification_address = Some("whatsapp:+4799999999".into());
        ctx.repos.users.insert(&user).await.unwrap();
        insert_reminder(&ctx, "Call back", "2023-12-31T12:00:00Z", &user.id).await;

        execute(SendDueRemindersUseCase {}, &ctx).await.unwrap();
        assert_eq!(
            gateway.sent.lock().unwrap()[0].recipient,
            "whatsapp:+4799999999"
        );
    }

    #[actix_web::main]
    #[test]
    async fn it_does_not_retry_failed_notifications() {
        let (mut ctx, _) = setup();
        let gateway = Arc::new(RecordingGateway {
            fail: true,
            sent: Mutex::new(vec![]),
        });
        ctx.services.notifications = gateway.clone();
        let reminder = insert_reminder(&ctx, "Pay rent", "2023-12-31T12:00:00Z", &ID::new()).await;

        let summary = execute(SendDueRemindersUseCase {}, &ctx).await.unwrap();
        assert_eq!(
            summary,
            DueRemindersSummary {
                notified: 0,
                failed: 1
            }
        );
        assert!(ctx.repos.reminders.find(&reminder.id).await.unwrap().is_reminded);

        execute(SendDueRemindersUseCase {}, &ctx).await.unwrap();
        assert_eq!(gateway.sent.lock().unwrap().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn it_skips_reminders_without_recipient() {
        let (mut ctx, gateway) = setup();
        ctx.config.notifications.default_recipient = None;
        let reminder = insert_reminder(&ctx, "Pay rent", "2023-12-31T12:00:00Z", &ID::new()).await;

        let summary = execute(SendDueRemindersUseCase {}, &ctx).await.unwrap();
        assert_eq!(summary.failed, 1);
        assert!(gateway.sent.lock().unwrap().is_empty());
        assert!(ctx.repos.reminders.find(&reminder.id).await.unwrap().is_reminded);
    }

    #[actix_web::main]
    #[test]
    async fn it_only_sends_for_reminders_it_transitioned() {
        let (ctx, gateway) = setup();
        let reminder = insert_reminder(&ctx, "Pay rent", "2023-12-31T12:00:00Z", &ID::new()).await;

        // Another instance flagged it between the query and the write
        assert!(ctx.repos.reminders.mark_reminded(&reminder.id).await.unwrap());
        assert!(!SendDueRemindersUseCase::notify(reminder, &ctx).await);
        assert!(gateway.sent.lock().unwrap().is_empty());
    }
}
