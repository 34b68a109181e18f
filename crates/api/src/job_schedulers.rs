use crate::{
    reminder::send_due_reminders::SendDueRemindersUseCase,
    shared::usecase::execute,
};
use actix_web::rt::task::JoinHandle;
use reminder_infra::ReminderContext;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// Handle to a running job. The job runs until `stop` is called.
pub struct JobHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl JobHandle {
    /// Signals the job to stop and waits for it to finish.
    /// An iteration in flight is completed first.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            error!("Job terminated abnormally: {:?}", e);
        }
    }
}

async fn send_due_reminders(ctx: &ReminderContext) {
    match execute(SendDueRemindersUseCase {}, ctx).await {
        Ok(summary) if summary.notified + summary.failed > 0 => {
            info!(
                "Processed due reminders. Notified: {}, failed: {}",
                summary.notified, summary.failed
            );
        }
        Ok(_) => debug!("No due reminders"),
        Err(_) => (),
    }
}

/// Checks for due `Reminder`s on every `reminder_check_interval`
pub fn start_due_reminders_job(ctx: ReminderContext) -> JobHandle {
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let task = actix_web::rt::spawn(async move {
        let mut ticks = interval(ctx.config.reminder_check_interval);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticks.tick() => send_due_reminders(&ctx).await,
                _ = shutdown_rx.changed() => break,
            }
        }
        info!("Due reminders job stopped");
    });

    JobHandle { shutdown, task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{insert_reminder, test_context, RecordingGateway};
    use reminder_domain::ID;
    use reminder_infra::{INotificationGateway, Notification, NotificationError};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Gateway that takes a while to deliver
    struct SlowGateway {
        delay: Duration,
        delivered: Mutex<Vec<Notification>>,
    }

    #[async_trait::async_trait]
    impl INotificationGateway for SlowGateway {
        async fn send(&self, notification: &Notification) -> Result<String, NotificationError> {
            actix_web::rt::time::sleep(self.delay).await;
            self.delivered.lock().unwrap().push(notification.clone());
            Ok("SM1".into())
        }
    }

    #[actix_web::main]
    #[test]
    async fn it_sends_due_reminders_until_stopped() {
        let mut ctx = test_context();
        let gateway = Arc::new(RecordingGateway::default());
        ctx.services.notifications = gateway.clone();
        ctx.config.reminder_check_interval = Duration::from_millis(20);
        let user_id = ID::new();
        insert_reminder(&ctx, "Stretch", "2020-01-01T09:00:00Z", &user_id).await;

        let job = start_due_reminders_job(ctx.clone());
        actix_web::rt::time::sleep(Duration::from_millis(100)).await;
        job.stop().await;

        assert_eq!(gateway.sent.lock().unwrap().len(), 1);

        // Nothing is processed once the job is stopped
        insert_reminder(&ctx, "Drink water", "2020-01-01T09:00:00Z", &user_id).await;
        actix_web::rt::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(gateway.sent.lock().unwrap().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn it_finishes_the_running_iteration_when_stopped() {
        let mut ctx = test_context();
        let gateway = Arc::new(SlowGateway {
            delay: Duration::from_millis(300),
            delivered: Mutex::new(vec![]),
        });
        ctx.services.notifications = gateway.clone();
        ctx.config.reminder_check_interval = Duration::from_millis(10);
        insert_reminder(&ctx, "Stretch", "2020-01-01T09:00:00Z", &ID::new()).await;

        let job = start_due_reminders_job(ctx);
        // The first tick fires right away and is now waiting on the gateway
        actix_web::rt::time::sleep(Duration::from_millis(50)).await;
        assert!(gateway.delivered.lock().unwrap().is_empty());

        job.stop().await;
        assert_eq!(gateway.delivered.lock().unwrap().len(), 1);
    }
}
