use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use reminder_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.user_id == *user_id))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |_| true))
    }

    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| r.is_due(now)))
    }

    async fn mark_reminded(&self, reminder_id: &ID) -> anyhow::Result<bool> {
        Ok(update_if(
            reminder_id,
            &self.reminders,
            |r| !r.is_reminded,
            |r| r.is_reminded = true,
        ))
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(delete(reminder_id, &self.reminders))
    }
}
