mod inmemory;
mod mongo;

pub use inmemory::InMemoryReminderRepo;
pub use mongo::MongoReminderRepo;
use reminder_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>>;
    /// Pending `Reminder`s whose parsed `remind_at` is not later than `now`
    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>>;
    /// Atomically flips `is_reminded` from `false` to `true`.
    /// Returns `false` if the `Reminder` does not exist or was already reminded.
    async fn mark_reminded(&self, reminder_id: &ID) -> anyhow::Result<bool>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
}
