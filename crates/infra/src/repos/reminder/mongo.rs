use super::IReminderRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use reminder_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

pub struct MongoReminderRepo {
    collection: Collection<Document>,
}

impl MongoReminderRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("reminders"),
        }
    }

    /// Index backing `find_due` and `find_by_user`
    pub async fn create_indexes(&self) -> anyhow::Result<()> {
        let due_index = IndexModel::builder()
            .keys(doc! { "is_reminded": 1, "remind_at_ts": 1 })
            .options(
                IndexOptions::builder()
                    .name(Some("due_reminders".to_string()))
                    .build(),
            )
            .build();
        let owner_index = IndexModel::builder().keys(doc! { "user_id": 1 }).build();
        self.collection
            .create_indexes(vec![due_index, owner_index], None)
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IReminderRepo for MongoReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        mongo_repo::insert::<_, ReminderMongo>(&self.collection, reminder).await
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        mongo_repo::find::<_, ReminderMongo>(&self.collection, reminder_id.inner_ref()).await
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let filter = doc! {
            "user_id": *user_id.inner_ref()
        };
        mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter).await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>> {
        mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, doc! {}).await
    }

    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        // Documents with a null `remind_at_ts` never match `$lte`
        let filter = doc! {
            "is_reminded": false,
            "remind_at_ts": {
                "$lte": now
            }
        };
        mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter).await
    }

    async fn mark_reminded(&self, reminder_id: &ID) -> anyhow::Result<bool> {
        let filter = doc! {
            "_id": *reminder_id.inner_ref(),
            "is_reminded": false
        };
        mongo_repo::update_one_by(&self.collection, filter, doc! { "is_reminded": true }).await
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        mongo_repo::delete::<_, ReminderMongo>(&self.collection, reminder_id.inner_ref()).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReminderMongo {
    _id: ObjectId,
    reminder_msg: String,
    remind_at: String,
    remind_at_ts: Option<i64>,
    is_reminded: bool,
    user_id: ObjectId,
}

impl MongoDocument<Reminder> for ReminderMongo {
    fn to_domain(self) -> Reminder {
        Reminder {
            id: ID::from(self._id),
            reminder_msg: self.reminder_msg,
            remind_at: self.remind_at,
            remind_at_ts: self.remind_at_ts,
            is_reminded: self.is_reminded,
            user_id: ID::from(self.user_id),
        }
    }

    fn from_domain(reminder: &Reminder) -> Self {
        Self {
            _id: *reminder.id.inner_ref(),
            reminder_msg: reminder.reminder_msg.clone(),
            remind_at: reminder.remind_at.clone(),
            remind_at_ts: reminder.remind_at_ts,
            is_reminded: reminder.is_reminded,
            user_id: *reminder.user_id.inner_ref(),
        }
    }
}
