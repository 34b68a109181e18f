mod reminder;
mod shared;
mod user;

use mongodb::{bson::doc, options::ClientOptions, Client};
pub use reminder::{IReminderRepo, InMemoryReminderRepo, MongoReminderRepo};
use std::sync::Arc;
use tracing::info;
pub use user::{IUserRepo, InMemoryUserRepo, InsertUserError, MongoUserRepo};

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub async fn create_mongodb(connection_string: &str, db_name: &str) -> anyhow::Result<Self> {
        let client_options = ClientOptions::parse(connection_string).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        db.run_command(doc! { "ping": 1 }, None).await?;
        info!("DB CHECKING CONNECTION ... [done]");

        let reminders = MongoReminderRepo::new(&db);
        reminders.create_indexes().await?;
        let users = MongoUserRepo::new(&db);
        users.create_indexes().await?;

        Ok(Self {
            reminders: Arc::new(reminders),
            users: Arc::new(users),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
