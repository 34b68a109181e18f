mod inmemory;
mod mongo;

pub use inmemory::InMemoryUserRepo;
pub use mongo::MongoUserRepo;
use reminder_domain::{User, ID};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsertUserError {
    #[error("A user with email: {0} already exists")]
    DuplicateEmail(String),
    #[error("Unable to store user: {0}")]
    Storage(#[from] anyhow::Error),
}

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    /// Fails with `DuplicateEmail` when the email is already taken,
    /// also when the other `User` is inserted concurrently
    async fn insert(&self, user: &User) -> Result<(), InsertUserError>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
}
