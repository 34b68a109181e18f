use super::{IUserRepo, InsertUserError};
use crate::repos::shared::inmemory_repo::*;
use reminder_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> Result<(), InsertUserError> {
        let inserted = insert_unless(user, &self.users, |u| u.email == user.email);
        if !inserted {
            return Err(InsertUserError::DuplicateEmail(user.email.clone()));
        }
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        find_by(&self.users, |u| u.email == email).into_iter().next()
    }
}
