use super::{IUserRepo, InsertUserError};
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use reminder_domain::{User, ID};
use serde::{Deserialize, Serialize};

pub struct MongoUserRepo {
    collection: Collection<Document>,
}

impl MongoUserRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    pub async fn create_indexes(&self) -> anyhow::Result<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(email_index, None).await?;
        Ok(())
    }
}

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Whether the insert was rejected by the unique email index
fn is_duplicate_key(e: &anyhow::Error) -> bool {
    match e.downcast_ref::<mongodb::error::Error>().map(|e| e.kind.as_ref()) {
        Some(ErrorKind::Write(WriteFailure::WriteError(write_error))) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}

#[async_trait::async_trait]
impl IUserRepo for MongoUserRepo {
    async fn insert(&self, user: &User) -> Result<(), InsertUserError> {
        mongo_repo::insert::<_, UserMongo>(&self.collection, user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    InsertUserError::DuplicateEmail(user.email.clone())
                } else {
                    InsertUserError::Storage(e)
                }
            })
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        mongo_repo::find::<_, UserMongo>(&self.collection, user_id.inner_ref()).await
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        let filter = doc! {
            "email": email
        };
        mongo_repo::find_one_by::<_, UserMongo>(&self.collection, filter).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UserMongo {
    _id: ObjectId,
    name: String,
    email: String,
    password: String,
    role: String,
    #[serde(default)]
    notification_address: Option<String>,
}

impl MongoDocument<User> for UserMongo {
    fn to_domain(self) -> User {
        User {
            id: ID::from(self._id),
            name: self.name,
            email: self.email,
            password: self.password,
            role: self.role,
            notification_address: self.notification_address,
        }
    }

    fn from_domain(user: &User) -> Self {
        Self {
            _id: *user.id.inner_ref(),
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            role: user.role.clone(),
            notification_address: user.notification_address.clone(),
        }
    }
}
