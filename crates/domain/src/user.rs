use crate::shared::entity::{Entity, ID};

pub const DEFAULT_USER_ROLE: &str = "user";

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
    /// Salted bcrypt hash, never the plain text password
    pub password: String,
    pub role: String,
    /// Messaging address (e.g. `whatsapp:+4712345678`) that due reminders
    /// are delivered to. Falls back to the configured default recipient.
    pub notification_address: Option<String>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, role: Option<String>) -> Self {
        Self {
            id: Default::default(),
            name,
            email,
            password: password_hash,
            role: role.unwrap_or_else(|| DEFAULT_USER_ROLE.into()),
            notification_address: None,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
