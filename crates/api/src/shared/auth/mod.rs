mod password;
mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use token::{issue_token, verify_token, Claims, TokenError};
