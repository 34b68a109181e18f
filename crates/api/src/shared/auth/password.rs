use tokio::task::spawn_blocking;
use thiserror::Error;

/// Work factor for the salted bcrypt hash
const HASH_COST: u32 = 10;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("Password hashing task was cancelled")]
    Cancelled,
}

/// Hashes on a blocking thread as bcrypt is intentionally slow
pub async fn hash_password(password: String) -> Result<String, PasswordError> {
    spawn_blocking(move || bcrypt::hash(password, HASH_COST))
        .await
        .map_err(|_| PasswordError::Cancelled)?
        .map_err(PasswordError::from)
}

/// Checks `password` against a stored hash. A malformed stored hash
/// is reported as an error, a wrong password as `Ok(false)`.
pub async fn verify_password(password: String, hash: String) -> Result<bool, PasswordError> {
    spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|_| PasswordError::Cancelled)?
        .map_err(PasswordError::from)
}
