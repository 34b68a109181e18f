use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use reminder_domain::ID;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Id of the `User` the token was issued to
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    Encoding(jsonwebtoken::errors::Error),
    #[error("Invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
    #[error("Token lifetime of {0} seconds is out of range")]
    InvalidExpiry(i64),
}

/// Issues a signed, time limited bearer token for the given `User`
pub fn issue_token(user_id: &ID, secret: &str, expiry_secs: i64) -> Result<String, TokenError> {
    let now = Utc::now();
    let exp = Duration::try_seconds(expiry_secs)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or(TokenError::InvalidExpiry(expiry_secs))?;
    let claims = Claims {
        sub: user_id.as_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Encoding)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(TokenError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_carry_the_user_id() {
        let user_id = ID::new();
        let token = issue_token(&user_id, "secret", 3600).expect("To issue token");

        let claims = verify_token(&token, "secret").expect("To verify token");
        assert_eq!(claims.sub, user_id.as_string());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn tokens_are_rejected_with_wrong_secret_or_when_expired() {
        let user_id = ID::new();
        let token = issue_token(&user_id, "secret", 3600).unwrap();
        assert!(verify_token(&token, "other-secret").is_err());

        let expired = issue_token(&user_id, "secret", -3600).unwrap();
        assert!(verify_token(&expired, "secret").is_err());
    }

    #[test]
    fn out_of_range_lifetimes_are_errors() {
        let user_id = ID::new();
        for expiry_secs in [i64::MAX, i64::MIN, i64::MAX / 1000] {
            assert!(matches!(
                issue_token(&user_id, "secret", expiry_secs),
                Err(TokenError::InvalidExpiry(secs)) if secs == expiry_secs
            ));
        }
    }
}
