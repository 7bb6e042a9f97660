use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::database::models::User;
use crate::database::users;
use crate::error::AppError;

/// Session token claims. `sub` is the user id; expiry is enforced by
/// `Validation::default()` on decode.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user: &User, ttl_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id,
            username: user.username.clone(),
            exp: (now + Duration::hours(ttl_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn issue_token(secret: &str, ttl_hours: i64, user: &User) -> Result<String, AppError> {
    let claims = Claims::new(user, ttl_hours);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// bcrypt's verify compares against the stored salted hash; never a
/// plaintext comparison.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    Ok(bcrypt::verify(password, password_hash)?)
}

/// Create a new user. Does not log the user in. Duplicate usernames are
/// detected via the unique constraint rather than a lookup-then-insert,
/// so there is no race window.
pub async fn register(pool: &PgPool, username: &str, password: &str) -> Result<User, AppError> {
    let password_hash = hash_password(password)?;
    match users::insert(pool, username, &password_hash).await {
        Ok(user) => {
            tracing::info!(username, "registered new user");
            Ok(user)
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(AppError::DuplicateUser),
        Err(e) => Err(e.into()),
    }
}

/// Verify credentials. An unknown username and a failed hash comparison
/// are indistinguishable to the caller.
pub async fn login(pool: &PgPool, username: &str, password: &str) -> Result<User, AppError> {
    let Some(user) = users::find_by_username(pool, username).await? else {
        return Err(AppError::InvalidCredentials);
    };
    if verify_password(password, &user.password_hash)? {
        Ok(user)
    } else {
        Err(AppError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: 42,
            username: "alice".to_string(),
            password_hash: String::new(),
        }
    }

    #[test]
    fn test_token_round_trip() {
        let token = issue_token("secret", 1, &test_user()).unwrap();
        let claims = decode_token("secret", &token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let token = issue_token("secret", 1, &test_user()).unwrap();
        assert!(decode_token("other-secret", &token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = issue_token("secret", -1, &test_user()).unwrap();
        assert!(decode_token("secret", &token).is_err());
    }

    #[test]
    fn test_password_hash_and_verify() {
        let hash = hash_password("pw1").unwrap();
        assert_ne!(hash, "pw1");
        assert!(verify_password("pw1", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }
}
