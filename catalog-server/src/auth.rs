//! Token/password check for the admin login.
//!
//! Passwords are stored as argon2id PHC strings; the plaintext never reaches
//! the database.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use shared_types::{LoginRequest, LoginResponse};
use sqlx::SqlitePool;

pub const LOGIN_OK: &str = "Login successful!";
pub const INVALID_PASSWORD: &str = "Invalid password!";
pub const UNKNOWN_USER: &str = "User not found!";

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("argon2 hash error: {e}"))?
        .to_string();
    Ok(hash)
}

/// Verify a password candidate against a stored argon2id hash.
pub fn verify_password(candidate: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

pub async fn insert_user_if_missing(
    pool: &SqlitePool,
    token_id: &str,
    password: &str,
) -> anyhow::Result<bool> {
    let exists: Option<String> = sqlx::query_scalar("SELECT token_id FROM users WHERE token_id = ?")
        .bind(token_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_some() {
        return Ok(false);
    }

    sqlx::query("INSERT INTO users (token_id, password_hash) VALUES (?, ?)")
        .bind(token_id)
        .bind(hash_password(password)?)
        .execute(pool)
        .await?;
    Ok(true)
}

/// Resolve a login attempt. Rejections are ordinary responses, not errors.
pub async fn authenticate(
    pool: &SqlitePool,
    request: &LoginRequest,
) -> Result<LoginResponse, sqlx::Error> {
    let stored: Option<String> =
        sqlx::query_scalar("SELECT password_hash FROM users WHERE token_id = ?")
            .bind(request.token_id.trim())
            .fetch_optional(pool)
            .await?;

    let Some(hash) = stored else {
        return Ok(LoginResponse::rejected(UNKNOWN_USER));
    };

    if verify_password(&request.password, &hash) {
        Ok(LoginResponse::accepted(request.token_id.trim(), LOGIN_OK))
    } else {
        Ok(LoginResponse::rejected(INVALID_PASSWORD))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_round_trips_and_rejects_other_passwords() {
        let hash = hash_password("password123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("password123", &hash));
        assert!(!verify_password("password124", &hash));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
