/**
 * User Model and Database Operations
 *
 * User accounts, password hashing, and the session/verification token
 * columns. Passwords are bcrypt-hashed at signup and never stored or
 * returned in plaintext.
 */

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

/// Default subscription tier for new accounts
pub const DEFAULT_SUBSCRIPTION: &str = "starter";

/// User struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Current session token; null means not logged in
    pub token: Option<String>,
    /// Subscription plan (starter, pro, business)
    pub subscription: String,
    /// Path/URL to the current avatar image
    pub avatar_url: String,
    /// Whether the email address has been verified
    pub verify: bool,
    /// One-time verification token; nulled after verification
    pub verification_token: Option<String>,
}

impl User {
    /// Check a plaintext password against the stored hash
    pub fn check_password(&self, password: &str) -> bool {
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}

/// Hash a plaintext password for storage
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
}

/// Derive the deterministic placeholder avatar URL for an email address
///
/// Used at signup when no image has been uploaded.
pub fn placeholder_avatar(email: &str) -> String {
    let digest = md5::compute(email.trim().to_lowercase().as_bytes());
    format!("https://www.gravatar.com/avatar/{digest:x}?d=identicon")
}

const USER_COLUMNS: &str =
    "id, email, password_hash, token, subscription, avatar_url, verify, verification_token";

/// Create a new, unverified user
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    avatar_url: &str,
    verification_token: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, email, password_hash, subscription, avatar_url, verify,
                           verification_token, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, FALSE, $6, $7, $7)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .bind(DEFAULT_SUBSCRIPTION)
    .bind(avatar_url)
    .bind(verification_token)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get user by email
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get user by verification token
pub async fn get_user_by_verification_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE verification_token = $1"
    ))
    .bind(token)
    .fetch_optional(pool)
    .await
}

/// Set or clear the user's session token
///
/// Issuing a new token supersedes any previous one; clearing it logs the
/// user out.
pub async fn set_token(
    pool: &PgPool,
    user_id: Uuid,
    token: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET token = $1, updated_at = $2 WHERE id = $3")
        .bind(token)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Mark the user as verified and consume the verification token
///
/// This transition happens once and is irreversible.
pub async fn confirm_verification(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET verify = TRUE, verification_token = NULL, updated_at = $1 WHERE id = $2",
    )
    .bind(Utc::now())
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Update the user's avatar URL
pub async fn set_avatar_url(pool: &PgPool, user_id: Uuid, url: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET avatar_url = $1, updated_at = $2 WHERE id = $3")
        .bind(url)
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_hash(hash: String) -> User {
        User {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            password_hash: hash,
            token: None,
            subscription: DEFAULT_SUBSCRIPTION.to_string(),
            avatar_url: placeholder_avatar("test@example.com"),
            verify: false,
            verification_token: Some(Uuid::new_v4().to_string()),
        }
    }

    #[test]
    fn test_check_password() {
        let hash = hash_password("password123").unwrap();
        let user = user_with_hash(hash);

        assert!(user.check_password("password123"));
        assert!(!user.check_password("wrongpassword"));
    }

    #[test]
    fn test_check_password_garbled_hash() {
        let user = user_with_hash("not-a-bcrypt-hash".to_string());
        assert!(!user.check_password("password123"));
    }

    #[test]
    fn test_placeholder_avatar_is_deterministic() {
        let a = placeholder_avatar("Test@Example.com ");
        let b = placeholder_avatar("test@example.com");
        assert_eq!(a, b);
        assert!(a.starts_with("https://www.gravatar.com/avatar/"));
    }

    #[test]
    fn test_placeholder_avatar_differs_per_email() {
        assert_ne!(
            placeholder_avatar("ann@x.com"),
            placeholder_avatar("bob@x.com")
        );
    }
}
