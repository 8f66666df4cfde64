/**
 * Auth Handler Types
 *
 * Request and response payloads shared by the user-facing handlers.
 */

use serde::{Deserialize, Serialize};

use crate::auth::users::User;

/// Signup request
///
/// Fields default to empty strings so absent fields reach the validation
/// layer instead of being rejected by deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub email: String,
    /// Plaintext password; hashed before storage, never logged
    pub password: String,
}

/// Login request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Resend-verification request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResendRequest {
    pub email: String,
}

/// User info safe to return to clients (no credentials)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub subscription: String,
    #[serde(rename = "avatarURL")]
    pub avatar_url: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            subscription: user.subscription.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Signup response: the created user, no token until login
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: UserResponse,
}

/// Login response: session token plus user info
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}
