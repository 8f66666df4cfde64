/**
 * Session Handlers
 *
 * GET /api/users/logout - null the stored session token (204)
 * GET /api/users/current - return the resolved user's public fields (200)
 *
 * Both sit behind the auth middleware; the user arrives pre-resolved in
 * request extensions.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::PgPool;

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::set_token;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Logout: clear the stored token so it is no longer accepted
pub async fn logout(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, ApiError> {
    let pool = pool.ok_or_else(|| ApiError::storage("database not configured"))?;

    set_token(&pool, user.id, None).await?;
    tracing::info!("User logged out: {}", user.id);

    Ok(StatusCode::NO_CONTENT)
}

/// Current user info, straight from the middleware-resolved user
pub async fn current_user(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        email: user.email,
        subscription: user.subscription,
        avatar_url: user.avatar_url,
    })
}
