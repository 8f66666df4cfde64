/**
 * Login Handler
 *
 * POST /api/users/login
 *
 * Looks up the user by email, verifies the password against the bcrypt
 * hash, and issues a fresh session token, superseding any previous one.
 *
 * # Security
 *
 * - Unknown email and wrong password return the same generic 401 so the
 *   response does not reveal which was wrong
 * - Unverified accounts are barred from login (400)
 * - Passwords are never logged or returned
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::auth::sessions::create_token;
use crate::auth::users::{get_user_by_email, set_token};
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::validation::validate_login;

fn wrong_credentials() -> ApiError {
    ApiError::unauthorized("Email or password is wrong")
}

pub async fn login(
    State(pool): State<Option<PgPool>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    validate_login(&request)?;

    let pool = pool.ok_or_else(|| ApiError::storage("database not configured"))?;

    let user = get_user_by_email(&pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login for unknown email");
            wrong_credentials()
        })?;

    if !user.check_password(&request.password) {
        tracing::warn!("Wrong password for user {}", user.id);
        return Err(wrong_credentials());
    }

    if !user.verify {
        tracing::warn!("Login attempt by unverified user {}", user.id);
        return Err(ApiError::validation("email", "Email not verified"));
    }

    let token = create_token(user.id).map_err(ApiError::storage)?;
    set_token(&pool, user.id, Some(&token)).await?;

    tracing::info!("User logged in: {}", user.id);

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(&user),
    }))
}
