/**
 * Signup Handler
 *
 * POST /api/users/signup
 *
 * 1. Validate email shape and password length
 * 2. Reject duplicate emails with 409, leaving the existing record alone
 * 3. Hash the password (bcrypt)
 * 4. Create the user, unverified, with a placeholder avatar and a fresh
 *    verification token
 * 5. Dispatch the verification email (failures logged, non-fatal; the
 *    token stays valid for the resend endpoint)
 *
 * Responds 201 with the public user fields. No session token is issued
 * until the user verifies and logs in.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::handlers::types::{SignupRequest, SignupResponse, UserResponse};
use crate::auth::users::{create_user, get_user_by_email, hash_password, placeholder_avatar};
use crate::email::Mailer;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::validation::validate_signup;

pub async fn signup(
    State(pool): State<Option<PgPool>>,
    State(mailer): State<Option<Mailer>>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    validate_signup(&request)?;

    let pool = pool.ok_or_else(|| ApiError::storage("database not configured"))?;

    if get_user_by_email(&pool, &request.email).await?.is_some() {
        tracing::warn!("Signup with email already on file");
        return Err(ApiError::conflict("Email already in use"));
    }

    let password_hash = hash_password(&request.password).map_err(ApiError::storage)?;
    let verification_token = Uuid::new_v4().to_string();
    let avatar_url = placeholder_avatar(&request.email);

    let user = create_user(
        &pool,
        &request.email,
        &password_hash,
        &avatar_url,
        &verification_token,
    )
    .await?;

    match &mailer {
        Some(mailer) => {
            mailer
                .send_verification(&user.email, &verification_token)
                .await;
        }
        None => tracing::warn!("Mail transport not configured, skipping verification email"),
    }

    tracing::info!("User created: {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: UserResponse::from(&user),
        }),
    ))
}
