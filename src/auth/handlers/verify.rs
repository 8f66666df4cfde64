/**
 * Email Verification Handlers
 *
 * GET /api/users/verify/{token} - consume a verification token exactly
 * once: verify flips to true, the token is nulled, and the transition is
 * irreversible. Unknown tokens (including already-consumed ones) are 404.
 *
 * POST /api/users/verify - resend the verification email for an address
 * that has not verified yet.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::auth::handlers::types::ResendRequest;
use crate::auth::users::{confirm_verification, get_user_by_email, get_user_by_verification_token};
use crate::email::Mailer;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::validation::is_valid_email;

pub async fn verify_email(
    State(pool): State<Option<PgPool>>,
    ApiPath(token): ApiPath<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = pool.ok_or_else(|| ApiError::storage("database not configured"))?;

    let user = get_user_by_verification_token(&pool, &token)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    confirm_verification(&pool, user.id).await?;
    tracing::info!("User verified: {}", user.id);

    Ok(Json(serde_json::json!({ "message": "Verification successful" })))
}

pub async fn resend_verification(
    State(pool): State<Option<PgPool>>,
    State(mailer): State<Option<Mailer>>,
    ApiJson(request): ApiJson<ResendRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if request.email.is_empty() {
        return Err(ApiError::missing_field("email"));
    }
    if !is_valid_email(&request.email) {
        return Err(ApiError::validation("email", "email must be a valid email"));
    }

    let pool = pool.ok_or_else(|| ApiError::storage("database not configured"))?;

    let user = get_user_by_email(&pool, &request.email)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if user.verify {
        return Err(ApiError::validation(
            "email",
            "Verification has already been passed",
        ));
    }

    // An unverified user always still holds their verification token
    let token = user.verification_token.as_deref().ok_or_else(|| {
        ApiError::storage(format!("unverified user {} has no verification token", user.id))
    })?;

    match &mailer {
        Some(mailer) => mailer.send_verification(&user.email, token).await,
        None => tracing::warn!("Mail transport not configured, skipping verification email"),
    }

    Ok(Json(serde_json::json!({ "message": "Verification email sent" })))
}
