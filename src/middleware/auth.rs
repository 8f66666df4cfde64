/**
 * Authentication Middleware
 *
 * Protects routes that require a logged-in user. Per request:
 *
 * 1. Extract the bearer token from the Authorization header
 * 2. Verify the token signature and expiry
 * 3. Resolve the user from the token subject
 * 4. Compare the presented token against the one stored on the user;
 *    a superseded or nulled token is rejected
 * 5. Attach the resolved user to request extensions
 *
 * Every failure mode is a generic 401; callers cannot distinguish a
 * missing header from an expired or superseded token.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::sessions::verify_token;
use crate::auth::users::get_user_by_id;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Authenticated user data attached to request extensions
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub subscription: String,
    pub avatar_url: String,
}

fn not_authorized() -> ApiError {
    ApiError::unauthorized("Not authorized")
}

/// Check a presented token against the one stored on the user record
///
/// A nulled token (logout) or a different stored token (newer login)
/// rejects the presented one.
pub fn stored_token_matches(stored: Option<&str>, presented: &str) -> bool {
    stored == Some(presented)
}

/// Authentication middleware for protected routes
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            not_authorized()
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        not_authorized()
    })?;

    let claims = verify_token(token).map_err(|err| {
        tracing::warn!("Invalid token: {:?}", err);
        not_authorized()
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|err| {
        tracing::warn!("Invalid user ID in token: {:?}", err);
        not_authorized()
    })?;

    let pool = state
        .db_pool
        .as_ref()
        .ok_or_else(|| ApiError::storage("database not configured"))?;

    let user = get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token subject not found: {}", user_id);
            not_authorized()
        })?;

    if !stored_token_matches(user.token.as_deref(), token) {
        tracing::warn!("Superseded or cleared token for user {}", user.id);
        return Err(not_authorized());
    }

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        email: user.email,
        subscription: user.subscription,
        avatar_url: user.avatar_url,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Handlers behind `require_auth` take this as a parameter to receive the
/// user resolved by the middleware.
#[derive(Clone, Debug)]
pub struct AuthUser(pub CurrentUser);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("CurrentUser not found in request extensions");
                not_authorized()
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_token_matches() {
        assert!(stored_token_matches(Some("abc"), "abc"));
    }

    #[test]
    fn test_cleared_token_rejected() {
        // Logout nulls the stored token; any presented token must fail
        assert!(!stored_token_matches(None, "abc"));
    }

    #[test]
    fn test_superseded_token_rejected() {
        // A newer login replaces the stored token; the old one must fail
        assert!(!stored_token_matches(Some("newer"), "older"));
    }

    #[tokio::test]
    async fn test_extractor_with_user_in_extensions() {
        let mut request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();

        let user = CurrentUser {
            id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            subscription: "starter".to_string(),
            avatar_url: "/avatars/x.png".to_string(),
        };
        request.extensions_mut().insert(user.clone());

        let (mut parts, _) = request.into_parts();
        let extracted = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(extracted.0.id, user.id);
        assert_eq!(extracted.0.email, user.email);
    }

    #[tokio::test]
    async fn test_extractor_without_user() {
        let request = axum::http::Request::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();

        let (mut parts, _) = request.into_parts();
        let result = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    }
}
