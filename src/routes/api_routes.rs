/**
 * API Route Tables
 *
 * # Contacts (all behind auth)
 *
 * - `GET    /api/contacts`                - list
 * - `POST   /api/contacts`                - create
 * - `GET    /api/contacts/{id}`           - fetch one
 * - `PUT    /api/contacts/{id}`           - update
 * - `DELETE /api/contacts/{id}`           - delete
 * - `PATCH  /api/contacts/{id}/favorite`  - toggle favorite
 *
 * # Users
 *
 * Public:
 * - `POST /api/users/signup`
 * - `POST /api/users/login`
 * - `GET  /api/users/verify/{token}`
 * - `POST /api/users/verify` (resend)
 *
 * Behind auth:
 * - `GET   /api/users/logout`
 * - `GET   /api/users/current`
 * - `PATCH /api/users/avatars` (multipart, 5 MB limit)
 */

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::auth::handlers::{
    current_user, login, logout, resend_verification, signup, update_avatar, verify_email,
};
use crate::contacts::handlers::{
    add_contact, get_contact, list_contacts, remove_contact, set_favorite, update_contact,
};
use crate::middleware::auth::require_auth;
use crate::server::state::AppState;

/// Upload size limit for avatar images
const AVATAR_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Contact routes; every route requires a valid bearer token
pub fn contact_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/contacts", get(list_contacts).post(add_contact))
        .route(
            "/api/contacts/{id}",
            get(get_contact).put(update_contact).delete(remove_contact),
        )
        .route("/api/contacts/{id}/favorite", patch(set_favorite))
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ))
}

/// User routes, split into public and token-protected tables
pub fn user_routes(app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/users/signup", post(signup))
        .route("/api/users/login", post(login))
        .route("/api/users/verify/{token}", get(verify_email))
        .route("/api/users/verify", post(resend_verification));

    let protected = Router::new()
        .route("/api/users/logout", get(logout))
        .route("/api/users/current", get(current_user))
        .route(
            "/api/users/avatars",
            patch(update_avatar).layer(DefaultBodyLimit::max(AVATAR_BODY_LIMIT)),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    public.merge(protected)
}
