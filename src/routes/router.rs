/**
 * Router Assembly
 *
 * Combines the API route tables, static avatar serving, and the JSON 404
 * fallback into the final application router.
 */

use axum::{http::StatusCode, response::Json, Router};
use tower_http::services::ServeDir;

use crate::routes::api_routes::{contact_routes, user_routes};
use crate::server::state::AppState;

/// Create the application router
///
/// Route order: contact routes, user routes, static avatar files, then a
/// JSON 404 for anything else.
pub fn create_router(app_state: AppState) -> Router<()> {
    let avatars_dir = app_state.config.avatars_dir();

    Router::new()
        .merge(contact_routes(&app_state))
        .merge(user_routes(&app_state))
        .nest_service("/avatars", ServeDir::new(avatars_dir))
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "message": "Not found" })),
            )
        })
        .with_state(app_state)
}
