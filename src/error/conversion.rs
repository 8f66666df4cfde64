/**
 * Error Conversion
 *
 * This module converts API errors into HTTP responses so handlers can
 * return them directly.
 *
 * # Response Format
 *
 * Error responses are returned as JSON:
 * ```json
 * {
 *   "message": "Contact with id ... not found"
 * }
 * ```
 */

use axum::response::{IntoResponse, Json, Response};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({ "message": self.message() });

        (status, Json(body)).into_response()
    }
}
