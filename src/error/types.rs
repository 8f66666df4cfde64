/**
 * API Error Types
 *
 * This module defines the error type returned by handlers, stores, and
 * middleware. Each variant maps to a fixed HTTP status code; the response
 * body carries only the human-readable message.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// API error kinds
///
/// Every failure a handler can report is one of these variants. Storage
/// failures carry no message of their own: the underlying error is logged
/// at the point of conversion and the caller sees a generic message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input field (400)
    #[error("{message}")]
    Validation {
        /// The offending field
        field: String,
        /// Human-readable message naming the field
        message: String,
    },

    /// No record matching the given id or email (404)
    #[error("{message}")]
    NotFound { message: String },

    /// Duplicate unique key (409)
    #[error("{message}")]
    Conflict { message: String },

    /// Missing, invalid, expired, or superseded credential (401)
    ///
    /// The message is intentionally generic so callers cannot tell which
    /// of email or password was wrong.
    #[error("{message}")]
    Unauthorized { message: String },

    /// I/O or driver failure (500)
    #[error("Internal server error")]
    Storage,
}

impl ApiError {
    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for a required field that is absent or empty
    pub fn missing_field(field: &str) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: format!("missing required {field} field"),
        }
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a storage error, logging the underlying detail server-side
    pub fn storage(detail: impl std::fmt::Display) -> Self {
        tracing::error!("storage error: {}", detail);
        Self::Storage
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message exposed to the caller
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::NotFound { message } => message.clone(),
            Self::Conflict { message } => message.clone(),
            Self::Unauthorized { message } => message.clone(),
            Self::Storage => "Internal server error".to_string(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::storage(err)
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::storage(err)
    }
}
