//! API Error Module
//!
//! This module defines the closed set of error kinds used throughout the
//! API and their conversion to HTTP responses.
//!
//! # Module Structure
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # Error Kinds
//!
//! - `Validation` - malformed or missing input field (400, names the field)
//! - `NotFound` - no record for the given id or email (404)
//! - `Conflict` - duplicate unique key (409)
//! - `Unauthorized` - missing, invalid, expired, or superseded credential (401)
//! - `Storage` - I/O or driver failure (500, detail logged server-side only)
//!
//! Validation and auth checks short-circuit before any store mutation.
//! Storage errors are translated to a generic 500 at the handler boundary;
//! the underlying error is logged and never leaked to the caller.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::ApiError;
