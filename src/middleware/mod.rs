//! Request Middleware
//!
//! - **`auth`** - bearer-token authentication for protected routes

pub mod auth;
