//! Route Configuration
//!
//! - **`api_routes`** - the API route tables (contacts, users)
//! - **`router`** - top-level router assembly (static files, fallback)

pub mod api_routes;
pub mod router;
