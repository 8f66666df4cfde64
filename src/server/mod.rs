//! Server Module
//!
//! - **`config`** - environment configuration and database loading
//! - **`state`** - `AppState` and Axum state extraction
//! - **`init`** - application assembly

pub mod config;
pub mod init;
pub mod state;
