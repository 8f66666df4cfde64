//! Auth Module
//!
//! User accounts and session tokens:
//!
//! - **`sessions`** - JWT creation and verification (5-day expiry)
//! - **`users`** - user storage and password hashing
//! - **`handlers`** - signup, login, logout, current user, email
//!   verification, and avatar upload

pub mod handlers;
pub mod sessions;
pub mod users;

pub use handlers::{
    current_user, login, logout, resend_verification, signup, update_avatar, verify_email,
};
