//! User-Facing Auth Handlers
//!
//! One module per concern:
//!
//! - **`signup`** - POST /api/users/signup
//! - **`login`** - POST /api/users/login
//! - **`session`** - GET /api/users/logout, GET /api/users/current
//! - **`verify`** - GET /api/users/verify/{token}, POST /api/users/verify
//! - **`avatar`** - PATCH /api/users/avatars
//! - **`types`** - shared request/response payloads

pub mod avatar;
pub mod login;
pub mod session;
pub mod signup;
pub mod types;
pub mod verify;

pub use avatar::update_avatar;
pub use login::login;
pub use session::{current_user, logout};
pub use signup::signup;
pub use verify::{resend_verification, verify_email};
