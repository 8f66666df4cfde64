//! Contacts Module
//!
//! Contact records and the two store backends:
//!
//! - **`store`** - the `ContactStore` front and its database (sqlx) backend,
//!   owner-scoped per authenticated user
//! - **`file_store`** - single-tenant flat-file JSON backend, whole-file
//!   rewrite per mutation
//! - **`model`** - the `Contact` record and request payload types
//! - **`handlers`** - HTTP handlers for `/api/contacts`

pub mod file_store;
pub mod handlers;
pub mod model;
pub mod store;

pub use file_store::FileContacts;
pub use model::Contact;
pub use store::ContactStore;
