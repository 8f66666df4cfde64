/**
 * Phonebook API Library
 *
 * A contacts-management REST API with user authentication. Contacts are
 * owner-scoped CRUD records; users sign up, verify their email, log in to
 * receive a bearer token, and may upload an avatar image.
 */

/// JWT sessions, user storage, and user-facing handlers
pub mod auth;

/// Contact model, stores (database and file-backed), and handlers
pub mod contacts;

/// Outgoing email (verification links)
pub mod email;

/// API error types and HTTP response conversion
pub mod error;

/// Extractor wrappers keeping rejection bodies in the API error shape
pub mod extract;

/// Request middleware (bearer-token authentication)
pub mod middleware;

/// Route configuration
pub mod routes;

/// Server configuration, state, and initialization
pub mod server;

/// Request payload validation
pub mod validation;
