/**
 * Request Payload Validation
 *
 * Schema checks for incoming payloads, applied before any store mutation.
 * Each validator reports the first failing field with a message naming it;
 * a rejection short-circuits the request with 400 and never touches storage.
 *
 * # Schemas
 *
 * - `signup` - email (valid shape) and password (minimum 6 characters)
 * - `login` - email (valid shape) and password (present)
 * - `contact_create` - name, email, phone all required; email valid shape
 * - `contact_update` - at least one field present; present fields non-empty,
 *   email valid shape
 */

use crate::auth::handlers::types::{LoginRequest, SignupRequest};
use crate::contacts::model::{ContactPatch, NewContact};
use crate::error::ApiError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check that an email has a local@domain shape
///
/// Accepts exactly one `@` with a non-empty local part and a domain that
/// contains an interior dot. This is a syntactic check only.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.chars().any(char::is_whitespace) || domain.contains('@') {
        return false;
    }

    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Validate a signup payload
pub fn validate_signup(request: &SignupRequest) -> Result<(), ApiError> {
    if request.email.is_empty() {
        return Err(ApiError::missing_field("email"));
    }
    if !is_valid_email(&request.email) {
        return Err(ApiError::validation("email", "email must be a valid email"));
    }
    if request.password.is_empty() {
        return Err(ApiError::missing_field("password"));
    }
    if request.password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(
            "password",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

/// Validate a login payload
pub fn validate_login(request: &LoginRequest) -> Result<(), ApiError> {
    if request.email.is_empty() {
        return Err(ApiError::missing_field("email"));
    }
    if !is_valid_email(&request.email) {
        return Err(ApiError::validation("email", "email must be a valid email"));
    }
    if request.password.is_empty() {
        return Err(ApiError::missing_field("password"));
    }
    Ok(())
}

/// Validate a contact creation payload
pub fn validate_contact_create(payload: &NewContact) -> Result<(), ApiError> {
    if payload.name.is_empty() {
        return Err(ApiError::missing_field("name"));
    }
    if payload.email.is_empty() {
        return Err(ApiError::missing_field("email"));
    }
    if !is_valid_email(&payload.email) {
        return Err(ApiError::validation("email", "email must be a valid email"));
    }
    if payload.phone.is_empty() {
        return Err(ApiError::missing_field("phone"));
    }
    Ok(())
}

/// Validate a contact update payload
///
/// Partial updates are allowed, but the body must carry at least one field
/// and every present field must pass the same checks as creation.
pub fn validate_contact_update(payload: &ContactPatch) -> Result<(), ApiError> {
    if payload.name.is_none() && payload.email.is_none() && payload.phone.is_none() {
        return Err(ApiError::validation("body", "missing fields"));
    }
    if let Some(name) = &payload.name {
        if name.is_empty() {
            return Err(ApiError::missing_field("name"));
        }
    }
    if let Some(email) = &payload.email {
        if !is_valid_email(email) {
            return Err(ApiError::validation("email", "email must be a valid email"));
        }
    }
    if let Some(phone) = &payload.phone {
        if phone.is_empty() {
            return Err(ApiError::missing_field("phone"));
        }
    }
    Ok(())
}
