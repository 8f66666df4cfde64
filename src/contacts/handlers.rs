/**
 * Contact Handlers
 *
 * One handler per (route, method) pair under `/api/contacts`. Each handler
 * validates its payload, scopes the store call to the authenticated user,
 * and maps store results to status codes:
 *
 * - list/get/update success: 200 with the resource
 * - create success: 201 with the created resource
 * - delete success: 200 with a confirmation message
 * - unknown id: 404 naming the id
 * - validation failure: 400 naming the first failing field
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use uuid::Uuid;

use crate::contacts::model::{Contact, ContactPatch, FavoritePatch, NewContact};
use crate::contacts::store::ContactStore;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::auth::AuthUser;
use crate::server::config::AppConfig;
use crate::validation::{validate_contact_create, validate_contact_update};

fn contact_not_found(id: Uuid) -> ApiError {
    ApiError::not_found(format!("Contact with id {id} not found"))
}

/// Absence of the favorite field is its own 400, distinct from schema
/// validation.
fn require_favorite(payload: FavoritePatch) -> Result<bool, ApiError> {
    payload
        .favorite
        .ok_or_else(|| ApiError::validation("favorite", "Missing field favorite"))
}

/// GET /api/contacts
pub async fn list_contacts(
    State(store): State<ContactStore>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = store.list(user.id).await?;
    Ok(Json(contacts))
}

/// GET /api/contacts/{id}
pub async fn get_contact(
    State(store): State<ContactStore>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Contact>, ApiError> {
    let contact = store
        .get(user.id, id)
        .await?
        .ok_or_else(|| contact_not_found(id))?;
    Ok(Json(contact))
}

/// POST /api/contacts
pub async fn add_contact(
    State(store): State<ContactStore>,
    State(config): State<Arc<AppConfig>>,
    AuthUser(user): AuthUser,
    ApiJson(payload): ApiJson<NewContact>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    validate_contact_create(&payload)?;

    // Contact email uniqueness is a configurable policy; it was only ever
    // enforced in the single-tenant variant of the original service.
    if config.unique_contact_email && store.email_in_use(user.id, &payload.email).await? {
        return Err(ApiError::conflict("Contact email already in use"));
    }

    let contact = store.add(user.id, payload).await?;
    tracing::info!("Contact {} created for user {}", contact.id, user.id);

    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT /api/contacts/{id}
pub async fn update_contact(
    State(store): State<ContactStore>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<ContactPatch>,
) -> Result<Json<Contact>, ApiError> {
    validate_contact_update(&payload)?;

    let contact = store
        .update(user.id, id, payload)
        .await?
        .ok_or_else(|| contact_not_found(id))?;
    Ok(Json(contact))
}

/// PATCH /api/contacts/{id}/favorite
pub async fn set_favorite(
    State(store): State<ContactStore>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<FavoritePatch>,
) -> Result<Json<Contact>, ApiError> {
    let favorite = require_favorite(payload)?;

    let contact = store
        .set_favorite(user.id, id, favorite)
        .await?
        .ok_or_else(|| contact_not_found(id))?;
    Ok(Json(contact))
}

/// DELETE /api/contacts/{id}
pub async fn remove_contact(
    State(store): State<ContactStore>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    store
        .remove(user.id, id)
        .await?
        .ok_or_else(|| contact_not_found(id))?;

    tracing::info!("Contact {} deleted for user {}", id, user.id);
    Ok(Json(serde_json::json!({ "message": "Contact deleted" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_patch_without_field_is_400() {
        let err = require_favorite(FavoritePatch::default()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Missing field favorite");
    }

    #[test]
    fn test_favorite_patch_with_field() {
        let patch = FavoritePatch {
            favorite: Some(true),
        };
        assert!(require_favorite(patch).unwrap());

        let patch = FavoritePatch {
            favorite: Some(false),
        };
        assert!(!require_favorite(patch).unwrap());
    }
}
