/**
 * Contact Model
 *
 * The contact record and the request payload types accepted by the
 * contact handlers.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A contact record
///
/// `id` is generated at creation and immutable. `owner` is set by the
/// database store to scope every read and mutation to the creating user;
/// the single-tenant file store leaves it absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Uuid>,
}

/// Payload for creating a contact
///
/// Fields default to empty strings so that absent fields reach the
/// validation layer, which reports the first missing field by name.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Payload for a partial contact update
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Payload for the favorite toggle
///
/// `favorite` stays optional so its absence can be reported as its own
/// 400, distinct from schema validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FavoritePatch {
    pub favorite: Option<bool>,
}
