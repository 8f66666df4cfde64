/**
 * Contact Store
 *
 * `ContactStore` fronts the two observed backends behind one contract:
 *
 * - `Database` - a sqlx/Postgres collection, scoped to the owning user on
 *   every operation; consistency is delegated to the engine's per-row
 *   atomicity, no cross-row transactions.
 * - `File` - a flat-file JSON array, single-tenant, whole-file rewrite per
 *   mutation (see `file_store`).
 *
 * All lookups by id return `Ok(None)` for unknown ids rather than an
 * error; handlers translate `None` to 404.
 */

use std::path::PathBuf;

use sqlx::PgPool;
use uuid::Uuid;

use crate::contacts::file_store::FileContacts;
use crate::contacts::model::{Contact, ContactPatch, NewContact};
use crate::error::ApiError;

/// Contact store backends
#[derive(Clone)]
pub enum ContactStore {
    /// Owner-scoped database collection
    Database(PgPool),
    /// Single-tenant flat-file JSON store
    File(FileContacts),
}

impl ContactStore {
    pub fn database(pool: PgPool) -> Self {
        Self::Database(pool)
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(FileContacts::new(path))
    }

    /// List all contacts visible to `owner`
    pub async fn list(&self, owner: Uuid) -> Result<Vec<Contact>, ApiError> {
        match self {
            Self::Database(pool) => Ok(db_list(pool, owner).await?),
            Self::File(store) => store.list().await,
        }
    }

    /// Get a contact by id, or `None` if absent
    pub async fn get(&self, owner: Uuid, id: Uuid) -> Result<Option<Contact>, ApiError> {
        match self {
            Self::Database(pool) => Ok(db_get(pool, owner, id).await?),
            Self::File(store) => store.get(id).await,
        }
    }

    /// Add a contact, assigning a fresh id (favorite defaults to false)
    pub async fn add(&self, owner: Uuid, fields: NewContact) -> Result<Contact, ApiError> {
        match self {
            Self::Database(pool) => Ok(db_add(pool, owner, fields).await?),
            Self::File(store) => store.add(fields).await,
        }
    }

    /// Remove a contact, returning the removed record or `None` if absent
    pub async fn remove(&self, owner: Uuid, id: Uuid) -> Result<Option<Contact>, ApiError> {
        match self {
            Self::Database(pool) => Ok(db_remove(pool, owner, id).await?),
            Self::File(store) => store.remove(id).await,
        }
    }

    /// Apply a partial update, returning the updated record or `None`
    pub async fn update(
        &self,
        owner: Uuid,
        id: Uuid,
        fields: ContactPatch,
    ) -> Result<Option<Contact>, ApiError> {
        match self {
            Self::Database(pool) => Ok(db_update(pool, owner, id, fields).await?),
            Self::File(store) => store.update(id, fields).await,
        }
    }

    /// Set the favorite flag, returning the updated record or `None`
    pub async fn set_favorite(
        &self,
        owner: Uuid,
        id: Uuid,
        favorite: bool,
    ) -> Result<Option<Contact>, ApiError> {
        match self {
            Self::Database(pool) => Ok(db_set_favorite(pool, owner, id, favorite).await?),
            Self::File(store) => store.set_favorite(id, favorite).await,
        }
    }

    /// Check whether `owner` already has a contact with this email
    ///
    /// Only consulted when the contact-email uniqueness policy is enabled.
    pub async fn email_in_use(&self, owner: Uuid, email: &str) -> Result<bool, ApiError> {
        match self {
            Self::Database(pool) => Ok(db_email_in_use(pool, owner, email).await?),
            Self::File(store) => store.email_in_use(email).await,
        }
    }
}

async fn db_list(pool: &PgPool, owner: Uuid) -> Result<Vec<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>(
        r#"
        SELECT id, name, email, phone, favorite, owner
        FROM contacts
        WHERE owner = $1
        ORDER BY name
        "#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await
}

async fn db_get(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<Option<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>(
        r#"
        SELECT id, name, email, phone, favorite, owner
        FROM contacts
        WHERE id = $1 AND owner = $2
        "#,
    )
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

async fn db_add(pool: &PgPool, owner: Uuid, fields: NewContact) -> Result<Contact, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = chrono::Utc::now();

    sqlx::query_as::<_, Contact>(
        r#"
        INSERT INTO contacts (id, name, email, phone, favorite, owner, created_at, updated_at)
        VALUES ($1, $2, $3, $4, FALSE, $5, $6, $6)
        RETURNING id, name, email, phone, favorite, owner
        "#,
    )
    .bind(id)
    .bind(&fields.name)
    .bind(&fields.email)
    .bind(&fields.phone)
    .bind(owner)
    .bind(now)
    .fetch_one(pool)
    .await
}

async fn db_remove(pool: &PgPool, owner: Uuid, id: Uuid) -> Result<Option<Contact>, sqlx::Error> {
    sqlx::query_as::<_, Contact>(
        r#"
        DELETE FROM contacts
        WHERE id = $1 AND owner = $2
        RETURNING id, name, email, phone, favorite, owner
        "#,
    )
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

async fn db_update(
    pool: &PgPool,
    owner: Uuid,
    id: Uuid,
    fields: ContactPatch,
) -> Result<Option<Contact>, sqlx::Error> {
    let now = chrono::Utc::now();

    sqlx::query_as::<_, Contact>(
        r#"
        UPDATE contacts
        SET name = COALESCE($1, name),
            email = COALESCE($2, email),
            phone = COALESCE($3, phone),
            updated_at = $4
        WHERE id = $5 AND owner = $6
        RETURNING id, name, email, phone, favorite, owner
        "#,
    )
    .bind(fields.name)
    .bind(fields.email)
    .bind(fields.phone)
    .bind(now)
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

async fn db_set_favorite(
    pool: &PgPool,
    owner: Uuid,
    id: Uuid,
    favorite: bool,
) -> Result<Option<Contact>, sqlx::Error> {
    let now = chrono::Utc::now();

    sqlx::query_as::<_, Contact>(
        r#"
        UPDATE contacts
        SET favorite = $1, updated_at = $2
        WHERE id = $3 AND owner = $4
        RETURNING id, name, email, phone, favorite, owner
        "#,
    )
    .bind(favorite)
    .bind(now)
    .bind(id)
    .bind(owner)
    .fetch_optional(pool)
    .await
}

async fn db_email_in_use(pool: &PgPool, owner: Uuid, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (SELECT 1 FROM contacts WHERE owner = $1 AND email = $2)
        "#,
    )
    .bind(owner)
    .bind(email)
    .fetch_one(pool)
    .await
}
