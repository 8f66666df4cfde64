/**
 * File-Backed Contact Store
 *
 * Persists contacts as a pretty-printed JSON array of
 * `{id, name, email, phone, favorite?}` objects. Every operation reads the
 * entire collection, mutates it in memory, and rewrites the whole file.
 *
 * The rewrite is not atomic across concurrent writers: two interleaved
 * mutations race and the last write wins, silently discarding the other.
 * This preserves the observed single-writer behavior of the format; the
 * database backend is the multi-writer option.
 *
 * The store is single-tenant: records carry no owner and contact emails
 * are unique within the file.
 */

use std::path::PathBuf;

use uuid::Uuid;

use crate::contacts::model::{Contact, ContactPatch, NewContact};
use crate::error::ApiError;

/// Flat-file JSON contact store
#[derive(Debug, Clone)]
pub struct FileContacts {
    path: PathBuf,
}

impl FileContacts {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// List all contacts in file order
    pub async fn list(&self) -> Result<Vec<Contact>, ApiError> {
        self.read_all().await
    }

    /// Get a contact by id, or `None` if absent
    pub async fn get(&self, id: Uuid) -> Result<Option<Contact>, ApiError> {
        let contacts = self.read_all().await?;
        Ok(contacts.into_iter().find(|contact| contact.id == id))
    }

    /// Append a contact with a fresh id and rewrite the file
    pub async fn add(&self, fields: NewContact) -> Result<Contact, ApiError> {
        let mut contacts = self.read_all().await?;

        let contact = Contact {
            id: Uuid::new_v4(),
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            favorite: false,
            owner: None,
        };
        contacts.push(contact.clone());

        self.write_all(&contacts).await?;
        Ok(contact)
    }

    /// Remove a contact, returning the removed record or `None` if absent
    pub async fn remove(&self, id: Uuid) -> Result<Option<Contact>, ApiError> {
        let mut contacts = self.read_all().await?;

        let Some(index) = contacts.iter().position(|contact| contact.id == id) else {
            return Ok(None);
        };
        let removed = contacts.remove(index);

        self.write_all(&contacts).await?;
        Ok(Some(removed))
    }

    /// Apply a partial update, returning the updated record or `None`
    pub async fn update(
        &self,
        id: Uuid,
        fields: ContactPatch,
    ) -> Result<Option<Contact>, ApiError> {
        let mut contacts = self.read_all().await?;

        let Some(contact) = contacts.iter_mut().find(|contact| contact.id == id) else {
            return Ok(None);
        };
        if let Some(name) = fields.name {
            contact.name = name;
        }
        if let Some(email) = fields.email {
            contact.email = email;
        }
        if let Some(phone) = fields.phone {
            contact.phone = phone;
        }
        let updated = contact.clone();

        self.write_all(&contacts).await?;
        Ok(Some(updated))
    }

    /// Set the favorite flag, returning the updated record or `None`
    pub async fn set_favorite(
        &self,
        id: Uuid,
        favorite: bool,
    ) -> Result<Option<Contact>, ApiError> {
        let mut contacts = self.read_all().await?;

        let Some(contact) = contacts.iter_mut().find(|contact| contact.id == id) else {
            return Ok(None);
        };
        contact.favorite = favorite;
        let updated = contact.clone();

        self.write_all(&contacts).await?;
        Ok(Some(updated))
    }

    /// Check whether a contact with this email already exists
    pub async fn email_in_use(&self, email: &str) -> Result<bool, ApiError> {
        let contacts = self.read_all().await?;
        Ok(contacts.iter().any(|contact| contact.email == email))
    }

    /// Read the whole collection; a missing file is an empty collection
    async fn read_all(&self) -> Result<Vec<Contact>, ApiError> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_slice(&data)?)
    }

    /// Rewrite the whole collection, pretty-printed
    async fn write_all(&self, contacts: &[Contact]) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec_pretty(contacts)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store(dir: &tempfile::TempDir) -> FileContacts {
        FileContacts::new(dir.path().join("contacts.json"))
    }

    fn ann() -> NewContact {
        NewContact {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            phone: "123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        assert_eq!(store.list().await.unwrap(), Vec::new());
    }

    #[tokio::test]
    async fn test_add_then_get_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let added = store.add(ann()).await.unwrap();
        assert!(!added.id.is_nil());
        assert!(!added.favorite);

        let fetched = store.get(added.id).await.unwrap().unwrap();
        assert_eq!(fetched, added);
        assert_eq!(fetched.name, "Ann");
        assert_eq!(fetched.email, "ann@x.com");
        assert_eq!(fetched.phone, "123");
    }

    #[tokio::test]
    async fn test_unknown_id_is_none_everywhere() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let id = Uuid::new_v4();

        assert!(store.get(id).await.unwrap().is_none());
        assert!(store.remove(id).await.unwrap().is_none());
        assert!(store
            .update(id, ContactPatch::default())
            .await
            .unwrap()
            .is_none());
        assert!(store.set_favorite(id, true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partial_update_leaves_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let added = store.add(ann()).await.unwrap();
        let patch = ContactPatch {
            phone: Some("456".to_string()),
            ..Default::default()
        };
        let updated = store.update(added.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.phone, "456");
        assert_eq!(updated.name, "Ann");
        assert_eq!(updated.email, "ann@x.com");

        let fetched = store.get(added.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_set_favorite_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let added = store.add(ann()).await.unwrap();
        let updated = store.set_favorite(added.id, true).await.unwrap().unwrap();
        assert!(updated.favorite);

        let fetched = store.get(added.id).await.unwrap().unwrap();
        assert!(fetched.favorite);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_and_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let ann = store.add(ann()).await.unwrap();
        let bob = store
            .add(NewContact {
                name: "Bob".to_string(),
                email: "bob@x.com".to_string(),
                phone: "789".to_string(),
            })
            .await
            .unwrap();

        assert!(store.remove(ann.id).await.unwrap().is_some());
        assert!(store.remove(ann.id).await.unwrap().is_none());

        // The other record is untouched
        let remaining = store.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, bob.id);
    }

    #[tokio::test]
    async fn test_email_in_use() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store.add(ann()).await.unwrap();
        assert!(store.email_in_use("ann@x.com").await.unwrap());
        assert!(!store.email_in_use("bob@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_file_format_is_pretty_printed_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        let store = FileContacts::new(&path);

        store.add(ann()).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with('['));
        assert!(raw.contains('\n'));

        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &parsed.as_array().unwrap()[0];
        assert!(first.get("id").is_some());
        assert_eq!(first["name"], "Ann");
        assert_eq!(first["favorite"], false);
        // Single-tenant records carry no owner field
        assert!(first.get("owner").is_none());
    }

    #[tokio::test]
    async fn test_reads_records_without_favorite_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");
        std::fs::write(
            &path,
            format!(
                r#"[{{"id":"{}","name":"Old","email":"old@x.com","phone":"1"}}]"#,
                Uuid::new_v4()
            ),
        )
        .unwrap();

        let store = FileContacts::new(&path);
        let contacts = store.list().await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert!(!contacts[0].favorite);
    }
}
