/**
 * Server Initialization
 *
 * Builds the application: configuration snapshot, optional services
 * (database, mailer), contact store selection, working directories, and
 * the router.
 *
 * # Contact store selection
 *
 * - `CONTACTS_FILE` set: flat-file JSON store at that path
 * - otherwise, database configured: owner-scoped database store
 * - otherwise: flat-file store at `data/contacts.json`
 *
 * # Resilience
 *
 * Missing optional services are logged and the server starts without
 * them. Auth and user routes need the database and report a storage
 * failure per-request when it is absent.
 */

use std::sync::Arc;

use axum::Router;

use crate::contacts::store::ContactStore;
use crate::email::Mailer;
use crate::routes::router::create_router;
use crate::server::config::{load_database, AppConfig};
use crate::server::state::AppState;

/// Default contacts file when neither a database nor an explicit path is
/// configured
const DEFAULT_CONTACTS_FILE: &str = "data/contacts.json";

pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing phonebook server");

    let config = Arc::new(AppConfig::from_env());
    let db_pool = load_database().await;

    let contacts = match std::env::var("CONTACTS_FILE") {
        Ok(path) => {
            tracing::info!("Using file-backed contact store at {}", path);
            ContactStore::file(path)
        }
        Err(_) => match &db_pool {
            Some(pool) => ContactStore::database(pool.clone()),
            None => {
                tracing::warn!(
                    "No database available, using file-backed contact store at {}",
                    DEFAULT_CONTACTS_FILE
                );
                ContactStore::file(DEFAULT_CONTACTS_FILE)
            }
        },
    };

    let mailer = Mailer::from_env();
    if mailer.is_none() {
        tracing::warn!("SMTP not configured. Verification emails will not be sent.");
    }

    for dir in [config.tmp_dir.clone(), config.avatars_dir()] {
        if let Err(err) = tokio::fs::create_dir_all(&dir).await {
            tracing::error!("Failed to create directory {:?}: {}", dir, err);
        }
    }

    let app_state = AppState {
        db_pool,
        contacts,
        mailer,
        config,
    };

    create_router(app_state)
}
