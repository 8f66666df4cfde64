/**
 * Application State
 *
 * `AppState` is the central state container: the database pool, the
 * contact store, the mail transport, and the configuration snapshot. The
 * database handle and mailer are initialized once at startup and injected
 * into handlers through state extraction rather than referenced
 * ambiently; optional services are `None` when not configured.
 *
 * The `FromRef` implementations let handlers extract just the part of the
 * state they need.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::contacts::store::ContactStore;
use crate::email::Mailer;
use crate::server::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// `None` if `DATABASE_URL` is not set; handlers report a storage
    /// failure when they need it and it is absent.
    pub db_pool: Option<PgPool>,

    /// Contact store backend selected at startup
    pub contacts: ContactStore,

    /// Mail transport, `None` when SMTP is not configured
    pub mailer: Option<Mailer>,

    /// Configuration snapshot
    pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for ContactStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.contacts.clone()
    }
}

impl FromRef<AppState> for Option<Mailer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.mailer.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
