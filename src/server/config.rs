/**
 * Server Configuration
 *
 * Configuration is loaded from environment variables with sensible
 * defaults for local development. Optional services that fail to
 * initialize are set to `None` and the server continues without them.
 *
 * # Variables
 *
 * - `DATABASE_URL` - Postgres connection string (optional; without it the
 *   contact store falls back to the flat-file backend and all user/auth
 *   routes report a storage failure)
 * - `JWT_SECRET` - token-signing secret (read by the sessions module)
 * - `SERVER_PORT` - listen port, default 3000
 * - `BASE_URL` - public base URL used in verification links
 * - `PUBLIC_DIR` / `TMP_DIR` - avatar serving and upload staging dirs
 * - `CONTACTS_FILE` - force the file-backed contact store at this path
 * - `CONTACT_EMAIL_UNIQUE` - enforce per-owner contact email uniqueness
 * - `SMTP_HOST` / `SMTP_USER` / `SMTP_PASS` / `SMTP_FROM` - mail transport
 */

use std::path::PathBuf;

use sqlx::PgPool;

/// Application configuration snapshot taken at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory served publicly (avatars live under it)
    pub public_dir: PathBuf,
    /// Staging directory for uploads
    pub tmp_dir: PathBuf,
    /// Enforce per-owner contact email uniqueness
    pub unique_contact_email: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let public_dir = std::env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string());
        let tmp_dir = std::env::var("TMP_DIR").unwrap_or_else(|_| "tmp".to_string());
        let unique_contact_email = std::env::var("CONTACT_EMAIL_UNIQUE")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            public_dir: PathBuf::from(public_dir),
            tmp_dir: PathBuf::from(tmp_dir),
            unique_contact_email,
        }
    }

    /// Directory avatar images are moved into after upload
    pub fn avatars_dir(&self) -> PathBuf {
        self.public_dir.join("avatars")
    }
}

/// Database configuration result
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize the database connection pool
///
/// Reads `DATABASE_URL`, connects, and runs migrations. Errors are logged
/// but do not prevent server startup; the function returns `None` on any
/// error and database features are disabled.
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!("Failed to create database connection pool: {:?}", err);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created");

    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed"),
        Err(err) => {
            // Migrations may already have been applied by an earlier run
            tracing::error!("Failed to run database migrations: {:?}", err);
            tracing::warn!("Continuing without migrations");
        }
    }

    Some(pool)
}
