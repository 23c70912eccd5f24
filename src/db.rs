use crate::repositories::{PgUserRepository, SqliteUserRepository, UserRepository};
use sqlx::{postgres::PgPoolOptions, sqlite::SqlitePoolOptions};
use std::sync::Arc;

/// Store backends, picked from the scheme of the connection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(database_url: &str) -> Option<Self> {
        if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
            Some(Backend::Postgres)
        } else if database_url.starts_with("sqlite:") {
            Some(Backend::Sqlite)
        } else {
            None
        }
    }
}

/// Open the store and wrap it in the matching repository.
///
/// Connects eagerly, so an unreachable store fails here rather than on the
/// first request.
pub async fn connect(database_url: &str) -> Result<Arc<dyn UserRepository>, sqlx::Error> {
    match Backend::from_url(database_url) {
        Some(Backend::Postgres) => {
            let pool = PgPoolOptions::new().connect(database_url).await?;
            Ok(Arc::new(PgUserRepository::new(pool)))
        }
        Some(Backend::Sqlite) => {
            let pool = SqlitePoolOptions::new().connect(database_url).await?;
            Ok(Arc::new(SqliteUserRepository::new(pool)))
        }
        None => Err(sqlx::Error::Configuration(
            "DATABASE_URL must start with postgres://, postgresql:// or sqlite:".into(),
        )),
    }
}
