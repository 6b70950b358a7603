//! Postgres connection provider for `ArtistStore`.
//!
//! The store never configures the pool itself; callers build one here (or
//! anywhere else) and inject it.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// The connection provider every store operation draws from.
pub type DbPool = PgPool;

/// Default pool ceiling when the caller does not pick one.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection settings for [`connect`].
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub database_url: String,
    pub max_connections: u32,
}

impl PoolSettings {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }
}

/// Open a pool against `settings.database_url`.
///
/// Each store call borrows one connection (or one transaction) from it and
/// hands it back on drop, success or failure.
pub async fn connect(settings: &PoolSettings) -> Result<DbPool, DbError> {
    info!(max_connections = settings.max_connections, "connecting to artist database");
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    Ok(pool)
}

/// Apply the embedded schema from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("applying artist schema migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}
