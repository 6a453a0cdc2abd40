//! Database connection utilities.

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use marginalia_error::{StorageError, StorageErrorKind, StorageResult};
use tracing::instrument;

/// Migrations embedded at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Connection pool over SQLite.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Per-connection SQLite setup.
///
/// Foreign keys are off by default in SQLite; the busy timeout keeps
/// concurrent writers on disjoint user partitions from failing fast with
/// `SQLITE_BUSY` instead of waiting their turn.
#[derive(Debug, Clone, Copy)]
struct ConnectionSetup;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionSetup {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given SQLite database URL and run
/// pending migrations.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or migrations fail.
#[instrument(name = "storage.create_pool")]
pub fn create_pool(database_url: &str) -> StorageResult<SqlitePool> {
    tracing::debug!("Creating SQLite connection pool");
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);

    let pool = Pool::builder()
        .max_size(8)
        .connection_customizer(Box::new(ConnectionSetup))
        .build(manager)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create connection pool");
            StorageError::new(StorageErrorKind::Pool(e.to_string()))
        })?;

    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
        tracing::error!(error = %e, "Failed to run migrations");
        StorageError::new(StorageErrorKind::Migration(e.to_string()))
    })?;

    Ok(pool)
}

/// Create a single-connection pool over an in-memory database.
///
/// An in-memory SQLite database is private to its connection, so the pool
/// is capped at one connection to keep every caller on the same database.
#[instrument(name = "storage.create_in_memory_pool")]
pub fn create_in_memory_pool() -> StorageResult<SqlitePool> {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");

    let pool = Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(ConnectionSetup))
        .build(manager)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create in-memory pool");
            StorageError::new(StorageErrorKind::Pool(e.to_string()))
        })?;

    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
        tracing::error!(error = %e, "Failed to run migrations");
        StorageError::new(StorageErrorKind::Migration(e.to_string()))
    })?;

    Ok(pool)
}
