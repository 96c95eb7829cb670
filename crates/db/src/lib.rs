//! Record persistence for the contributor statistics jobs.
//!
//! - [`RecordStore`]: the async seam the jobs read and write through.
//! - [`MemoryStore`]: in-process documents for tests and local runs.
//! - [`PgStore`]: documents in the Postgres `documents` table.
//! - [`transaction::run_in_transaction`]: commit-or-rollback wrapper.

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod postgres;
pub mod records;
pub mod repositories;
pub mod store;
pub mod transaction;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{Record, RecordKind, RecordStore, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
