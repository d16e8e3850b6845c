pub mod user;

use breezo_common::error::{BreezoError, BreezoResult};
use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

/// Create a Postgres connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> BreezoResult<PgPool> {
    tracing::info!("connecting to database");
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| BreezoError::Database(e.to_string()))
}

/// Build a pool without connecting; connections open on first use.
pub fn connect_lazy(database_url: &str) -> BreezoResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect_lazy(database_url)
        .map_err(|e| BreezoError::Database(e.to_string()))
}
