//! Database access for the feedback backend: pool helpers, the `Feedback`
//! entity model, and the parameterized list query.
//!
//! The `feedbacks` schema is owned by the upstream ingestion pipeline; this
//! crate only reads it. A reference `schema.sql` ships alongside for local
//! development.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used by the health endpoint and at startup.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
