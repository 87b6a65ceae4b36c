//! Postgres access for the sections owned by course management.
//!
//! The timetable engine never talks to the pool directly: it sees the
//! database through [`PgSectionStore`], its `SectionStore` implementation.

pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub mod mock;

use eyre::{Result, WrapErr};
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use tracing::debug;

pub use store::PgSectionStore;

pub type DbPool = Pool<Postgres>;

/// Gestures are serialized by the API, so a handful of connections is plenty.
const MAX_CONNECTIONS: u32 = 5;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    debug!(max_connections = MAX_CONNECTIONS, "Opening sections database pool");

    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .wrap_err("Failed to connect to the sections database")
}
