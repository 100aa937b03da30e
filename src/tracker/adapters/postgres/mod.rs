//! `PostgreSQL` persistence adapter.

mod models;
mod repository;
mod schema;

pub use repository::{PgStore, TrackerPgPool};
