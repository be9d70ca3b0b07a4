//! Database module: connector, models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (PostgreSQL)
//! - `postgres.rs`: connection options and the `Storage` pool wrapper

pub mod models;
pub mod postgres;
pub mod schema;

pub use models::User;
pub use postgres::{PgPool, Storage};
pub use schema::PG_INIT;
