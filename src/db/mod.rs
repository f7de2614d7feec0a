//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: `IntakeStorage`, the record store used by the handlers

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{AdminCredential, Application, NewApplication};
pub use schema::SQLITE_INIT;
pub use sqlite::{IntakeStorage, SqlitePool, connect};
