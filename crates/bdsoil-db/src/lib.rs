//! Data layer for the BDSoil farm advisory tool.
//!
//! A single `SQLite` file holds two tables, `users` and `lands`. This
//! crate owns the connection pool, the additive schema migration and the
//! row-level CRUD used by the land ledger and account operations.
//!
//! # Modules
//!
//! - [`sqlite`] -- Connection pool and schema management
//! - [`user_store`] -- `users` table operations
//! - [`land_store`] -- `lands` table operations
//! - [`error`] -- [`DbError`]

pub mod error;
pub mod land_store;
pub mod sqlite;
pub mod user_store;

pub use error::DbError;
pub use land_store::{LandRow, LandStore, NewLand};
pub use sqlite::{IN_MEMORY_URL, SqliteConfig, SqliteDatabase};
pub use user_store::{NewUser, ProfileUpdate, UserRow, UserStore};
