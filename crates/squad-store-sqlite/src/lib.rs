//! SQLite backend for the squad planner's key-value storage.
//!
//! Stores each key in one row of a small `kv` table so the plan and theme
//! preference live in a single local database file.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
