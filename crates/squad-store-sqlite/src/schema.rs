//! SQL schema for the squad planner SQLite store.
//!
//! Applied at connection startup when `PRAGMA user_version` is behind
//! [`SCHEMA_VERSION`]. Later migrations will be gated on that number.

pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per storage key: the serialised plan and the theme preference.
CREATE TABLE IF NOT EXISTS kv (
    key         TEXT PRIMARY KEY,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL   -- ISO 8601 UTC; set on every write
);

PRAGMA user_version = 1;
";
