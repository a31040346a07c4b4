//! Error type for `squad-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  /// The file was written by a newer build with an unknown schema.
  #[error("unsupported schema version {found} (this build knows up to {known})")]
  UnsupportedSchema { found: i64, known: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
