//! Error types for `squad-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("ability {0} is not a half-point value between 0 and 5")]
  InvalidAbility(f64),

  #[error("not a number: {0:?}")]
  UnparsableAbility(String),

  #[error("unknown tier: {0:?}")]
  UnknownTier(String),

  #[error("unknown loan status: {0:?}")]
  UnknownLoanStatus(String),

  #[error("unknown theme: {0:?}")]
  UnknownTheme(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
