//! The `KeyValueStore` trait and an in-memory implementation.
//!
//! The persistence layer only needs string values under fixed keys. Backends
//! (e.g. `squad-store-sqlite`) implement this trait; the plan store never
//! depends on a concrete backend.

use std::{collections::HashMap, convert::Infallible};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A synchronous string key-value medium.
pub trait KeyValueStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value under `key`. Returns `None` if nothing is stored.
  fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Store `value` under `key`, replacing any previous value.
  fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

  /// Delete `key`. Deleting a missing key is not an error.
  fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// A `HashMap`-backed store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries: HashMap<String, String>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  fn get(&self, key: &str) -> Result<Option<String>, Infallible> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), Infallible> {
    self.entries.insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn remove(&mut self, key: &str) -> Result<(), Infallible> {
    self.entries.remove(key);
    Ok(())
  }
}
