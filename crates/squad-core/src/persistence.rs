//! Best-effort persistence of the plan and the theme preference.
//!
//! Durability is not guaranteed: write failures are logged and swallowed, and
//! a stored plan that cannot be parsed is treated exactly like a missing one.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  plan::{SquadPlan, parse_plan},
  storage::KeyValueStore,
};

/// Key holding the serialised [`SquadPlan`].
pub const PLAN_KEY: &str = "fm-squad-planner-v1";

/// Key holding the theme preference (`"light"` or `"dark"`).
pub const THEME_KEY: &str = "fm-squad-planner-theme";

// ─── Theme ───────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Light,
  Dark,
}

impl Theme {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Light => "light",
      Self::Dark => "dark",
    }
  }
}

impl fmt::Display for Theme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Theme {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim() {
      "light" => Ok(Self::Light),
      "dark" => Ok(Self::Dark),
      other => Err(Error::UnknownTheme(other.to_owned())),
    }
  }
}

// ─── Adapter ─────────────────────────────────────────────────────────────────

/// Reads and writes the plan and theme through a [`KeyValueStore`].
#[derive(Debug)]
pub struct Persistence<S> {
  storage: S,
}

impl<S: KeyValueStore> Persistence<S> {
  pub fn new(storage: S) -> Self { Self { storage } }

  pub fn into_inner(self) -> S { self.storage }

  /// Serialise and store `plan`. Failures are logged, never returned.
  pub fn save(&mut self, plan: &SquadPlan) {
    let json = match serde_json::to_string(plan) {
      Ok(json) => json,
      Err(e) => {
        tracing::error!(error = %e, "failed to serialise plan");
        return;
      }
    };

    if let Err(e) = self.storage.set(PLAN_KEY, &json) {
      tracing::error!(error = %e, key = PLAN_KEY, "failed to save plan");
    }
  }

  /// The stored plan, or `None` if it is absent, unreadable or malformed.
  pub fn load(&self) -> Option<SquadPlan> {
    let raw = match self.storage.get(PLAN_KEY) {
      Ok(Some(raw)) => raw,
      Ok(None) => return None,
      Err(e) => {
        tracing::error!(error = %e, key = PLAN_KEY, "failed to read plan");
        return None;
      }
    };

    match parse_plan(&raw) {
      Ok(plan) => Some(plan),
      Err(e) => {
        tracing::warn!(error = %e, "ignoring malformed stored plan");
        None
      }
    }
  }

  /// Delete the stored plan.
  pub fn clear(&mut self) {
    if let Err(e) = self.storage.remove(PLAN_KEY) {
      tracing::error!(error = %e, key = PLAN_KEY, "failed to clear plan");
    }
  }

  /// The stored theme; light when absent or unrecognised.
  pub fn load_theme(&self) -> Theme {
    match self.storage.get(THEME_KEY) {
      Ok(Some(raw)) => raw.parse().unwrap_or_else(|e: Error| {
        tracing::warn!(error = %e, "ignoring unrecognised theme");
        Theme::default()
      }),
      Ok(None) => Theme::default(),
      Err(e) => {
        tracing::error!(error = %e, key = THEME_KEY, "failed to read theme");
        Theme::default()
      }
    }
  }

  pub fn save_theme(&mut self, theme: Theme) {
    if let Err(e) = self.storage.set(THEME_KEY, theme.as_str()) {
      tracing::error!(error = %e, key = THEME_KEY, "failed to save theme");
    }
  }
}
