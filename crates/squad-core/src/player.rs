//! Player records — the values placed into depth-chart tiers.
//!
//! A player is never edited in place. Re-saving a player replaces the whole
//! record at its (position, tier) coordinate.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

// ─── Ability ─────────────────────────────────────────────────────────────────

/// A star rating on the half-point scale 0, 0.5, … 5.
///
/// Stored as a count of half-points so equality is exact. Whole ratings
/// serialise as JSON integers (`3`), halves as decimals (`3.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ability(u8);

impl Ability {
  /// Validate a rating expressed in stars.
  pub fn new(stars: f64) -> Result<Self> {
    let halves = stars * 2.0;
    if !(0.0..=10.0).contains(&halves) || halves.fract() != 0.0 {
      return Err(Error::InvalidAbility(stars));
    }
    Ok(Self(halves as u8))
  }

  pub fn half_points(self) -> u8 { self.0 }

  pub fn stars(self) -> f64 { f64::from(self.0) / 2.0 }
}

impl fmt::Display for Ability {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.0 % 2 == 0 {
      write!(f, "{}", self.0 / 2)
    } else {
      write!(f, "{}.5", self.0 / 2)
    }
  }
}

impl FromStr for Ability {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let stars: f64 = s
      .trim()
      .parse()
      .map_err(|_| Error::UnparsableAbility(s.to_owned()))?;
    Self::new(stars)
  }
}

impl Serialize for Ability {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    if self.0 % 2 == 0 {
      serializer.serialize_u8(self.0 / 2)
    } else {
      serializer.serialize_f64(self.stars())
    }
  }
}

impl<'de> Deserialize<'de> for Ability {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let stars = f64::deserialize(deserializer)?;
    Self::new(stars).map_err(serde::de::Error::custom)
  }
}

// ─── Loan status ─────────────────────────────────────────────────────────────

/// Contract situation of a player. An absent `loanStatus` means owned.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LoanStatus {
  #[default]
  Owned,
  OnLoan,
  LoanedOut,
}

impl LoanStatus {
  pub fn is_owned(&self) -> bool { matches!(self, Self::Owned) }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Owned => "owned",
      Self::OnLoan => "on-loan",
      Self::LoanedOut => "loaned-out",
    }
  }
}

impl fmt::Display for LoanStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for LoanStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "owned" => Ok(Self::Owned),
      "on-loan" => Ok(Self::OnLoan),
      "loaned-out" => Ok(Self::LoanedOut),
      other => Err(Error::UnknownLoanStatus(other.to_owned())),
    }
  }
}

// ─── Player ──────────────────────────────────────────────────────────────────

/// A player assigned to one tier of one position slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
  /// Opaque identifier, stable across re-saves of the same player.
  pub id:                String,
  pub name:              String,
  pub nationality:       String,
  pub age:               u8,
  /// The player's natural position code, which may differ from the slot.
  pub position:          String,
  pub current_ability:   Ability,
  pub potential_ability: Ability,
  #[serde(default, skip_serializing_if = "LoanStatus::is_owned")]
  pub loan_status:       LoanStatus,
}

impl Player {
  /// Convenience constructor for an owned player.
  pub fn new(
    id: impl Into<String>,
    name: impl Into<String>,
    nationality: impl Into<String>,
    age: u8,
    position: impl Into<String>,
    current_ability: Ability,
    potential_ability: Ability,
  ) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      nationality: nationality.into(),
      age,
      position: position.into(),
      current_ability,
      potential_ability,
      loan_status: LoanStatus::Owned,
    }
  }

  pub fn with_loan_status(mut self, loan_status: LoanStatus) -> Self {
    self.loan_status = loan_status;
    self
  }
}
