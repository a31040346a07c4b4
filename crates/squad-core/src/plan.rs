//! The squad plan aggregate and its wire format.
//!
//! A [`SquadPlan`] maps position codes to [`DepthSlot`]s. Every code in the
//! plan's formation must have a slot, even an empty one; the constructors and
//! [`SquadPlan::backfill`] maintain that.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Error, Result, formation, player::Player};

// ─── Tier ────────────────────────────────────────────────────────────────────

/// Depth ranking within a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
  First,
  Second,
  Youth,
}

impl Tier {
  pub const ALL: [Tier; 3] = [Tier::First, Tier::Second, Tier::Youth];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::First => "first",
      Self::Second => "second",
      Self::Youth => "youth",
    }
  }
}

impl fmt::Display for Tier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Tier {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "first" | "1" => Ok(Self::First),
      "second" | "2" => Ok(Self::Second),
      "youth" | "3" => Ok(Self::Youth),
      other => Err(Error::UnknownTier(other.to_owned())),
    }
  }
}

// ─── DepthSlot ───────────────────────────────────────────────────────────────

/// Up to three tiered players and an optional role for one position code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepthSlot {
  /// Opaque role identifier; checked against the role table only for display.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub role:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub first:  Option<Player>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub second: Option<Player>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub youth:  Option<Player>,
}

impl DepthSlot {
  pub fn get(&self, tier: Tier) -> Option<&Player> {
    match tier {
      Tier::First => self.first.as_ref(),
      Tier::Second => self.second.as_ref(),
      Tier::Youth => self.youth.as_ref(),
    }
  }

  fn tier_mut(&mut self, tier: Tier) -> &mut Option<Player> {
    match tier {
      Tier::First => &mut self.first,
      Tier::Second => &mut self.second,
      Tier::Youth => &mut self.youth,
    }
  }

  /// Place `player` at `tier`, returning the previous occupant.
  pub fn set(&mut self, tier: Tier, player: Player) -> Option<Player> {
    self.tier_mut(tier).replace(player)
  }

  /// Remove and return the occupant of `tier`.
  pub fn take(&mut self, tier: Tier) -> Option<Player> {
    self.tier_mut(tier).take()
  }

  /// Occupied tiers in depth order.
  pub fn players(&self) -> impl Iterator<Item = (Tier, &Player)> {
    Tier::ALL
      .into_iter()
      .filter_map(|tier| self.get(tier).map(|p| (tier, p)))
  }

  pub fn player_count(&self) -> usize { self.players().count() }

  /// No players and no role.
  pub fn is_empty(&self) -> bool {
    self.role.is_none() && self.player_count() == 0
  }
}

// ─── SquadPlan ───────────────────────────────────────────────────────────────

/// The aggregate root: a formation and the depth chart laid out for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadPlan {
  pub formation:   String,
  pub depth_chart: BTreeMap<String, DepthSlot>,
  pub updated_at:  DateTime<Utc>,
}

impl SquadPlan {
  /// A plan for `formation` with an empty slot for each of its positions.
  pub fn empty(formation: &str) -> Self {
    let mut plan = Self {
      formation:   formation.to_owned(),
      depth_chart: BTreeMap::new(),
      updated_at:  Utc::now(),
    };
    plan.backfill();
    plan
  }

  /// A fresh plan using the default formation.
  pub fn initial() -> Self { Self::empty(formation::default_formation().name) }

  /// The canonical position list of this plan's formation.
  pub fn positions(&self) -> &'static [&'static str] {
    formation::positions_for_formation(&self.formation)
  }

  /// Insert an empty slot for every formation position that has none.
  pub fn backfill(&mut self) {
    for code in self.positions() {
      self.depth_chart.entry((*code).to_owned()).or_default();
    }
  }

  pub fn slot(&self, position: &str) -> Option<&DepthSlot> {
    self.depth_chart.get(position)
  }

  /// The slot at `position`, created empty if absent.
  pub fn slot_mut(&mut self, position: &str) -> &mut DepthSlot {
    self.depth_chart.entry(position.to_owned()).or_default()
  }

  pub fn occupant(&self, position: &str, tier: Tier) -> Option<&Player> {
    self.slot(position).and_then(|s| s.get(tier))
  }

  pub fn touch(&mut self) { self.updated_at = Utc::now(); }

  pub fn to_json_pretty(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}

// ─── Import parsing ──────────────────────────────────────────────────────────

/// Why a serialised plan was rejected.
#[derive(Debug, Error)]
pub enum ImportError {
  #[error("not valid JSON: {0}")]
  Malformed(#[source] serde_json::Error),

  #[error("plan document must be a JSON object")]
  NotAnObject,

  #[error("plan is missing required field `{0}`")]
  MissingField(&'static str),

  #[error("plan has an invalid shape: {0}")]
  InvalidShape(#[source] serde_json::Error),
}

/// Loose view of an incoming document; `updatedAt` is optional because it is
/// replaced on import anyway.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingPlan {
  formation:   String,
  depth_chart: BTreeMap<String, DepthSlot>,
  #[serde(default)]
  updated_at:  Option<DateTime<Utc>>,
}

/// Validate a serialised plan.
///
/// `formation` must be a non-empty string and `depthChart` an object. Missing
/// formation slots are back-filled. The returned plan keeps the document's
/// `updatedAt` when present; callers decide whether to refresh it.
pub fn parse_plan(input: &str) -> Result<SquadPlan, ImportError> {
  let value: serde_json::Value =
    serde_json::from_str(input).map_err(ImportError::Malformed)?;

  let object = value.as_object().ok_or(ImportError::NotAnObject)?;
  match object.get("formation") {
    None | Some(serde_json::Value::Null) => {
      return Err(ImportError::MissingField("formation"));
    }
    Some(serde_json::Value::String(s)) if s.is_empty() => {
      return Err(ImportError::MissingField("formation"));
    }
    _ => {}
  }
  if matches!(object.get("depthChart"), None | Some(serde_json::Value::Null)) {
    return Err(ImportError::MissingField("depthChart"));
  }

  let incoming: IncomingPlan =
    serde_json::from_value(value).map_err(ImportError::InvalidShape)?;

  let mut plan = SquadPlan {
    formation:   incoming.formation,
    depth_chart: incoming.depth_chart,
    updated_at:  incoming.updated_at.unwrap_or_else(Utc::now),
  };
  plan.backfill();
  Ok(plan)
}
