//! Tactical role reference data.
//!
//! Position codes map to one or more position categories, and each category
//! lists the role names available to it. A role shared by several categories
//! appears once, carrying every category it applies to.

use serde::Serialize;

// ─── Categories ──────────────────────────────────────────────────────────────

/// Broad positional category used to look up eligible roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PositionCategory {
  #[serde(rename = "Goalkeeper")]
  Goalkeeper,
  #[serde(rename = "Centre-Back")]
  CentreBack,
  #[serde(rename = "Wide CB")]
  WideCentreBack,
  #[serde(rename = "Full-Back")]
  FullBack,
  #[serde(rename = "Wing-Back")]
  WingBack,
  #[serde(rename = "Defensive Midfield")]
  DefensiveMidfield,
  #[serde(rename = "Central Midfield")]
  CentralMidfield,
  #[serde(rename = "Wide Midfield")]
  WideMidfield,
  #[serde(rename = "Attacking Midfield")]
  AttackingMidfield,
  #[serde(rename = "Winger")]
  Winger,
  #[serde(rename = "Striker")]
  Striker,
}

impl PositionCategory {
  pub fn label(self) -> &'static str {
    match self {
      Self::Goalkeeper => "Goalkeeper",
      Self::CentreBack => "Centre-Back",
      Self::WideCentreBack => "Wide CB",
      Self::FullBack => "Full-Back",
      Self::WingBack => "Wing-Back",
      Self::DefensiveMidfield => "Defensive Midfield",
      Self::CentralMidfield => "Central Midfield",
      Self::WideMidfield => "Wide Midfield",
      Self::AttackingMidfield => "Attacking Midfield",
      Self::Winger => "Winger",
      Self::Striker => "Striker",
    }
  }
}

/// Categories a position code draws its roles from.
pub fn categories_for_position(code: &str) -> &'static [PositionCategory] {
  use PositionCategory::*;
  match code {
    "GK" => &[Goalkeeper],
    "RCB" | "LCB" => &[CentreBack, WideCentreBack],
    "CB" => &[CentreBack],
    "RB" | "LB" => &[FullBack],
    "RWB" | "LWB" => &[WingBack],
    "DM" => &[DefensiveMidfield],
    "DMR" | "DML" => &[DefensiveMidfield, WideMidfield],
    "CM" => &[CentralMidfield],
    "RCM" | "LCM" => &[CentralMidfield, WideMidfield],
    "RM" | "LM" => &[WideMidfield],
    "AMC" => &[AttackingMidfield],
    "AMR" | "AML" => &[AttackingMidfield, Winger],
    "RW" | "LW" => &[Winger],
    "ST" | "RST" | "LST" => &[Striker],
    _ => &[],
  }
}

/// Role names per category, in display order.
const ROLE_TABLE: &[(PositionCategory, &[&str])] = &[
  (PositionCategory::Goalkeeper, &[
    "Goalkeeper",
    "Sweeper Keeper",
    "Ball-Playing Goalkeeper",
  ]),
  (PositionCategory::CentreBack, &[
    "Centre-Back",
    "Ball-Playing Centre-Back",
    "Stopping Centre-Back",
    "Covering Centre-Back",
    "No-Nonsense Centre-Back",
  ]),
  (PositionCategory::WideCentreBack, &[
    "Wide Centre-Back",
    "Overlapping Centre-Back",
    "Ball-Playing Centre-Back",
  ]),
  (PositionCategory::FullBack, &[
    "Full-Back",
    "Inverted Full-Back",
    "Pressing Full-Back",
    "Holding Full-Back",
  ]),
  (PositionCategory::WingBack, &[
    "Wing-Back",
    "Inside Wing-Back",
    "Playmaking Wing-Back",
    "Advanced Wing-Back",
  ]),
  (PositionCategory::DefensiveMidfield, &[
    "Defensive Midfielder",
    "Deep-Lying Playmaker",
    "Half-Back",
    "Pressing Defensive Midfielder",
  ]),
  (PositionCategory::CentralMidfield, &[
    "Central Midfielder",
    "Box-to-Box Midfielder",
    "Deep-Lying Playmaker",
    "Channel Midfielder",
    "Midfield Playmaker",
  ]),
  (PositionCategory::WideMidfield, &[
    "Wide Midfielder",
    "Wide Playmaker",
    "Tracking Wide Midfielder",
    "Channel Midfielder",
  ]),
  (PositionCategory::AttackingMidfield, &[
    "Attacking Midfielder",
    "Advanced Playmaker",
    "Shadow Striker",
    "Free Role",
  ]),
  (PositionCategory::Winger, &[
    "Winger",
    "Inside Forward",
    "Inverted Winger",
    "Wide Playmaker",
    "Wide Forward",
  ]),
  (PositionCategory::Striker, &[
    "Centre Forward",
    "Target Forward",
    "Poacher",
    "False Nine",
    "Channel Forward",
  ]),
];

// ─── Roles ───────────────────────────────────────────────────────────────────

/// A tactical role and the categories it is available to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
  /// Lower-case slug of `name`, e.g. `"ball-playing-centre-back"`.
  pub id:         String,
  pub name:       String,
  pub categories: Vec<PositionCategory>,
}

/// Slug used as a role's id: lower-cased, runs of whitespace become `-`.
pub fn role_id(name: &str) -> String {
  name
    .split_whitespace()
    .map(str::to_lowercase)
    .collect::<Vec<_>>()
    .join("-")
}

/// Every role in the table, deduplicated by id in first-seen order.
pub fn all_roles() -> Vec<Role> {
  let mut roles: Vec<Role> = Vec::new();

  for (category, names) in ROLE_TABLE {
    for name in *names {
      let id = role_id(name);
      match roles.iter_mut().find(|r| r.id == id) {
        Some(role) => {
          if !role.categories.contains(category) {
            role.categories.push(*category);
          }
        }
        None => roles.push(Role {
          id,
          name: (*name).to_owned(),
          categories: vec![*category],
        }),
      }
    }
  }

  roles
}

/// Roles eligible for a position code; empty for an unknown code.
pub fn roles_for_position(code: &str) -> Vec<Role> {
  let categories = categories_for_position(code);
  if categories.is_empty() {
    return Vec::new();
  }

  all_roles()
    .into_iter()
    .filter(|role| role.categories.iter().any(|c| categories.contains(c)))
    .collect()
}

/// Look up a role by id or display name for a position code.
pub fn find_role(code: &str, role: &str) -> Option<Role> {
  let wanted = role_id(role);
  roles_for_position(code).into_iter().find(|r| r.id == wanted)
}

// ─── Position groups ─────────────────────────────────────────────────────────

/// Coarse line of the pitch a position code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionGroup {
  Goalkeeper,
  Defender,
  Midfielder,
  Attacker,
}

pub fn position_group(code: &str) -> Option<PositionGroup> {
  match code {
    "GK" => Some(PositionGroup::Goalkeeper),
    "RB" | "RCB" | "CB" | "LCB" | "LB" | "RWB" | "LWB" => {
      Some(PositionGroup::Defender)
    }
    "DM" | "DMR" | "DML" | "CM" | "RCM" | "LCM" | "RM" | "LM" | "AMC"
    | "AMR" | "AML" => Some(PositionGroup::Midfielder),
    "RW" | "LW" | "ST" | "RST" | "LST" => Some(PositionGroup::Attacker),
    _ => None,
  }
}
