//! Static formation table.
//!
//! Each formation maps to the ordered list of position codes that make up its
//! depth chart. The first entry is the default for a fresh plan.

/// A named formation and its canonical position codes, goalkeeper first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formation {
  pub name:      &'static str,
  pub positions: &'static [&'static str],
}

pub const FORMATIONS: &[Formation] = &[
  Formation {
    name:      "4-2-3-1",
    positions: &["GK", "RB", "RCB", "LCB", "LB", "DMR", "DML", "AMR", "AMC", "AML", "ST"],
  },
  Formation {
    name:      "4-3-3",
    positions: &["GK", "RB", "RCB", "LCB", "LB", "DM", "RCM", "LCM", "AMR", "AMC", "ST"],
  },
  Formation {
    name:      "4-4-2",
    positions: &["GK", "RB", "RCB", "LCB", "LB", "RM", "RCM", "LCM", "LM", "RST", "LST"],
  },
  Formation {
    name:      "3-4-3",
    positions: &["GK", "RCB", "CB", "LCB", "RWB", "RCM", "LCM", "LWB", "AMR", "AML", "ST"],
  },
  Formation {
    name:      "3-5-2",
    positions: &["GK", "RCB", "CB", "LCB", "RWB", "RCM", "CM", "LCM", "LWB", "RST", "LST"],
  },
  Formation {
    name:      "5-2-3",
    positions: &["GK", "RB", "RCB", "CB", "LCB", "LB", "RCM", "LCM", "RW", "ST", "LW"],
  },
  Formation {
    name:      "4-1-4-1",
    positions: &["GK", "RB", "RCB", "LCB", "LB", "DM", "RM", "RCM", "LCM", "LM", "ST"],
  },
];

/// The formation a fresh or reset plan starts with.
pub fn default_formation() -> &'static Formation { &FORMATIONS[0] }

pub fn find_formation(name: &str) -> Option<&'static Formation> {
  FORMATIONS.iter().find(|f| f.name == name)
}

pub fn is_known_formation(name: &str) -> bool { find_formation(name).is_some() }

/// Position codes for `name`, or an empty slice for an unknown formation.
pub fn positions_for_formation(name: &str) -> &'static [&'static str] {
  find_formation(name).map_or(&[], |f| f.positions)
}

pub fn formation_names() -> impl Iterator<Item = &'static str> {
  FORMATIONS.iter().map(|f| f.name)
}
