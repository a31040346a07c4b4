//! Plain-text rendering of plans, roles and statistics.

use std::io::{self, Write};

use squad_core::{
  plan::{SquadPlan, Tier},
  player::Player,
  roles::{Role, find_role},
  stats::SquadStatistics,
};

// ─── Depth chart ──────────────────────────────────────────────────────────────

/// Print every formation position with its role and three tiers.
pub fn depth_chart(out: &mut impl Write, plan: &SquadPlan) -> io::Result<()> {
  writeln!(
    out,
    "Formation {}  (updated {})",
    plan.formation,
    plan.updated_at.format("%Y-%m-%d %H:%M UTC")
  )?;

  let positions = plan.positions();
  if positions.is_empty() {
    writeln!(out, "  (no positions: unknown formation)")?;
    return Ok(());
  }

  for code in positions {
    let slot = plan.slot(code);
    let role = slot
      .and_then(|s| s.role.as_deref())
      .map(|r| role_label(code, r))
      .unwrap_or_else(|| "-".to_owned());
    writeln!(out)?;
    writeln!(out, "{code:<4} role: {role}")?;

    for tier in Tier::ALL {
      let line = slot
        .and_then(|s| s.get(tier))
        .map(player_line)
        .unwrap_or_else(|| "(empty)".to_owned());
      writeln!(out, "  {:<7}{line}", tier.as_str())?;
    }
  }
  Ok(())
}

/// Display name of a stored role, flagged when it is not listed for `code`.
fn role_label(code: &str, role: &str) -> String {
  match find_role(code, role) {
    Some(r) => r.name,
    None => format!("{role} (unlisted)"),
  }
}

pub fn player_line(player: &Player) -> String {
  let mut line = format!(
    "{} ({}, {}, {})  CA {} / PA {}",
    player.name,
    player.position,
    player.nationality,
    player.age,
    player.current_ability,
    player.potential_ability,
  );
  if !player.loan_status.is_owned() {
    line.push_str(&format!("  [{}]", player.loan_status));
  }
  line
}

// ─── Reference data ───────────────────────────────────────────────────────────

pub fn roles(out: &mut impl Write, code: &str, roles: &[Role]) -> io::Result<()> {
  if roles.is_empty() {
    writeln!(out, "No roles listed for {code}")?;
    return Ok(());
  }
  for role in roles {
    let categories: Vec<_> = role.categories.iter().map(|c| c.label()).collect();
    writeln!(out, "{:<32} {:<32} {}", role.id, role.name, categories.join(", "))?;
  }
  Ok(())
}

// ─── Statistics ───────────────────────────────────────────────────────────────

fn average(value: f64) -> String {
  if value > 0.0 { format!("{value:.1}") } else { "-".to_owned() }
}

pub fn statistics(out: &mut impl Write, stats: &SquadStatistics) -> io::Result<()> {
  writeln!(out, "Players        {}", stats.total_players)?;
  writeln!(out, "Average age    {}", average(stats.average_age))?;
  writeln!(out, "Average CA     {}", average(stats.average_current))?;
  writeln!(out, "Average PA     {}", average(stats.average_potential))?;
  writeln!(out)?;
  writeln!(
    out,
    "Goalkeepers {}  Defenders {}  Midfielders {}  Attackers {}",
    stats.groups.goalkeepers,
    stats.groups.defenders,
    stats.groups.midfielders,
    stats.groups.attackers,
  )?;
  writeln!(
    out,
    "Owned {}  On loan {}  Loaned out {}",
    stats.loans.owned, stats.loans.on_loan, stats.loans.loaned_out,
  )?;
  if !stats.thin_positions.is_empty() {
    writeln!(
      out,
      "Thin positions ({}): {}",
      stats.thin_positions.len(),
      stats.thin_positions.join(", ")
    )?;
  }
  Ok(())
}
