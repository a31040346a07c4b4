//! Aggregate squad figures — counts and averages over the depth chart.

use serde::Serialize;

use crate::{
  plan::SquadPlan,
  player::LoanStatus,
  roles::{PositionGroup, position_group},
};

/// Positions holding fewer players than this are reported as thin.
pub const MIN_DEPTH: usize = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanCounts {
  pub owned:      usize,
  pub on_loan:    usize,
  pub loaned_out: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCounts {
  pub goalkeepers: usize,
  pub defenders:   usize,
  pub midfielders: usize,
  pub attackers:   usize,
}

/// Summary of the players placed in the current formation's positions.
///
/// Slots outside the formation are ignored. Averages are `0.0` when no
/// player is placed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadStatistics {
  pub total_players:     usize,
  pub average_age:       f64,
  pub average_current:   f64,
  pub average_potential: f64,
  /// Formation positions with fewer than [`MIN_DEPTH`] players.
  pub thin_positions:    Vec<String>,
  pub loans:             LoanCounts,
  pub groups:            GroupCounts,
}

impl SquadStatistics {
  pub fn compute(plan: &SquadPlan) -> Self {
    let mut stats = Self::default();
    let mut total_age = 0u32;
    let mut total_current = 0.0;
    let mut total_potential = 0.0;

    for code in plan.positions() {
      let Some(slot) = plan.slot(code) else {
        stats.thin_positions.push((*code).to_owned());
        continue;
      };

      if slot.player_count() < MIN_DEPTH {
        stats.thin_positions.push((*code).to_owned());
      }

      for (_, player) in slot.players() {
        stats.total_players += 1;
        total_age += u32::from(player.age);
        total_current += player.current_ability.stars();
        total_potential += player.potential_ability.stars();

        match player.loan_status {
          LoanStatus::Owned => stats.loans.owned += 1,
          LoanStatus::OnLoan => stats.loans.on_loan += 1,
          LoanStatus::LoanedOut => stats.loans.loaned_out += 1,
        }

        match position_group(code) {
          Some(PositionGroup::Goalkeeper) => stats.groups.goalkeepers += 1,
          Some(PositionGroup::Defender) => stats.groups.defenders += 1,
          Some(PositionGroup::Midfielder) => stats.groups.midfielders += 1,
          Some(PositionGroup::Attacker) => stats.groups.attackers += 1,
          None => {}
        }
      }
    }

    if stats.total_players > 0 {
      let n = stats.total_players as f64;
      stats.average_age = f64::from(total_age) / n;
      stats.average_current = total_current / n;
      stats.average_potential = total_potential / n;
    }

    stats
  }
}
