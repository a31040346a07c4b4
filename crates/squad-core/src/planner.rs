//! [`PlanStore`] — the single owner of the current squad plan.
//!
//! Every mutation builds the next plan from the current one, refreshes
//! `updatedAt`, hands it to the persistence layer, and only then publishes it
//! as current. A persistence failure is logged by [`Persistence`] and never
//! undoes the in-memory change.

use crate::{
  Result,
  formation,
  persistence::{Persistence, Theme},
  plan::{DepthSlot, ImportError, SquadPlan, Tier, parse_plan},
  player::Player,
  stats::SquadStatistics,
  storage::KeyValueStore,
};

/// Owns the current [`SquadPlan`] and the storage it is persisted to.
///
/// Construct with [`PlanStore::open`], tear down with [`PlanStore::close`].
#[derive(Debug)]
pub struct PlanStore<S> {
  plan:        SquadPlan,
  persistence: Persistence<S>,
}

impl<S: KeyValueStore> PlanStore<S> {
  /// Load the stored plan from `storage`, or start from the default plan if
  /// nothing usable is stored. Missing formation slots are back-filled.
  pub fn open(storage: S) -> Self {
    let persistence = Persistence::new(storage);
    let plan = match persistence.load() {
      Some(mut plan) => {
        plan.backfill();
        tracing::debug!(formation = %plan.formation, "loaded stored plan");
        plan
      }
      None => {
        tracing::debug!("no stored plan; starting from the default");
        SquadPlan::initial()
      }
    };
    Self { plan, persistence }
  }

  /// Release the store and hand back its storage backend.
  pub fn close(self) -> S { self.persistence.into_inner() }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn plan(&self) -> &SquadPlan { &self.plan }

  /// Canonical positions of the current formation, in display order.
  pub fn positions(&self) -> &'static [&'static str] { self.plan.positions() }

  pub fn slot(&self, position: &str) -> Option<&DepthSlot> {
    self.plan.slot(position)
  }

  pub fn occupant(&self, position: &str, tier: Tier) -> Option<&Player> {
    self.plan.occupant(position, tier)
  }

  pub fn statistics(&self) -> SquadStatistics {
    SquadStatistics::compute(&self.plan)
  }

  /// Pretty-printed JSON snapshot of the current plan.
  pub fn export(&self) -> Result<String> { self.plan.to_json_pretty() }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Reshape the depth chart for `formation`.
  ///
  /// Slots for positions shared with the old formation are kept, slots for
  /// dropped positions are discarded, and new positions get empty slots. An
  /// unknown formation produces an empty depth chart.
  pub fn set_formation(&mut self, formation: &str) {
    let positions = formation::positions_for_formation(formation);
    if positions.is_empty() {
      tracing::warn!(formation, "unknown formation; depth chart will be empty");
    }

    let depth_chart = positions
      .iter()
      .map(|code| {
        let slot = self.plan.slot(code).cloned().unwrap_or_default();
        ((*code).to_owned(), slot)
      })
      .collect();

    let next = SquadPlan {
      formation: formation.to_owned(),
      depth_chart,
      updated_at: self.plan.updated_at,
    };
    tracing::debug!(from = %self.plan.formation, to = formation, "set formation");
    self.commit(next);
  }

  /// Set or overwrite the role for `position`. The role is not validated.
  pub fn set_position_role(&mut self, position: &str, role: &str) {
    let mut next = self.plan.clone();
    next.slot_mut(position).role = Some(role.to_owned());
    tracing::debug!(position, role, "set role");
    self.commit(next);
  }

  /// Insert or fully replace the player at (`position`, `tier`).
  pub fn upsert_player(&mut self, position: &str, tier: Tier, player: Player) {
    let mut next = self.plan.clone();
    tracing::debug!(position, %tier, player = %player.id, "upsert player");
    next.slot_mut(position).set(tier, player);
    self.commit(next);
  }

  /// Clear (`position`, `tier`), returning the removed player if any.
  pub fn remove_player(&mut self, position: &str, tier: Tier) -> Option<Player> {
    let mut next = self.plan.clone();
    let removed = next
      .depth_chart
      .get_mut(position)
      .and_then(|slot| slot.take(tier));
    tracing::debug!(position, %tier, removed = removed.is_some(), "remove player");
    self.commit(next);
    removed
  }

  /// Exchange the occupants of two coordinates.
  ///
  /// If only the source is occupied the player moves. If only the
  /// destination is occupied its player is discarded and both end empty.
  pub fn swap_players(
    &mut self,
    from_position: &str,
    from_tier: Tier,
    to_position: &str,
    to_tier: Tier,
  ) {
    let mut next = self.plan.clone();
    let mover = next.slot_mut(from_position).take(from_tier);
    let displaced = next.slot_mut(to_position).take(to_tier);

    match (mover, displaced) {
      (Some(mover), Some(displaced)) => {
        next.slot_mut(to_position).set(to_tier, mover);
        next.slot_mut(from_position).set(from_tier, displaced);
      }
      (Some(mover), None) => {
        next.slot_mut(to_position).set(to_tier, mover);
      }
      (None, displaced) => {
        if let Some(p) = displaced {
          tracing::debug!(player = %p.id, "empty source; clearing destination");
        }
      }
    }

    tracing::debug!(
      from_position,
      %from_tier,
      to_position,
      %to_tier,
      "swap players"
    );
    self.commit(next);
  }

  /// Forget everything: delete the stored plan and start again from the
  /// default formation.
  pub fn reset(&mut self) {
    self.persistence.clear();
    let next = SquadPlan::initial();
    self.persistence.save(&next);
    self.plan = next;
    tracing::debug!("plan reset");
  }

  /// Replace the current plan with a serialised one.
  ///
  /// On error nothing changes.
  pub fn import(&mut self, input: &str) -> Result<(), ImportError> {
    let next = parse_plan(input)?;
    tracing::info!(formation = %next.formation, "imported plan");
    self.commit(next);
    Ok(())
  }

  // ── Theme ─────────────────────────────────────────────────────────────────

  pub fn theme(&self) -> Theme { self.persistence.load_theme() }

  pub fn set_theme(&mut self, theme: Theme) { self.persistence.save_theme(theme) }

  // ── Internals ─────────────────────────────────────────────────────────────

  fn commit(&mut self, mut next: SquadPlan) {
    next.touch();
    self.persistence.save(&next);
    self.plan = next;
  }
}
