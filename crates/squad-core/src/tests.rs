//! Unit tests for the plan store, its persistence, and the reference data.

use std::collections::BTreeSet;

use chrono::{Datelike as _, Utc};

use crate::{
  formation::{FORMATIONS, default_formation, positions_for_formation},
  persistence::{PLAN_KEY, THEME_KEY, Theme},
  plan::{ImportError, SquadPlan, Tier, parse_plan},
  planner::PlanStore,
  player::{Ability, LoanStatus, Player},
  roles::{PositionCategory, all_roles, find_role, role_id, roles_for_position},
  storage::{KeyValueStore, MemoryStore},
};

fn store() -> PlanStore<MemoryStore> { PlanStore::open(MemoryStore::new()) }

fn stars(v: f64) -> Ability { Ability::new(v).unwrap() }

fn player(id: &str, name: &str) -> Player {
  Player::new(id, name, "England", 24, "ST", stars(3.0), stars(4.5))
}

fn keys(plan: &SquadPlan) -> BTreeSet<String> {
  plan.depth_chart.keys().cloned().collect()
}

fn canonical(formation: &str) -> BTreeSet<String> {
  positions_for_formation(formation)
    .iter()
    .map(|c| (*c).to_owned())
    .collect()
}

/// Storage that rejects every call, standing in for a full or missing disk.
struct FailingStore;

#[derive(Debug, thiserror::Error)]
#[error("storage unavailable")]
struct Unavailable;

impl KeyValueStore for FailingStore {
  type Error = Unavailable;

  fn get(&self, _key: &str) -> Result<Option<String>, Unavailable> {
    Err(Unavailable)
  }

  fn set(&mut self, _key: &str, _value: &str) -> Result<(), Unavailable> {
    Err(Unavailable)
  }

  fn remove(&mut self, _key: &str) -> Result<(), Unavailable> {
    Err(Unavailable)
  }
}

// ─── Initialisation ──────────────────────────────────────────────────────────

#[test]
fn fresh_store_uses_default_formation_with_empty_slots() {
  let s = store();
  assert_eq!(s.plan().formation, default_formation().name);
  assert_eq!(keys(s.plan()), canonical(default_formation().name));
  assert!(s.plan().depth_chart.values().all(|slot| slot.is_empty()));
}

#[test]
fn malformed_stored_plan_falls_back_to_default() {
  let mut kv = MemoryStore::new();
  kv.set(PLAN_KEY, "{ not json").unwrap();

  let s = PlanStore::open(kv);
  assert_eq!(s.plan().formation, default_formation().name);
  assert_eq!(keys(s.plan()), canonical(default_formation().name));
}

#[test]
fn plan_survives_close_and_reopen() {
  let mut s = store();
  s.set_formation("3-5-2");
  s.upsert_player("CM", Tier::First, player("p1", "Declan"));
  s.set_position_role("CM", "box-to-box-midfielder");

  let s = PlanStore::open(s.close());
  assert_eq!(s.plan().formation, "3-5-2");
  assert_eq!(s.occupant("CM", Tier::First).unwrap().name, "Declan");
  assert_eq!(
    s.slot("CM").unwrap().role.as_deref(),
    Some("box-to-box-midfielder")
  );
}

#[test]
fn stored_plan_missing_slots_is_backfilled_on_open() {
  let mut kv = MemoryStore::new();
  kv.set(
    PLAN_KEY,
    r#"{"formation":"4-4-2","depthChart":{},"updatedAt":"2024-05-01T10:00:00.000Z"}"#,
  )
  .unwrap();

  let s = PlanStore::open(kv);
  assert_eq!(keys(s.plan()), canonical("4-4-2"));
}

// ─── Formation changes ───────────────────────────────────────────────────────

#[test]
fn set_formation_key_set_matches_canonical_list() {
  let mut s = store();
  for formation in FORMATIONS {
    s.set_formation(formation.name);
    assert_eq!(s.plan().formation, formation.name);
    assert_eq!(keys(s.plan()), canonical(formation.name));
  }
}

#[test]
fn formation_change_drops_missing_positions_and_adds_new_ones() {
  let mut s = store();
  s.set_formation("4-3-3");
  s.upsert_player("ST", Tier::First, player("st", "Harry"));
  s.upsert_player("RCB", Tier::Second, player("cb", "John"));

  s.set_formation("4-4-2");

  assert!(s.slot("ST").is_none());
  assert!(s.slot("RST").unwrap().is_empty());
  assert!(s.slot("LST").unwrap().is_empty());
  assert_eq!(s.occupant("RCB", Tier::Second).unwrap().id, "cb");
}

#[test]
fn unknown_formation_yields_empty_depth_chart() {
  let mut s = store();
  s.upsert_player("GK", Tier::First, player("gk", "Jordan"));

  s.set_formation("2-3-5");

  assert_eq!(s.plan().formation, "2-3-5");
  assert!(s.plan().depth_chart.is_empty());
  assert!(s.positions().is_empty());
}

// ─── Roles and players ───────────────────────────────────────────────────────

#[test]
fn set_role_creates_missing_slot_without_validation() {
  let mut s = store();
  s.set_position_role("XX", "made-up-role");
  assert_eq!(s.slot("XX").unwrap().role.as_deref(), Some("made-up-role"));

  s.set_position_role("XX", "another");
  assert_eq!(s.slot("XX").unwrap().role.as_deref(), Some("another"));
}

#[test]
fn upsert_then_read_returns_same_player() {
  let mut s = store();
  let p = player("p1", "Bukayo").with_loan_status(LoanStatus::OnLoan);

  s.upsert_player("AMR", Tier::Youth, p.clone());
  assert_eq!(s.occupant("AMR", Tier::Youth), Some(&p));
}

#[test]
fn upsert_replaces_whole_record() {
  let mut s = store();
  s.upsert_player("GK", Tier::First, player("a", "Aaron"));
  s.upsert_player("GK", Tier::First, player("b", "Nick"));

  let slot = s.slot("GK").unwrap();
  assert_eq!(slot.player_count(), 1);
  assert_eq!(slot.first.as_ref().unwrap().id, "b");
}

#[test]
fn remove_player_clears_tier() {
  let mut s = store();
  s.upsert_player("LB", Tier::Second, player("p", "Luke"));

  let removed = s.remove_player("LB", Tier::Second);
  assert_eq!(removed.unwrap().id, "p");
  assert!(s.occupant("LB", Tier::Second).is_none());
}

#[test]
fn remove_from_empty_tier_changes_only_timestamp() {
  let mut s = store();
  s.upsert_player("LB", Tier::First, player("p", "Luke"));
  let before = s.plan().clone();

  assert!(s.remove_player("LB", Tier::Youth).is_none());
  assert!(s.remove_player("NOPE", Tier::First).is_none());

  assert_eq!(s.plan().formation, before.formation);
  assert_eq!(s.plan().depth_chart, before.depth_chart);
  assert!(s.plan().updated_at >= before.updated_at);
}

// ─── Swaps ───────────────────────────────────────────────────────────────────

#[test]
fn swap_exchanges_two_occupied_coordinates() {
  let mut s = store();
  let a = player("a", "Alpha");
  let b = player("b", "Bravo");
  s.upsert_player("GK", Tier::First, a.clone());
  s.upsert_player("ST", Tier::Second, b.clone());

  s.swap_players("GK", Tier::First, "ST", Tier::Second);

  assert_eq!(s.occupant("GK", Tier::First), Some(&b));
  assert_eq!(s.occupant("ST", Tier::Second), Some(&a));
}

#[test]
fn swap_within_one_position_between_tiers() {
  let mut s = store();
  s.upsert_player("RB", Tier::First, player("a", "Alpha"));
  s.upsert_player("RB", Tier::Youth, player("b", "Bravo"));

  s.swap_players("RB", Tier::Youth, "RB", Tier::First);

  assert_eq!(s.occupant("RB", Tier::First).unwrap().id, "b");
  assert_eq!(s.occupant("RB", Tier::Youth).unwrap().id, "a");
}

#[test]
fn swap_from_empty_source_clears_destination() {
  let mut s = store();
  s.upsert_player("ST", Tier::First, player("st", "Harry"));

  s.swap_players("GK", Tier::Second, "ST", Tier::First);

  assert!(s.occupant("GK", Tier::Second).is_none());
  assert!(s.occupant("ST", Tier::First).is_none());
}

#[test]
fn swap_onto_empty_destination_moves_player() {
  let mut s = store();
  s.upsert_player("AMC", Tier::First, player("m", "Martin"));

  s.swap_players("AMC", Tier::First, "ST", Tier::Youth);

  assert!(s.occupant("AMC", Tier::First).is_none());
  assert_eq!(s.occupant("ST", Tier::Youth).unwrap().id, "m");
}

#[test]
fn swap_with_both_sides_empty_is_noop() {
  let mut s = store();
  let before = s.plan().depth_chart.clone();

  s.swap_players("GK", Tier::First, "ST", Tier::First);

  assert_eq!(s.plan().depth_chart, before);
}

#[test]
fn swap_onto_itself_keeps_player() {
  let mut s = store();
  s.upsert_player("GK", Tier::First, player("a", "Alpha"));

  s.swap_players("GK", Tier::First, "GK", Tier::First);

  assert_eq!(s.occupant("GK", Tier::First).unwrap().id, "a");
}

// ─── Reset / import / export ─────────────────────────────────────────────────

#[test]
fn reset_restores_default_plan_and_storage() {
  let mut s = store();
  s.set_formation("3-4-3");
  s.upsert_player("CB", Tier::First, player("cb", "Virgil"));

  s.reset();

  assert_eq!(s.plan().formation, default_formation().name);
  assert_eq!(keys(s.plan()), canonical(default_formation().name));
  assert!(s.plan().depth_chart.values().all(|slot| slot.is_empty()));

  let reopened = PlanStore::open(s.close());
  assert_eq!(reopened.plan().formation, default_formation().name);
  assert!(reopened.occupant("CB", Tier::First).is_none());
}

#[test]
fn export_then_import_reproduces_plan() {
  let mut s = store();
  s.set_formation("4-1-4-1");
  s.upsert_player("DM", Tier::First, player("dm", "Rodri"));
  s.upsert_player(
    "LM",
    Tier::Youth,
    player("lm", "Kid").with_loan_status(LoanStatus::LoanedOut),
  );
  s.set_position_role("DM", "half-back");
  let json = s.export().unwrap();

  let mut fresh = store();
  fresh.import(&json).unwrap();

  assert_eq!(fresh.plan().formation, s.plan().formation);
  assert_eq!(fresh.plan().depth_chart, s.plan().depth_chart);
}

#[test]
fn import_backfills_missing_positions_and_refreshes_timestamp() {
  let mut s = store();
  let json = r#"{
    "formation": "4-3-3",
    "depthChart": {
      "ST": { "first": {
        "id": "x", "name": "Ollie", "nationality": "England", "age": 28,
        "position": "ST", "currentAbility": 3.5, "potentialAbility": 4
      } }
    },
    "updatedAt": "2001-01-01T00:00:00.000Z"
  }"#;

  s.import(json).unwrap();

  assert_eq!(keys(s.plan()), canonical("4-3-3"));
  let st = s.occupant("ST", Tier::First).unwrap();
  assert_eq!(st.current_ability, stars(3.5));
  assert_eq!(st.loan_status, LoanStatus::Owned);
  assert!(s.plan().updated_at.timestamp() > 978_307_200);
}

#[test]
fn import_without_required_fields_is_rejected_and_plan_kept() {
  let mut s = store();
  s.upsert_player("GK", Tier::First, player("gk", "Jordan"));
  let before = s.plan().clone();

  let err = s.import(r#"{"depthChart":{}}"#).unwrap_err();
  assert!(matches!(err, ImportError::MissingField("formation")));

  let err = s.import(r#"{"formation":"4-3-3"}"#).unwrap_err();
  assert!(matches!(err, ImportError::MissingField("depthChart")));

  let err = s.import("[1, 2, 3]").unwrap_err();
  assert!(matches!(err, ImportError::NotAnObject));

  let err = s.import("not json").unwrap_err();
  assert!(matches!(err, ImportError::Malformed(_)));

  assert_eq!(s.plan(), &before);
}

#[test]
fn import_rejects_off_scale_ability() {
  let json = r#"{
    "formation": "4-4-2",
    "depthChart": { "GK": { "first": {
      "id": "g", "name": "G", "nationality": "Wales", "age": 30,
      "position": "GK", "currentAbility": 3.2, "potentialAbility": 4
    } } }
  }"#;
  assert!(matches!(parse_plan(json), Err(ImportError::InvalidShape(_))));
}

// ─── Persistence failures ────────────────────────────────────────────────────

#[test]
fn storage_failures_never_block_mutations() {
  let mut s = PlanStore::open(FailingStore);
  assert_eq!(s.plan().formation, default_formation().name);

  s.upsert_player("GK", Tier::First, player("gk", "Jordan"));
  s.set_formation("4-4-2");
  s.reset();
  s.upsert_player("RST", Tier::First, player("st", "Ivan"));
  s.set_theme(Theme::Dark);

  assert_eq!(s.occupant("RST", Tier::First).unwrap().id, "st");
  assert_eq!(s.theme(), Theme::Light);
}

#[test]
fn future_stamped_plan_gets_current_timestamp_on_mutation() {
  let mut kv = MemoryStore::new();
  kv.set(
    PLAN_KEY,
    r#"{"formation":"4-4-2","depthChart":{},"updatedAt":"2099-01-01T00:00:00Z"}"#,
  )
  .unwrap();
  let mut s = PlanStore::open(kv);
  assert_eq!(s.plan().updated_at.year(), 2099);

  let before = Utc::now();
  s.upsert_player("GK", Tier::First, player("gk", "Jordan"));
  let after_upsert = s.plan().updated_at;
  assert!(after_upsert >= before && after_upsert <= Utc::now());

  s.set_position_role("GK", "sweeper-keeper");
  assert!(s.plan().updated_at >= after_upsert);
  assert!(s.plan().updated_at <= Utc::now());
}

#[test]
fn stored_plan_without_timestamp_is_loaded() {
  let mut kv = MemoryStore::new();
  kv.set(
    PLAN_KEY,
    r#"{"formation":"3-5-2","depthChart":{"CM":{"role":"half-back"}}}"#,
  )
  .unwrap();

  let s = PlanStore::open(kv);
  assert_eq!(s.plan().formation, "3-5-2");
  assert_eq!(s.slot("CM").unwrap().role.as_deref(), Some("half-back"));
  assert_eq!(keys(s.plan()), canonical("3-5-2"));
}

#[test]
fn updated_at_never_decreases() {
  let mut s = store();
  let mut last = s.plan().updated_at;
  for tier in Tier::ALL {
    s.upsert_player("GK", tier, player("gk", "Jordan"));
    assert!(s.plan().updated_at >= last);
    last = s.plan().updated_at;
  }
}

// ─── Theme ───────────────────────────────────────────────────────────────────

#[test]
fn theme_defaults_to_light_and_round_trips() {
  let mut s = store();
  assert_eq!(s.theme(), Theme::Light);

  s.set_theme(Theme::Dark);
  assert_eq!(s.theme(), Theme::Dark);

  let kv = s.close();
  assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn unknown_stored_theme_reads_as_light() {
  let mut kv = MemoryStore::new();
  kv.set(THEME_KEY, "solarized").unwrap();
  assert_eq!(PlanStore::open(kv).theme(), Theme::Light);
}

// ─── Wire format ─────────────────────────────────────────────────────────────

#[test]
fn owned_players_omit_loan_status() {
  let owned = serde_json::to_value(player("a", "A")).unwrap();
  assert!(owned.get("loanStatus").is_none());
  assert_eq!(owned["currentAbility"], serde_json::json!(3));
  assert_eq!(owned["potentialAbility"], serde_json::json!(4.5));

  let loaned = serde_json::to_value(
    player("b", "B").with_loan_status(LoanStatus::OnLoan),
  )
  .unwrap();
  assert_eq!(loaned["loanStatus"], "on-loan");
}

#[test]
fn empty_slots_serialise_as_empty_objects() {
  let plan = SquadPlan::empty("4-4-2");
  let value = serde_json::to_value(&plan).unwrap();
  assert_eq!(value["depthChart"]["GK"], serde_json::json!({}));
  assert!(value["updatedAt"].is_string());
}

#[test]
fn ability_accepts_only_half_points() {
  assert_eq!(stars(2.5).half_points(), 5);
  assert_eq!(stars(2.5).to_string(), "2.5");
  assert_eq!(stars(4.0).to_string(), "4");
  assert!(Ability::new(5.5).is_err());
  assert!(Ability::new(-0.5).is_err());
  assert!(Ability::new(1.25).is_err());
  assert!("abc".parse::<Ability>().is_err());
}

#[test]
fn tier_parses_names_and_ranks() {
  assert_eq!("first".parse::<Tier>().unwrap(), Tier::First);
  assert_eq!("Youth".parse::<Tier>().unwrap(), Tier::Youth);
  assert_eq!("2".parse::<Tier>().unwrap(), Tier::Second);
  assert!("bench".parse::<Tier>().is_err());
}

// ─── Reference data ──────────────────────────────────────────────────────────

#[test]
fn unknown_formation_has_no_positions() {
  assert!(positions_for_formation("1-1-1").is_empty());
  assert_eq!(positions_for_formation("4-4-2").len(), 11);
}

#[test]
fn roles_for_shared_category_are_deduplicated() {
  let roles = roles_for_position("RCB");
  let bpcb: Vec<_> = roles
    .iter()
    .filter(|r| r.id == "ball-playing-centre-back")
    .collect();
  assert_eq!(bpcb.len(), 1);
  assert_eq!(
    bpcb[0].categories,
    vec![PositionCategory::CentreBack, PositionCategory::WideCentreBack]
  );
  assert!(roles.iter().any(|r| r.id == "overlapping-centre-back"));

  let cb = roles_for_position("CB");
  assert!(!cb.iter().any(|r| r.id == "overlapping-centre-back"));
}

#[test]
fn role_ids_are_unique_slugs() {
  let roles = all_roles();
  let ids: BTreeSet<_> = roles.iter().map(|r| r.id.clone()).collect();
  assert_eq!(ids.len(), roles.len());
  assert_eq!(role_id("Box-to-Box  Midfielder"), "box-to-box-midfielder");
}

#[test]
fn unknown_position_has_no_roles() {
  assert!(roles_for_position("SW").is_empty());
  assert!(find_role("ST", "poacher").is_some());
  assert!(find_role("GK", "Poacher").is_none());
}

// ─── Statistics ──────────────────────────────────────────────────────────────

#[test]
fn statistics_aggregate_formation_positions() {
  let mut s = store();
  s.set_formation("4-4-2");
  let mut young = player("y", "Young");
  young.age = 18;
  young.current_ability = stars(1.0);
  young.potential_ability = stars(5.0);

  s.upsert_player("GK", Tier::First, player("gk", "Keeper"));
  s.upsert_player("GK", Tier::Second, player("gk2", "Backup"));
  s.upsert_player(
    "RST",
    Tier::First,
    player("st", "Loanee").with_loan_status(LoanStatus::OnLoan),
  );
  s.upsert_player("RCM", Tier::Youth, young);
  // Outside the formation; ignored.
  s.upsert_player("AMC", Tier::First, player("amc", "Ghost"));

  let stats = s.statistics();
  assert_eq!(stats.total_players, 4);
  assert_eq!(stats.average_age, (24.0 * 3.0 + 18.0) / 4.0);
  assert_eq!(stats.average_current, (3.0 * 3.0 + 1.0) / 4.0);
  assert_eq!(stats.average_potential, (4.5 * 3.0 + 5.0) / 4.0);
  assert_eq!(stats.groups.goalkeepers, 2);
  assert_eq!(stats.groups.midfielders, 1);
  assert_eq!(stats.groups.attackers, 1);
  assert_eq!(stats.loans.owned, 3);
  assert_eq!(stats.loans.on_loan, 1);
  assert_eq!(stats.thin_positions.len(), 10);
  assert!(!stats.thin_positions.contains(&"GK".to_owned()));
}

#[test]
fn statistics_of_empty_plan_are_zero() {
  let stats = store().statistics();
  assert_eq!(stats.total_players, 0);
  assert_eq!(stats.average_age, 0.0);
  assert_eq!(stats.thin_positions.len(), 11);
}
