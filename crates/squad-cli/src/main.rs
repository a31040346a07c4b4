//! `squad` — command-line front end for the squad planner.
//!
//! # Usage
//!
//! ```text
//! squad show
//! squad formation 4-4-2
//! squad set RST first --name "Alan" --nationality England --age 24 --ca 3.5 --pa 4.5
//! squad swap RST first LST second
//! squad export --output backup.json
//! squad --store /tmp/plan.db import backup.json
//! ```

mod commands;
mod render;
mod settings;


use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use squad_core::{
  persistence::Theme,
  plan::Tier,
  planner::PlanStore,
  player::{Ability, LoanStatus},
};
use squad_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use settings::{Settings, expand_tilde};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "squad", version, about = "Plan a football squad's depth chart")]
pub(crate) struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "squad.toml")]
  pub config: PathBuf,

  /// SQLite file holding the plan; overrides the configured `store_path`.
  #[arg(long, value_name = "FILE")]
  pub store: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
  /// Print the depth chart for the current formation.
  Show,

  /// List the known formations.
  Formations,

  /// Switch formation, keeping players at positions both formations share.
  Formation { name: String },

  /// List the tactical roles available to a position code.
  Roles { position: String },

  /// Set the tactical role for a position.
  Role { position: String, role: String },

  /// Place a player at a position and tier, replacing any occupant.
  Set(SetArgs),

  /// Clear a position's tier.
  Remove { position: String, tier: Tier },

  /// Exchange the players at two (position, tier) coordinates.
  Swap {
    from_position: String,
    from_tier:     Tier,
    to_position:   String,
    to_tier:       Tier,
  },

  /// Delete the stored plan and start over from the default formation.
  Reset {
    /// Confirm the reset.
    #[arg(long)]
    yes: bool,
  },

  /// Write the plan as pretty-printed JSON.
  Export {
    /// Output file (default: fm-squad-plan-<date>.json).
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write to stdout instead of a file.
    #[arg(long, conflicts_with = "output")]
    stdout: bool,
  },

  /// Replace the plan with one read from a JSON file.
  Import { file: PathBuf },

  /// Show squad totals and averages.
  Stats {
    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
  },

  /// Show or change the stored theme preference.
  Theme { theme: Option<Theme> },
}

#[derive(Args, Debug)]
pub(crate) struct SetArgs {
  pub position: String,

  pub tier: Tier,

  #[arg(long)]
  pub name: String,

  #[arg(long)]
  pub nationality: String,

  #[arg(long, value_parser = clap::value_parser!(u8).range(16..=45))]
  pub age: u8,

  /// Current ability, 0 to 5 in steps of 0.5.
  #[arg(long = "ca", value_name = "STARS")]
  pub current_ability: Ability,

  /// Potential ability, 0 to 5 in steps of 0.5.
  #[arg(long = "pa", value_name = "STARS")]
  pub potential_ability: Ability,

  /// owned, on-loan or loaned-out.
  #[arg(long, default_value = "owned")]
  pub loan: LoanStatus,

  /// Player id; defaults to the current occupant's id, or a new UUID.
  #[arg(long)]
  pub id: Option<String>,

  /// The player's natural position; defaults to the slot's position code.
  #[arg(long)]
  pub player_position: Option<String>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(&cli.config)?;
  let store_path = expand_tilde(cli.store.as_deref().unwrap_or(&settings.store_path));

  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let storage = SqliteStore::open(&store_path)
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let mut plans = PlanStore::open(storage);

  let mut stdout = std::io::stdout().lock();
  let result = commands::run(cli.command, &mut plans, &mut stdout).await;

  drop(plans.close());
  result
}
