//! Subcommand handlers. Each one drives the plan store and writes its
//! output to `out`.

use std::{io::Write, path::PathBuf};

use anyhow::{Context as _, bail};
use squad_core::{
  formation::{formation_names, is_known_formation},
  planner::PlanStore,
  player::Player,
  roles::{find_role, roles_for_position},
  storage::KeyValueStore,
};
use uuid::Uuid;

use crate::{Command, SetArgs, render};

pub async fn run<S: KeyValueStore>(
  command: Command,
  plans: &mut PlanStore<S>,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  match command {
    Command::Show => render::depth_chart(out, plans.plan())?,

    Command::Formations => {
      for name in formation_names() {
        let marker = if name == plans.plan().formation { "*" } else { " " };
        writeln!(out, "{marker} {name}")?;
      }
    }

    Command::Formation { name } => {
      if !is_known_formation(&name) {
        tracing::warn!(formation = %name, "not a known formation");
      }
      plans.set_formation(&name);
      writeln!(out, "Formation set to {name}")?;
    }

    Command::Roles { position } => {
      render::roles(out, &position, &roles_for_position(&position))?;
    }

    Command::Role { position, role } => {
      let id = match find_role(&position, &role) {
        Some(r) => r.id,
        None => {
          tracing::warn!(%position, %role, "role is not listed for this position");
          role
        }
      };
      plans.set_position_role(&position, &id);
      writeln!(out, "{position} role set to {id}")?;
    }

    Command::Set(args) => set_player(plans, args, out)?,

    Command::Remove { position, tier } => {
      match plans.remove_player(&position, tier) {
        Some(p) => writeln!(out, "Removed {} from {position} {tier}", p.name)?,
        None => writeln!(out, "{position} {tier} was already empty")?,
      }
    }

    Command::Swap { from_position, from_tier, to_position, to_tier } => {
      plans.swap_players(&from_position, from_tier, &to_position, to_tier);
      writeln!(
        out,
        "Swapped {from_position} {from_tier} with {to_position} {to_tier}"
      )?;
    }

    Command::Reset { yes } => {
      if !yes {
        bail!("reset deletes every player in the plan; pass --yes to confirm");
      }
      plans.reset();
      writeln!(out, "Plan reset to {}", plans.plan().formation)?;
    }

    Command::Export { output, stdout } => {
      let json = plans.export().context("failed to serialise plan")?;
      if stdout {
        writeln!(out, "{json}")?;
      } else {
        let path = output.unwrap_or_else(default_export_path);
        tokio::fs::write(&path, json.as_bytes())
          .await
          .with_context(|| format!("failed to write {}", path.display()))?;
        writeln!(out, "Exported plan to {}", path.display())?;
      }
    }

    Command::Import { file } => {
      let contents = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
      plans
        .import(&contents)
        .with_context(|| format!("failed to import {}", file.display()))?;
      writeln!(out, "Imported plan ({})", plans.plan().formation)?;
    }

    Command::Stats { json } => {
      let stats = plans.statistics();
      if json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out)?;
      } else {
        render::statistics(out, &stats)?;
      }
    }

    Command::Theme { theme } => match theme {
      Some(theme) => {
        plans.set_theme(theme);
        writeln!(out, "Theme set to {theme}")?;
      }
      None => writeln!(out, "{}", plans.theme())?,
    },
  }

  Ok(())
}

fn set_player<S: KeyValueStore>(
  plans: &mut PlanStore<S>,
  args: SetArgs,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  let id = args
    .id
    .or_else(|| plans.occupant(&args.position, args.tier).map(|p| p.id.clone()))
    .unwrap_or_else(|| Uuid::new_v4().to_string());

  let player = Player::new(
    id,
    args.name,
    args.nationality,
    args.age,
    args.player_position.unwrap_or_else(|| args.position.clone()),
    args.current_ability,
    args.potential_ability,
  )
  .with_loan_status(args.loan);

  writeln!(
    out,
    "{} {}: {}",
    args.position,
    args.tier,
    render::player_line(&player)
  )?;
  plans.upsert_player(&args.position, args.tier, player);
  Ok(())
}

/// `fm-squad-plan-YYYY-MM-DD.json` in the working directory.
pub fn default_export_path() -> PathBuf {
  let date = chrono::Local::now().format("%Y-%m-%d");
  PathBuf::from(format!("fm-squad-plan-{date}.json"))
}
