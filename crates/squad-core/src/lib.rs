//! Core types for the squad planner.
//!
//! Holds the depth-chart domain model, the static formation and role tables,
//! the key-value storage abstraction, and the [`planner::PlanStore`] that owns
//! the current plan. Storage backends (e.g. `squad-store-sqlite`) and front
//! ends (`squad-cli`) depend on this crate; it depends on no backend.

pub mod error;
pub mod formation;
pub mod persistence;
pub mod plan;
pub mod planner;
pub mod player;
pub mod roles;
pub mod stats;
pub mod storage;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
