//! Type effectiveness, team coverage and evolution chains for the pokedex.
//!
//! # Overview
//!
//! `pokedex-analysis` is the computational core of the pokedex. Everything in
//! it is a pure, synchronous computation over data that has already been
//! fetched:
//!
//! ```text
//! pokedex-records (documents)
//!        │
//!        ▼
//! pokedex-analysis (catalog + queries + evolution) ← THIS CRATE
//!        │
//!        ├─> pokedex-team (team state)
//!        └─> pokedex-service (repository, sessions, CLI)
//! ```
//!
//! # Main Types
//!
//! - [`TypeCatalog`] - Immutable table of defensive type records
//! - [`EffectivenessResult`] - Attacking types bucketed against one defender
//! - [`TeamTally`] - Roster-wide weakness/resistance/immunity counts
//! - [`EvolutionChain`] - Staged chain around one species
//!
//! # Example Usage
//!
//! ```
//! use pokedex_analysis::{TypeCatalog, classify};
//!
//! let catalog = TypeCatalog::standard();
//! let result = classify(&["Grass", "Steel"], &catalog);
//!
//! assert_eq!(result.super_weak, vec!["Fire"]);
//! assert_eq!(result.immune, vec!["Poison"]);
//! ```

use thiserror::Error;

pub mod evolution;
pub mod query;
pub mod types;

pub use evolution::{EvolutionChain, EvolutionNode, PokemonLookup, branches, resolve};
pub use query::{
    Bucket, EffectivenessResult, MalformedTypeSet, TeamMember, TeamTally, TypeCounts, TypeSet,
    analyze, analyze_with, classify, classify_set, exponents,
};
pub use types::{Type, TypeCatalog, TypeRecord, TYPE_CHART};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Unknown type: {0}")]
    UnknownType(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvolutionError {
    #[error("Pokemon not found: {0}")]
    NotFound(u32),
}
