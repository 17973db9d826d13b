//! Document shapes for the pokedex catalog data.
//!
//! The catalog ships as two JSON files: `pokedex.json` (one document per
//! species) and `types.json` (one document per elemental type). This crate
//! decodes both, normalises the ability fields that older exports stored in
//! half a dozen different layouts, and computes the fields that are derived
//! once at import time (generation, legendary and mythical flags).

use thiserror::Error;

pub mod abilities;
pub mod import;
pub mod pokemon;
pub mod types;

pub use abilities::{Ability, AbilityShape, apply_descriptions, normalize_abilities};
pub use import::{Generation, generation_for, generations, is_legendary, is_mythical};
pub use pokemon::{EvolutionLink, EvolutionLinks, Images, PokemonDocument, PokemonName};
pub use types::TypeDocument;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Invalid record id: {0}")]
    InvalidId(String),

    #[error("Evolution link is empty")]
    EmptyLink,

    #[error("Failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Decode the contents of `pokedex.json`
pub fn parse_pokedex(json: &str) -> Result<Vec<PokemonDocument>, RecordError> {
    serde_json::from_str(json).map_err(|source| RecordError::Decode {
        what: "pokedex",
        source,
    })
}

/// Decode the contents of `types.json`
pub fn parse_types(json: &str) -> Result<Vec<TypeDocument>, RecordError> {
    serde_json::from_str(json).map_err(|source| RecordError::Decode {
        what: "types",
        source,
    })
}
