//! Service layer for the pokedex.
//!
//! Wires the species repository, the type catalog and per-session team
//! state together behind [`Pokedex`].
//!
//! # Example
//!
//! ```no_run
//! use pokedex_service::{Config, Pokedex, SessionId};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let pokedex = Pokedex::open(&Config::from_env()).await?;
//! let session = SessionId::from("ash");
//!
//! pokedex.add_to_team(&session, 25).await?;
//! let tally = pokedex.analyze_session(&session).await;
//! println!("{}", serde_json::to_string_pretty(&tally)?);
//! # Ok(())
//! # }
//! ```

mod config;
mod pokedex;
mod repository;
mod store;

use pokedex_analysis::EvolutionError;
use pokedex_team::TeamError;
use thiserror::Error;

pub use config::Config;
pub use pokedex::{Comparison, Pokedex, PokemonDetail};
pub use repository::{MemoryRepository, PokemonRepository, load_catalog};
pub use store::{MemoryArchive, SavedTeam, SessionId, TeamArchive, TeamId, TeamStore};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Pokemon not found: {0}")]
    PokemonNotFound(u32),

    #[error("Team not found: {0}")]
    TeamNotFound(TeamId),

    #[error(transparent)]
    Evolution(#[from] EvolutionError),

    #[error(transparent)]
    Team(#[from] TeamError),
}
