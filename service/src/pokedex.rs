//! The pokedex facade: catalog, species repository and session teams

use std::sync::Arc;

use anyhow::Result;
use pokedex_analysis::{
    EffectivenessResult, EvolutionChain, EvolutionNode, TeamTally, TypeCatalog, analyze,
    analyze_with, branches, classify, resolve,
};
use pokedex_records::{Ability, PokemonDocument, normalize_abilities};
use pokedex_team::{TeamSlot, TeamState};
use serde::Serialize;

use crate::ServiceError;
use crate::config::Config;
use crate::repository::{MemoryRepository, PokemonRepository, load_catalog};
use crate::store::{SessionId, TeamStore};

/// Everything the detail view shows for one species
#[derive(Debug, Clone, Serialize)]
pub struct PokemonDetail {
    pub pokemon: PokemonDocument,
    pub effectiveness: EffectivenessResult,
    pub abilities: Vec<Ability>,
    pub base_stat_total: Option<u64>,
}

/// Two species side by side
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub first: PokemonDetail,
    pub second: PokemonDetail,
}

pub struct Pokedex<R = MemoryRepository> {
    repo: Arc<R>,
    catalog: Arc<TypeCatalog>,
    teams: TeamStore,
}

impl Pokedex<MemoryRepository> {
    /// Load both catalog files from the configured data directory
    pub async fn open(config: &Config) -> Result<Self> {
        let repo = MemoryRepository::load(config.pokedex_file()).await?;
        let catalog = load_catalog(config.types_file()).await?;

        Ok(Self::new(Arc::new(repo), Arc::new(catalog), config))
    }
}

impl<R: PokemonRepository> Pokedex<R> {
    pub fn new(repo: Arc<R>, catalog: Arc<TypeCatalog>, config: &Config) -> Self {
        Self {
            repo,
            catalog,
            teams: TeamStore::new(config),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn teams(&self) -> &TeamStore {
        &self.teams
    }

    fn pokemon(&self, id: u32) -> Result<PokemonDocument, ServiceError> {
        self.repo.get_by_id(id).ok_or(ServiceError::PokemonNotFound(id))
    }

    pub fn detail(&self, id: u32) -> Result<PokemonDetail, ServiceError> {
        let pokemon = self.pokemon(id)?;

        Ok(PokemonDetail {
            effectiveness: classify(pokemon.types(), &self.catalog),
            abilities: normalize_abilities(&pokemon),
            base_stat_total: pokemon.base_stat_total(),
            pokemon,
        })
    }

    pub fn compare(&self, first: u32, second: u32) -> Result<Comparison, ServiceError> {
        Ok(Comparison {
            first: self.detail(first)?,
            second: self.detail(second)?,
        })
    }

    pub fn effectiveness<S: AsRef<str>>(&self, types: &[S]) -> EffectivenessResult {
        classify(types, &self.catalog)
    }

    pub fn evolution(&self, id: u32) -> Result<EvolutionChain, ServiceError> {
        Ok(resolve(id, self.repo.as_ref())?)
    }

    pub fn evolution_branches(&self, id: u32) -> Result<Vec<EvolutionNode>, ServiceError> {
        Ok(branches(id, self.repo.as_ref())?)
    }

    /// Tally an ad-hoc roster of ids; unknown ids are skipped
    pub fn analyze_ids(&self, ids: &[u32]) -> TeamTally {
        analyze_with(ids, self.repo.as_ref(), &self.catalog)
    }

    pub async fn analyze_session(&self, session: &SessionId) -> TeamTally {
        let team = self.teams.get(session).await;
        analyze(&team.roster(), &self.catalog)
    }

    /// Append a species to the session's team
    pub async fn add_to_team(&self, session: &SessionId, id: u32) -> Result<TeamState, ServiceError> {
        let pokemon = self.pokemon(id)?;
        let slot = TeamSlot::new(pokemon.id, pokemon.display_name(), pokemon.types().to_vec());

        Ok(self
            .teams
            .modify(session, |team| {
                team.add(slot)?;
                Ok(team.clone())
            })
            .await?)
    }
}
