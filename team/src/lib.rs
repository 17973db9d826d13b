//! Team builder state
//!
//! A [`TeamState`] is an explicit value owned by whoever drives the team
//! builder. Every editing operation either succeeds or returns a
//! [`TeamError`] and leaves the team untouched.

use pokedex_analysis::TeamMember;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_TEAM_NAME: &str = "My Team";
pub const DEFAULT_CAPACITY: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TeamError {
    #[error("Team is already full (max {capacity} Pokemon)")]
    TeamFull { capacity: usize },

    #[error("Invalid position {position} for a team of {len}")]
    InvalidPosition { position: usize, len: usize },

    #[error("Cannot save empty team")]
    EmptyTeam,
}

/// One roster entry; its position is its index in [`TeamState::members`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSlot {
    pub pokemon_id: u32,
    pub name: String,
    pub types: Vec<String>,
    #[serde(default)]
    pub moves: Vec<String>,
    pub ability: Option<String>,
    pub item: Option<String>,
}

impl TeamSlot {
    pub fn new(pokemon_id: u32, name: impl Into<String>, types: Vec<String>) -> Self {
        Self {
            pokemon_id,
            name: name.into(),
            types,
            moves: Vec::new(),
            ability: None,
            item: None,
        }
    }
}

/// Partial edit of a slot; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSlotUpdate {
    pub moves: Option<Vec<String>>,
    pub ability: Option<String>,
    pub item: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamState {
    pub name: String,
    #[serde(rename = "pokemon", default)]
    pub members: Vec<TeamSlot>,
    #[serde(skip, default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for TeamState {
    fn default() -> Self {
        Self::new(DEFAULT_TEAM_NAME)
    }
}

impl TeamState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    /// Append a slot at the end of the roster
    pub fn add(&mut self, slot: TeamSlot) -> Result<usize, TeamError> {
        if self.is_full() {
            return Err(TeamError::TeamFull {
                capacity: self.capacity,
            });
        }

        self.members.push(slot);
        Ok(self.members.len() - 1)
    }

    /// Remove the slot at `position`; later slots shift down by one
    pub fn remove(&mut self, position: usize) -> Result<TeamSlot, TeamError> {
        self.check_position(position)?;
        Ok(self.members.remove(position))
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// An empty name resets to the default
    pub fn rename(&mut self, name: &str) {
        let name = name.trim();
        self.name = if name.is_empty() {
            DEFAULT_TEAM_NAME.to_string()
        } else {
            name.to_string()
        };
    }

    pub fn update(&mut self, position: usize, update: TeamSlotUpdate) -> Result<&TeamSlot, TeamError> {
        self.check_position(position)?;
        let slot = &mut self.members[position];

        if let Some(moves) = update.moves {
            slot.moves = moves;
        }
        if let Some(ability) = update.ability {
            slot.ability = Some(ability);
        }
        if let Some(item) = update.item {
            slot.item = Some(item);
        }

        Ok(slot)
    }

    /// Project the roster onto what the team analyzer consumes
    pub fn roster(&self) -> Vec<TeamMember> {
        self.members
            .iter()
            .map(|slot| TeamMember {
                id: slot.pokemon_id,
                types: slot.types.clone(),
            })
            .collect()
    }

    fn check_position(&self, position: usize) -> Result<(), TeamError> {
        if position < self.members.len() {
            Ok(())
        } else {
            Err(TeamError::InvalidPosition {
                position,
                len: self.members.len(),
            })
        }
    }
}
