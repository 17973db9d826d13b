use std::path::PathBuf;
use std::str::FromStr;

use pokedex_team::{DEFAULT_CAPACITY, DEFAULT_TEAM_NAME};

pub const DATA_PATH_VAR: &str = "POKEDEX_DATA_PATH";
pub const MAX_TEAM_SIZE_VAR: &str = "POKEDEX_MAX_TEAM_SIZE";
pub const DEFAULT_TEAM_NAME_VAR: &str = "POKEDEX_DEFAULT_TEAM_NAME";

pub const DEFAULT_DATA_PATH: &str = "pokemon-data.json";

/// Runtime settings, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `pokedex.json` and `types.json`
    pub data_path: PathBuf,
    pub max_team_size: usize,
    pub default_team_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            max_team_size: DEFAULT_CAPACITY,
            default_team_name: DEFAULT_TEAM_NAME.to_string(),
        }
    }
}

impl Config {
    /// Read every setting from the process environment, falling back to
    /// defaults for anything unset or unparsable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with an explicit variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            data_path: lookup(DATA_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            max_team_size: parse_or(&lookup, MAX_TEAM_SIZE_VAR, defaults.max_team_size),
            default_team_name: lookup(DEFAULT_TEAM_NAME_VAR)
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.default_team_name),
        }
    }

    pub fn pokedex_file(&self) -> PathBuf {
        self.data_path.join("pokedex.json")
    }

    pub fn types_file(&self) -> PathBuf {
        self.data_path.join("types.json")
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, %default, "Unparsable setting, using default");
            default
        }
    }
}
