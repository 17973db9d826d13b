use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use pokedex_records::generations;
use pokedex_service::{Config, Pokedex, PokemonRepository};
use serde::Serialize;

#[derive(Debug, clap::Parser)]
#[command(author, version, about = "Query the pokedex catalog from the command line")]
struct App {
    #[command(subcommand)]
    command: SubCommands,

    /// Directory holding pokedex.json and types.json, overriding POKEDEX_DATA_PATH
    #[clap(long, global = true)]
    data_path: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum SubCommands {
    /// Species document with its type effectiveness and abilities
    Detail { id: u32 },

    /// Evolution chain around a species
    Evolution {
        id: u32,

        /// List every direct successor instead of the chain
        #[clap(long)]
        branches: bool,
    },

    /// Two species side by side
    Compare { first: u32, second: u32 },

    /// Weakness, resistance and immunity tally for a roster of ids
    Team {
        #[clap(required = true)]
        ids: Vec<u32>,
    },

    /// Effectiveness against one or two defending types
    Types {
        first: String,
        second: Option<String>,
    },

    /// Search species by id or name
    Search {
        query: String,

        #[clap(long, default_value_t = 20)]
        limit: usize,
    },

    /// List the generations
    Generations,
}

fn print<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn open(config: &Config) -> Result<Pokedex> {
    Pokedex::open(config)
        .await
        .with_context(|| format!("Failed to open pokedex data in {}", config.data_path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let app = App::parse();
    let mut config = Config::from_env();
    if let Some(path) = app.data_path {
        config.data_path = path;
    }

    match app.command {
        SubCommands::Detail { id } => print(&open(&config).await?.detail(id)?),
        SubCommands::Compare { first, second } => print(&open(&config).await?.compare(first, second)?),
        SubCommands::Evolution { id, branches: false } => print(&open(&config).await?.evolution(id)?),
        SubCommands::Evolution { id, branches: true } => {
            print(&open(&config).await?.evolution_branches(id)?)
        }
        SubCommands::Team { ids } => {
            if ids.len() > config.max_team_size {
                bail!("A team holds at most {} Pokemon", config.max_team_size);
            }
            print(&open(&config).await?.analyze_ids(&ids))
        }
        SubCommands::Types { first, second } => {
            let pokedex = open(&config).await?;
            let types: Vec<String> = std::iter::once(first).chain(second).collect();
            for name in &types {
                if !pokedex.catalog().contains(name) {
                    tracing::warn!(type_name = %name, "Type not in catalog");
                }
            }
            print(&pokedex.effectiveness(&types))
        }
        SubCommands::Search { query, limit } => {
            print(&open(&config).await?.repository().search(&query, limit))
        }
        SubCommands::Generations => print(&generations()),
    }
}
