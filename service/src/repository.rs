//! Read access to species documents

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use pokedex_analysis::{PokemonLookup, TypeCatalog};
use pokedex_records::{PokemonDocument, parse_pokedex, parse_types};

/// Query surface over the species catalog.
///
/// Every listing is ordered by national-dex id.
pub trait PokemonRepository: PokemonLookup + Send + Sync {
    fn get_by_id(&self, id: u32) -> Option<PokemonDocument>;

    /// Case-insensitive match on the English name, then the other languages
    fn get_by_name(&self, name: &str) -> Option<PokemonDocument>;

    fn by_type(&self, type_name: &str) -> Vec<PokemonDocument>;

    fn by_generation(&self, generation: u8) -> Vec<PokemonDocument>;

    /// Exact id match first, then name substring matches, at most `limit`
    fn search(&self, query: &str, limit: usize) -> Vec<PokemonDocument>;
}

/// Fully loaded, read-only repository
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    docs: Vec<PokemonDocument>,
    by_id: HashMap<u32, usize>,
}

impl MemoryRepository {
    /// Build from raw documents, filling in the import-time derived fields.
    ///
    /// A repeated id keeps its first document.
    pub fn from_documents<I>(docs: I) -> Self
    where
        I: IntoIterator<Item = PokemonDocument>,
    {
        let mut docs: Vec<PokemonDocument> = docs
            .into_iter()
            .map(PokemonDocument::with_derived_fields)
            .collect();
        // stable, so the first of a repeated id stays in front
        docs.sort_by_key(|doc| doc.id);

        let mut repo = Self::default();
        for doc in docs {
            if repo.by_id.contains_key(&doc.id) {
                tracing::warn!(id = doc.id, "Duplicate species document ignored");
                continue;
            }
            repo.by_id.insert(doc.id, repo.docs.len());
            repo.docs.push(doc);
        }

        repo
    }

    /// Load `pokedex.json`
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let docs = parse_pokedex(&json).with_context(|| format!("Failed to parse {}", path.display()))?;

        let repo = Self::from_documents(docs);
        tracing::info!(count = repo.len(), path = %path.display(), "Loaded species catalog");
        Ok(repo)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PokemonDocument> {
        self.docs.iter()
    }

    fn get(&self, id: u32) -> Option<&PokemonDocument> {
        self.by_id.get(&id).map(|&idx| &self.docs[idx])
    }

    fn collect<P>(&self, predicate: P) -> Vec<PokemonDocument>
    where
        P: Fn(&PokemonDocument) -> bool,
    {
        self.docs.iter().filter(|doc| predicate(doc)).cloned().collect()
    }
}

/// Load `types.json` into a catalog
pub async fn load_catalog(path: impl AsRef<Path>) -> Result<TypeCatalog> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let types = parse_types(&json).with_context(|| format!("Failed to parse {}", path.display()))?;

    let catalog = TypeCatalog::load(types);
    tracing::info!(count = catalog.len(), path = %path.display(), "Loaded type catalog");
    Ok(catalog)
}

fn localized_names(doc: &PokemonDocument) -> impl Iterator<Item = &str> {
    std::iter::once(doc.name.english.as_str()).chain(
        [&doc.name.japanese, &doc.name.chinese, &doc.name.french]
            .into_iter()
            .filter_map(|name| name.as_deref()),
    )
}

impl PokemonRepository for MemoryRepository {
    fn get_by_id(&self, id: u32) -> Option<PokemonDocument> {
        self.get(id).cloned()
    }

    fn get_by_name(&self, name: &str) -> Option<PokemonDocument> {
        let name = name.trim().to_lowercase();
        let matches = |n: &str| n.to_lowercase() == name;

        self.docs
            .iter()
            .find(|doc| matches(&doc.name.english))
            .or_else(|| {
                self.docs
                    .iter()
                    .find(|doc| localized_names(doc).skip(1).any(|n| matches(n)))
            })
            .cloned()
    }

    fn by_type(&self, type_name: &str) -> Vec<PokemonDocument> {
        self.collect(|doc| doc.types().iter().any(|t| t == type_name))
    }

    fn by_generation(&self, generation: u8) -> Vec<PokemonDocument> {
        self.collect(|doc| doc.generation == Some(generation))
    }

    fn search(&self, query: &str, limit: usize) -> Vec<PokemonDocument> {
        let query = query.trim().to_lowercase();
        let mut results: Vec<&PokemonDocument> = Vec::new();

        if let Some(doc) = query.parse().ok().and_then(|id| self.get(id)) {
            results.push(doc);
        }

        for doc in &self.docs {
            if results.len() >= limit {
                break;
            }
            if results.iter().any(|r| r.id == doc.id) {
                continue;
            }
            if localized_names(doc).any(|n| n.to_lowercase().contains(&query)) {
                results.push(doc);
            }
        }

        results.truncate(limit);
        results.into_iter().cloned().collect()
    }
}

impl PokemonLookup for MemoryRepository {
    fn lookup_by_id(&self, id: u32) -> Option<PokemonDocument> {
        self.get_by_id(id)
    }
}
