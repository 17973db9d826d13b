//! The type catalog: an immutable table of defensive type records

use std::collections::HashMap;

use pokedex_records::TypeDocument;
use serde::{Deserialize, Serialize};

use super::pokemon_type::Type;
use crate::CatalogError;

/// Defensive interactions of one type.
///
/// `effective` holds the attacking types this type is weak to, `ineffective`
/// the ones it resists, `no_effect` the ones it is immune to. A name appears
/// in at most one of the three lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub name: String,
    pub effective: Vec<String>,
    pub ineffective: Vec<String>,
    #[serde(rename = "noEffect")]
    pub no_effect: Vec<String>,
}

impl TypeRecord {
    pub fn is_weak_to(&self, attacker: &str) -> bool {
        self.effective.iter().any(|t| t == attacker)
    }

    pub fn resists(&self, attacker: &str) -> bool {
        self.ineffective.iter().any(|t| t == attacker)
    }

    pub fn is_immune_to(&self, attacker: &str) -> bool {
        self.no_effect.iter().any(|t| t == attacker)
    }

    /// Enforce disjoint lists, `no_effect` over `effective` over `ineffective`
    fn normalized(mut self) -> Self {
        let mut seen: Vec<String> = Vec::new();
        for list in [&mut self.no_effect, &mut self.effective, &mut self.ineffective] {
            list.retain(|name| {
                if seen.contains(name) {
                    tracing::warn!(attacker = %name, "Type listed twice in one record, keeping first");
                    false
                } else {
                    seen.push(name.clone());
                    true
                }
            });
        }
        self
    }
}

impl From<TypeDocument> for TypeRecord {
    fn from(doc: TypeDocument) -> Self {
        Self {
            name: doc.name,
            effective: doc.effective,
            ineffective: doc.ineffective,
            no_effect: doc.no_effect,
        }
    }
}

/// Fully loaded, read-only table of type records.
///
/// Iteration follows declaration order, which is also the tie-break order
/// for every ranked output built on top of the catalog.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    records: Vec<TypeRecord>,
    index: HashMap<String, usize>,
}

impl TypeCatalog {
    /// Build a catalog from records; later duplicates of a name are dropped
    pub fn load<I>(records: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TypeRecord>,
    {
        let mut catalog = Self::default();

        for record in records {
            let record: TypeRecord = record.into();
            let record = record.normalized();
            if catalog.index.contains_key(&record.name) {
                tracing::warn!(type_name = %record.name, "Duplicate type record ignored");
                continue;
            }
            catalog.index.insert(record.name.clone(), catalog.records.len());
            catalog.records.push(record);
        }

        catalog
    }

    /// The canonical 18-type catalog built from the built-in chart
    pub fn standard() -> Self {
        Self::load(Type::ALL.iter().map(Type::record))
    }

    pub fn lookup(&self, name: &str) -> Result<&TypeRecord, CatalogError> {
        self.get(name)
            .ok_or_else(|| CatalogError::UnknownType(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&TypeRecord> {
        self.index.get(name).map(|&idx| &self.records[idx])
    }

    /// Declaration position of a type name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeRecord> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = TypeCatalog::standard();

        assert_eq!(catalog.len(), 18);
        assert_eq!(catalog.names().next(), Some("Normal"));
        assert_eq!(catalog.position("Fairy"), Some(17));
        assert!(catalog.lookup("Steel").unwrap().resists("Fairy"));
    }

    #[test]
    fn test_lookup_unknown() {
        let catalog = TypeCatalog::standard();

        match catalog.lookup("Shadow") {
            Err(CatalogError::UnknownType(name)) => assert_eq!(name, "Shadow"),
            other => panic!("expected UnknownType, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_documents() {
        let mut fire = TypeDocument::new("Fire");
        fire.effective = vec!["Water".into(), "Ground".into(), "Rock".into()];
        let catalog = TypeCatalog::load(vec![fire, TypeDocument::new("Water")]);

        assert_eq!(catalog.len(), 2);
        assert!(catalog.lookup("Fire").unwrap().is_weak_to("Rock"));
    }

    #[test]
    fn test_load_keeps_first_duplicate() {
        let mut first = TypeDocument::new("Fire");
        first.effective = vec!["Water".into()];
        let second = TypeDocument::new("Fire");

        let catalog = TypeCatalog::load(vec![first, second]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.lookup("Fire").unwrap().is_weak_to("Water"));
    }

    #[test]
    fn test_load_makes_lists_disjoint() {
        let mut doc = TypeDocument::new("Odd");
        doc.effective = vec!["Ghost".into(), "Fire".into()];
        doc.ineffective = vec!["Fire".into()];
        doc.no_effect = vec!["Ghost".into()];

        let catalog = TypeCatalog::load(vec![doc]);
        let record = catalog.lookup("Odd").unwrap();
        assert_eq!(record.no_effect, vec!["Ghost"]);
        assert_eq!(record.effective, vec!["Fire"]);
        assert!(record.ineffective.is_empty());
    }
}
