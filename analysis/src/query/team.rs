//! Roster-wide aggregation of type effectiveness

use serde::{Deserialize, Serialize, Serializer};

use super::effectiveness::classify;
use crate::evolution::PokemonLookup;
use crate::types::TypeCatalog;

/// The projection of a roster member that analysis needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u32,
    pub types: Vec<String>,
}

impl TeamMember {
    pub fn new(id: u32, types: &[&str]) -> Self {
        Self {
            id,
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Attacking type name to member count, highest count first.
///
/// Equal counts keep catalog declaration order. Serializes as a JSON object
/// in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCounts(Vec<(String, usize)>);

impl TypeCounts {
    fn ranked(catalog: &TypeCatalog, counts: &[usize]) -> Self {
        let mut entries: Vec<(String, usize)> = catalog
            .names()
            .zip(counts.iter().copied())
            .filter(|&(_, count)| count > 0)
            .map(|(name, count)| (name.to_string(), count))
            .collect();

        // stable, so ties stay in catalog order
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self(entries)
    }

    pub fn get(&self, name: &str) -> usize {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, count)| count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TypeCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, count)| (name, count)))
    }
}

/// Roster-wide counts of members weak to, resisting, or immune to each type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamTally {
    pub weaknesses: TypeCounts,
    pub resistances: TypeCounts,
    pub immunities: TypeCounts,
}

impl TeamTally {
    /// Attacking types at least `threshold` members are weak to, with no
    /// member resisting or immune
    pub fn coverage_gaps(&self, threshold: usize) -> Vec<&str> {
        self.weaknesses
            .iter()
            .filter(|&(name, count)| {
                count >= threshold
                    && self.resistances.get(name) == 0
                    && self.immunities.get(name) == 0
            })
            .map(|(name, _)| name)
            .collect()
    }
}

/// Tally bucket membership across a roster.
///
/// `weak` and `superWeak` both count once towards `weaknesses`.
pub fn analyze(roster: &[TeamMember], catalog: &TypeCatalog) -> TeamTally {
    let mut weak = vec![0usize; catalog.len()];
    let mut resistant = vec![0usize; catalog.len()];
    let mut immune = vec![0usize; catalog.len()];

    let bump = |counts: &mut [usize], names: &[String]| {
        for idx in names.iter().filter_map(|n| catalog.position(n)) {
            counts[idx] += 1;
        }
    };

    for member in roster {
        let result = classify(&member.types, catalog);

        bump(&mut weak, &result.weak);
        bump(&mut weak, &result.super_weak);
        bump(&mut resistant, &result.resistant);
        bump(&mut immune, &result.immune);
    }

    TeamTally {
        weaknesses: TypeCounts::ranked(catalog, &weak),
        resistances: TypeCounts::ranked(catalog, &resistant),
        immunities: TypeCounts::ranked(catalog, &immune),
    }
}

/// Assemble the roster through `lookup` and tally it; ids that cannot be
/// found are skipped
pub fn analyze_with<L>(ids: &[u32], lookup: &L, catalog: &TypeCatalog) -> TeamTally
where
    L: PokemonLookup + ?Sized,
{
    let roster: Vec<TeamMember> = ids
        .iter()
        .filter_map(|&id| match lookup.lookup_by_id(id) {
            Some(doc) => Some(TeamMember {
                id,
                types: doc.types().to_vec(),
            }),
            None => {
                tracing::warn!(id, "Roster member not found, skipping");
                None
            }
        })
        .collect();

    analyze(&roster, catalog)
}
