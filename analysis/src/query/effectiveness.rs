//! Single- and dual-type effectiveness classification

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{TypeCatalog, TypeRecord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("A type set holds one or two distinct types, got {0:?}")]
pub struct MalformedTypeSet(pub Vec<String>);

/// One or two distinct defending type names. Order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TypeSet(Vec<String>);

impl TypeSet {
    pub fn new<I, S>(names: I) -> Result<Self, MalformedTypeSet>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::try_from(names.into_iter().map(Into::into).collect::<Vec<String>>())
    }

    pub fn single(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<String>> for TypeSet {
    type Error = MalformedTypeSet;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        match names.as_slice() {
            [_] => Ok(Self(names)),
            [a, b] if a != b => Ok(Self(names)),
            _ => Err(MalformedTypeSet(names)),
        }
    }
}

impl From<TypeSet> for Vec<String> {
    fn from(set: TypeSet) -> Self {
        set.0
    }
}

/// Classification of one attacking type against a defending type set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    Immune,
    Resistant,
    Weak,
    SuperWeak,
}

impl Bucket {
    /// Bucket for a net exponent; `None` means neutral.
    ///
    /// Both -1 and -2 land in `Resistant` while +1 and +2 are told apart.
    pub fn from_exponent(exponent: i32) -> Option<Self> {
        match exponent {
            -2..=-1 => Some(Bucket::Resistant),
            1 => Some(Bucket::Weak),
            e if e >= 2 => Some(Bucket::SuperWeak),
            _ => None,
        }
    }
}

/// Attacking types sorted into buckets; neutral types appear in none.
///
/// Every list follows catalog declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivenessResult {
    pub immune: Vec<String>,
    pub resistant: Vec<String>,
    pub weak: Vec<String>,
    pub super_weak: Vec<String>,
}

impl EffectivenessResult {
    pub fn bucket_of(&self, attacker: &str) -> Option<Bucket> {
        let has = |list: &[String]| list.iter().any(|t| t == attacker);

        if has(&self.immune) {
            Some(Bucket::Immune)
        } else if has(&self.resistant) {
            Some(Bucket::Resistant)
        } else if has(&self.weak) {
            Some(Bucket::Weak)
        } else if has(&self.super_weak) {
            Some(Bucket::SuperWeak)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.immune.is_empty()
            && self.resistant.is_empty()
            && self.weak.is_empty()
            && self.super_weak.is_empty()
    }

    fn push(&mut self, bucket: Bucket, attacker: &str) {
        let list = match bucket {
            Bucket::Immune => &mut self.immune,
            Bucket::Resistant => &mut self.resistant,
            Bucket::Weak => &mut self.weak,
            Bucket::SuperWeak => &mut self.super_weak,
        };
        list.push(attacker.to_string());
    }
}

/// Catalog records of the defending types; unknown names are skipped
fn defenders<'a>(types: &TypeSet, catalog: &'a TypeCatalog) -> Vec<&'a TypeRecord> {
    types
        .iter()
        .filter_map(|name| match catalog.lookup(name) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(error = %e, "Defending type contributes no modifier");
                None
            }
        })
        .collect()
}

fn exponent(attacker: &str, defenders: &[&TypeRecord]) -> i32 {
    defenders
        .iter()
        .map(|d| i32::from(d.is_weak_to(attacker)) - i32::from(d.resists(attacker)))
        .sum()
}

/// Net power-of-two exponent of every catalog type attacking `types`
pub fn exponents<'a>(types: &TypeSet, catalog: &'a TypeCatalog) -> Vec<(&'a str, i32)> {
    let defenders = defenders(types, catalog);

    catalog
        .names()
        .map(|attacker| (attacker, exponent(attacker, &defenders)))
        .collect()
}

/// Classify every catalog type attacking a validated type set.
///
/// Immunity dominates: an attacking type listed as `no_effect` by any
/// defending type is immune regardless of its exponent.
pub fn classify_set(types: &TypeSet, catalog: &TypeCatalog) -> EffectivenessResult {
    let defenders = defenders(types, catalog);
    let mut result = EffectivenessResult::default();

    for attacker in catalog.names() {
        if defenders.iter().any(|d| d.is_immune_to(attacker)) {
            result.push(Bucket::Immune, attacker);
            continue;
        }

        if let Some(bucket) = Bucket::from_exponent(exponent(attacker, &defenders)) {
            result.push(bucket, attacker);
        }
    }

    result
}

/// Classify raw type names; anything other than one or two distinct names
/// yields the empty result.
pub fn classify<S: AsRef<str>>(types: &[S], catalog: &TypeCatalog) -> EffectivenessResult {
    match TypeSet::new(types.iter().map(|t| t.as_ref().to_string())) {
        Ok(set) => classify_set(&set, catalog),
        Err(e) => {
            tracing::debug!(error = %e, "Skipping classification");
            EffectivenessResult::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    fn catalog() -> TypeCatalog {
        TypeCatalog::standard()
    }

    #[test]
    fn test_fire_single() {
        let result = classify(&["Fire"], &catalog());

        assert_eq!(result.weak, vec!["Water", "Ground", "Rock"]);
        assert_eq!(
            result.resistant,
            vec!["Fire", "Grass", "Ice", "Bug", "Steel", "Fairy"]
        );
        assert!(result.immune.is_empty());
        assert!(result.super_weak.is_empty());
    }

    #[test]
    fn test_super_weak() {
        // Grass/Steel (Ferrothorn) takes 4x from Fire
        let result = classify(&["Grass", "Steel"], &catalog());

        assert_eq!(result.super_weak, vec!["Fire"]);
        assert_eq!(result.weak, vec!["Fighting"]);
        assert_eq!(result.immune, vec!["Poison"]);
    }

    #[test]
    fn test_double_resist_is_resistant() {
        // Water/Rock resists Fire twice over, still a single bucket
        let result = classify(&["Water", "Rock"], &catalog());

        assert_eq!(result.bucket_of("Fire"), Some(Bucket::Resistant));
        assert_eq!(result.super_weak, vec!["Grass"]);
    }

    #[test]
    fn test_dual_cancellation() {
        // Bug hits Grass for double and is resisted by Poison
        let catalog = catalog();
        let set = TypeSet::new(["Grass", "Poison"]).unwrap();
        let exps = exponents(&set, &catalog);
        let bug = exps.iter().find(|(name, _)| *name == "Bug").unwrap();

        assert_eq!(bug.1, 0);
        assert_eq!(classify_set(&set, &catalog).bucket_of("Bug"), None);
    }

    #[test]
    fn test_immunity_dominates() {
        // Electric hits Flying for double, Flying resists Grass; both are
        // overridden by the immunities
        let result = classify(&["Ground", "Flying"], &catalog());

        assert_eq!(result.immune, vec!["Electric", "Ground"]);
        assert!(!result.weak.contains(&"Electric".to_string()));
        assert!(!result.resistant.contains(&"Ground".to_string()));
        assert_eq!(result.super_weak, vec!["Ice"]);
    }

    #[test]
    fn test_immune_excluded_from_other_buckets() {
        let catalog = catalog();
        for a in Type::ALL {
            for b in Type::ALL {
                let result = classify(&[a.as_str(), b.as_str()], &catalog);
                for name in &result.immune {
                    assert!(!result.resistant.contains(name));
                    assert!(!result.weak.contains(name));
                    assert!(!result.super_weak.contains(name));
                }
            }
        }
    }

    #[test]
    fn test_single_type_exponent_bounds() {
        let catalog = catalog();
        for t in Type::ALL {
            let set = TypeSet::single(t.as_str());
            assert!(exponents(&set, &catalog)
                .iter()
                .all(|(_, e)| (-1..=1).contains(e)));
        }
    }

    #[test]
    fn test_agrees_with_chart_multiplier() {
        let catalog = catalog();
        for a in Type::ALL {
            for b in Type::ALL {
                let defenders: Vec<Type> = if a == b { vec![a] } else { vec![a, b] };
                let names: Vec<&str> = defenders.iter().map(Type::as_str).collect();
                let result = classify(&names, &catalog);

                for attacker in Type::ALL {
                    let expected = match attacker.multiplier_against(&defenders) {
                        m if m == 0.0 => Some(Bucket::Immune),
                        m if m < 1.0 => Some(Bucket::Resistant),
                        m if m == 2.0 => Some(Bucket::Weak),
                        m if m > 2.0 => Some(Bucket::SuperWeak),
                        _ => None,
                    };
                    assert_eq!(result.bucket_of(attacker.as_str()), expected);
                }
            }
        }
    }

    #[test]
    fn test_malformed_sets_yield_empty() {
        let catalog = catalog();
        let empty: [&str; 0] = [];

        assert!(classify(&empty, &catalog).is_empty());
        assert!(classify(&["Fire", "Water", "Grass"], &catalog).is_empty());
        assert!(classify(&["Fire", "Fire"], &catalog).is_empty());
        assert!(TypeSet::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_unknown_defending_type_skipped() {
        let catalog = catalog();

        assert_eq!(
            classify(&["Fire", "Shadow"], &catalog),
            classify(&["Fire"], &catalog)
        );
        assert!(classify(&["Shadow"], &catalog).is_empty());
    }

    #[test]
    fn test_order_does_not_matter() {
        let catalog = catalog();

        assert_eq!(
            classify(&["Water", "Ground"], &catalog),
            classify(&["Ground", "Water"], &catalog)
        );
    }

    #[test]
    fn test_type_set_serde() {
        let set: TypeSet = serde_json::from_str(r#"["Bug", "Flying"]"#).unwrap();
        assert_eq!(set.len(), 2);
        assert!(serde_json::from_str::<TypeSet>(r#"["Bug", "Bug"]"#).is_err());
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = classify(&["Grass", "Steel"], &catalog());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["superWeak"], serde_json::json!(["Fire"]));
    }
}
