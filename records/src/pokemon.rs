//! Species documents as stored in `pokedex.json`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::RecordError;

/// Localised species names
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonName {
    pub english: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub japanese: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chinese: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub french: Option<String>,

    /// Some exports tucked the ability list in here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Value>,
}

impl PokemonName {
    pub fn english(name: impl Into<String>) -> Self {
        Self {
            english: name.into(),
            ..Self::default()
        }
    }
}

/// Image references at the three sizes the catalog ships
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Images {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hires: Option<String>,
}

/// One directed evolution edge: `[id, condition?]` on the wire.
///
/// Ids show up both as integers and as numeric strings depending on the
/// export, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub struct EvolutionLink {
    pub id: u32,
    pub condition: Option<String>,
}

impl EvolutionLink {
    pub fn new(id: u32, condition: Option<&str>) -> Self {
        Self {
            id,
            condition: condition.map(str::to_string),
        }
    }
}

fn parse_id(value: &Value) -> Result<u32, RecordError> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| RecordError::InvalidId(n.to_string())),
        Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| RecordError::InvalidId(s.clone())),
        other => Err(RecordError::InvalidId(other.to_string())),
    }
}

impl TryFrom<Vec<Value>> for EvolutionLink {
    type Error = RecordError;

    fn try_from(parts: Vec<Value>) -> Result<Self, Self::Error> {
        let mut parts = parts.into_iter();
        let id = parse_id(&parts.next().ok_or(RecordError::EmptyLink)?)?;

        let condition = match parts.next() {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };

        Ok(Self { id, condition })
    }
}

impl From<EvolutionLink> for Vec<Value> {
    fn from(link: EvolutionLink) -> Self {
        let mut parts = vec![Value::String(link.id.to_string())];
        if let Some(condition) = link.condition {
            parts.push(Value::String(condition));
        }
        parts
    }
}

/// Predecessor and successor edges of a species
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvolutionLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<EvolutionLink>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next: Vec<EvolutionLink>,
}

/// A species document.
///
/// The ability-bearing fields are kept as raw JSON because their layout
/// varies between exports; see [`crate::abilities`] for how they are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonDocument {
    pub id: u32,

    pub name: PokemonName,

    #[serde(rename = "type", default)]
    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolution: Option<EvolutionLinks>,

    #[serde(default)]
    pub image: Images,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<Value>,

    // === Derived at import ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<u8>,

    #[serde(default)]
    pub is_legendary: bool,

    #[serde(default)]
    pub is_mythical: bool,
}

impl PokemonDocument {
    /// Create a bare document with only id, English name and types
    pub fn new(id: u32, name: impl Into<String>, types: &[&str]) -> Self {
        Self {
            id,
            name: PokemonName::english(name),
            types: types.iter().map(|t| t.to_string()).collect(),
            evolution: None,
            image: Images::default(),
            abilities: None,
            ability: None,
            profile: None,
            base: None,
            generation: None,
            is_legendary: false,
            is_mythical: false,
        }
    }

    /// English display name
    pub fn display_name(&self) -> &str {
        &self.name.english
    }

    /// Elemental types in declaration order
    pub fn types(&self) -> &[String] {
        &self.types
    }

    /// The predecessor edge, if any
    pub fn prev(&self) -> Option<&EvolutionLink> {
        self.evolution.as_ref().and_then(|e| e.prev.as_ref())
    }

    /// All successor edges (branching families have more than one)
    pub fn next(&self) -> &[EvolutionLink] {
        self.evolution
            .as_ref()
            .map(|e| e.next.as_slice())
            .unwrap_or(&[])
    }

    /// Builder-style setter for the evolution edges
    pub fn with_evolution(mut self, prev: Option<EvolutionLink>, next: Vec<EvolutionLink>) -> Self {
        self.evolution = Some(EvolutionLinks { prev, next });
        self
    }

    /// Sum of the integer entries of `base`; `None` without a `base` object
    pub fn base_stat_total(&self) -> Option<u64> {
        let base = self.base.as_ref()?.as_object()?;
        Some(base.values().filter_map(Value::as_u64).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ivysaur() -> Value {
        json!({
            "id": 2,
            "name": {"english": "Ivysaur", "japanese": "Fushigisou", "french": "Herbizarre"},
            "type": ["Grass", "Poison"],
            "evolution": {"prev": ["1", "Level 16"], "next": [["3", "Level 32"]]},
            "profile": {"ability": [["Overgrow", "false"], ["Chlorophyll", "true"]]},
            "image": {
                "sprite": "sprites/002.png",
                "thumbnail": "thumbnails/002.png",
                "hires": "hires/002.png"
            }
        })
    }

    #[test]
    fn test_decode_species() {
        let doc: PokemonDocument = serde_json::from_value(ivysaur()).unwrap();

        assert_eq!(doc.id, 2);
        assert_eq!(doc.display_name(), "Ivysaur");
        assert_eq!(doc.types(), ["Grass", "Poison"]);
        assert_eq!(doc.prev(), Some(&EvolutionLink::new(1, Some("Level 16"))));
        assert_eq!(doc.next(), [EvolutionLink::new(3, Some("Level 32"))]);
        assert_eq!(doc.image.sprite.as_deref(), Some("sprites/002.png"));
        assert_eq!(doc.generation, None);
    }

    #[test]
    fn test_link_accepts_integer_id_without_condition() {
        let link: EvolutionLink = serde_json::from_value(json!([25])).unwrap();

        assert_eq!(link, EvolutionLink::new(25, None));
    }

    #[test]
    fn test_link_non_string_condition() {
        let link: EvolutionLink = serde_json::from_value(json!([26, 36])).unwrap();

        assert_eq!(link.condition.as_deref(), Some("36"));
    }

    #[test]
    fn test_link_rejects_bad_id() {
        assert!(serde_json::from_value::<EvolutionLink>(json!(["pikachu"])).is_err());
        assert!(serde_json::from_value::<EvolutionLink>(json!([-1])).is_err());
        assert!(serde_json::from_value::<EvolutionLink>(json!([])).is_err());
    }

    #[test]
    fn test_base_stat_total() {
        let mut doc = PokemonDocument::new(1, "Bulbasaur", &["Grass", "Poison"]);
        assert_eq!(doc.base_stat_total(), None);

        doc.base = Some(json!({
            "HP": 45, "Attack": 49, "Defense": 49,
            "Sp. Attack": 65, "Sp. Defense": 65, "Speed": 45,
            "Ability": "Overgrow"
        }));
        assert_eq!(doc.base_stat_total(), Some(318));
    }

    #[test]
    fn test_no_evolution() {
        let doc = PokemonDocument::new(128, "Tauros", &["Normal"]);

        assert!(doc.prev().is_none());
        assert!(doc.next().is_empty());
    }
}
