//! Ability field normalisation
//!
//! Exports of the catalog have stored abilities in several incompatible
//! layouts. [`AbilityShape::detect`] picks the first layout present on a
//! document, in a fixed order, and [`normalize_abilities`] turns it into a
//! flat list of [`Ability`] values. Call sites never inspect the raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::pokemon::PokemonDocument;

pub const NO_DESCRIPTION: &str = "No description available";

/// A normalised ability entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub description: String,
    pub is_hidden: bool,
}

impl Ability {
    pub fn new(name: impl Into<String>, is_hidden: bool) -> Self {
        Self {
            name: name.into(),
            description: NO_DESCRIPTION.to_string(),
            is_hidden,
        }
    }

    fn described(name: &str, description: &str, is_hidden: bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            is_hidden,
        }
    }
}

/// The layouts an ability list has been found in
#[derive(Debug, Clone, PartialEq)]
pub enum AbilityShape {
    /// `abilities: [{name, description?, is_hidden?} | "name", ...]`
    ListOfEntries(Vec<Value>),

    /// `ability: "name" | ["name", ...]`
    ListOfNames(Value),

    /// `ability: {normal: "name" | ["name", ...], hidden?: "name"}`
    NormalHiddenSplit {
        normal: Option<Value>,
        hidden: Option<Value>,
    },

    /// `profile.ability: [["name", hidden-flag] | "name", ...] | "name"`
    ProfilePairs(Value),

    /// `abilities: {key: "name", ..., hidden: "name"}`
    KeyedObject(Map<String, Value>),

    /// `base.Ability: "name" | ["name", ...]`
    LegacyBaseField(Option<Value>),

    /// `name.abilities: "name" | ["name", ...]`
    NameEmbedded(Value),
}

impl AbilityShape {
    /// Pick the first layout present on the document
    pub fn detect(doc: &PokemonDocument) -> Option<Self> {
        if let Some(Value::Array(entries)) = &doc.abilities {
            return Some(Self::ListOfEntries(entries.clone()));
        }

        if let Some(ability) = &doc.ability {
            return Some(match ability {
                Value::Object(split) => Self::NormalHiddenSplit {
                    normal: split.get("normal").cloned(),
                    hidden: split.get("hidden").cloned(),
                },
                other => Self::ListOfNames(other.clone()),
            });
        }

        if let Some(profile_ability) = doc
            .profile
            .as_ref()
            .and_then(Value::as_object)
            .and_then(|p| p.get("ability"))
        {
            return Some(Self::ProfilePairs(profile_ability.clone()));
        }

        if let Some(Value::Object(keyed)) = &doc.abilities {
            return Some(Self::KeyedObject(keyed.clone()));
        }

        if let Some(Value::Object(base)) = &doc.base {
            return Some(Self::LegacyBaseField(base.get("Ability").cloned()));
        }

        doc.name
            .abilities
            .as_ref()
            .map(|embedded| Self::NameEmbedded(embedded.clone()))
    }

    /// Flatten this layout into ability entries
    pub fn into_abilities(self) -> Vec<Ability> {
        match self {
            Self::ListOfEntries(entries) => entries.iter().filter_map(entry_ability).collect(),
            Self::ListOfNames(value) | Self::NameEmbedded(value) => plain(&value, false),
            Self::NormalHiddenSplit { normal, hidden } => {
                let mut abilities = normal.map(|n| plain(&n, false)).unwrap_or_default();
                abilities.extend(hidden.map(|h| plain(&h, true)).unwrap_or_default());
                abilities
            }
            Self::ProfilePairs(Value::Array(items)) => {
                items.iter().filter_map(profile_ability).collect()
            }
            Self::ProfilePairs(single) => plain(&single, false),
            Self::KeyedObject(keyed) => {
                let mut abilities: Vec<Ability> = keyed
                    .iter()
                    .filter(|(key, _)| key.as_str() != "hidden")
                    .flat_map(|(_, value)| plain(value, false))
                    .collect();
                if let Some(hidden) = keyed.get("hidden") {
                    abilities.extend(plain(hidden, true));
                }
                abilities
            }
            Self::LegacyBaseField(field) => field.map(|f| plain(&f, false)).unwrap_or_default(),
        }
    }
}

/// Names from a string or a list of strings; empty strings are skipped
fn names(value: &Value) -> Vec<&str> {
    match value {
        Value::String(s) if !s.is_empty() => vec![s.as_str()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn plain(value: &Value, is_hidden: bool) -> Vec<Ability> {
    names(value)
        .into_iter()
        .map(|name| Ability::new(name, is_hidden))
        .collect()
}

fn hidden_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true" || s == "True",
        Value::Number(n) => n.as_u64() == Some(1),
        _ => false,
    }
}

fn entry_ability(entry: &Value) -> Option<Ability> {
    match entry {
        Value::String(name) => Some(Ability::new(name.as_str(), false)),
        Value::Object(fields) => {
            let name = fields.get("name")?.as_str()?;
            let description = fields
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or(NO_DESCRIPTION);
            let is_hidden = fields.get("is_hidden").is_some_and(hidden_flag);
            Some(Ability::described(name, description, is_hidden))
        }
        _ => None,
    }
}

fn profile_ability(item: &Value) -> Option<Ability> {
    match item {
        Value::Array(pair) if pair.len() == 2 => {
            let name = pair[0].as_str()?;
            Some(Ability::new(name, hidden_flag(&pair[1])))
        }
        Value::String(name) => Some(Ability::new(name.as_str(), false)),
        _ => None,
    }
}

/// Abilities of a few well-known species, used when a document carries none
fn well_known(id: u32) -> Vec<Ability> {
    let entries: &[(&str, &str, bool)] = match id {
        1 => &[
            ("Overgrow", "Powers up Grass-type moves when the Pokémon is in trouble.", false),
            ("Chlorophyll", "Boosts the Pokémon's Speed in sunshine.", true),
        ],
        4 => &[
            ("Blaze", "Powers up Fire-type moves when the Pokémon is in trouble.", false),
            ("Solar Power", "Boosts Special Attack, but lowers HP in sunshine.", true),
        ],
        7 => &[
            ("Torrent", "Powers up Water-type moves when the Pokémon is in trouble.", false),
            ("Rain Dish", "The Pokémon gradually regains HP in rain.", true),
        ],
        25 => &[
            ("Static", "The Pokémon may paralyze contacting attackers.", false),
            ("Lightning Rod", "The Pokémon draws Electric moves to boost Sp. Attack.", true),
        ],
        132 => &[
            ("Imposter", "The Pokémon transforms when it enters battle.", false),
            ("Limber", "Makes the Pokémon immune to paralysis.", true),
        ],
        143 => &[
            ("Immunity", "Prevents the Pokémon from getting poisoned.", false),
            ("Thick Fat", "Raises resistance to Fire and Ice moves.", false),
            ("Gluttony", "Makes the Pokémon eat held Berries early.", true),
        ],
        150 => &[
            ("Pressure", "Forces foes to use more PP.", false),
            ("Unnerve", "Prevents foes from eating Berries.", true),
        ],
        _ => &[],
    };

    entries
        .iter()
        .map(|(name, description, hidden)| Ability::described(name, description, *hidden))
        .collect()
}

/// Normalise the abilities of a species document.
///
/// Falls back to a built-in table for a handful of well-known species when
/// no layout yields anything.
pub fn normalize_abilities(doc: &PokemonDocument) -> Vec<Ability> {
    let abilities = AbilityShape::detect(doc)
        .map(AbilityShape::into_abilities)
        .unwrap_or_default();

    if abilities.is_empty() {
        tracing::debug!(id = doc.id, "No ability layout matched, using built-in table");
        return well_known(doc.id);
    }

    abilities
}

/// Replace descriptions with the ones found by `describe`, leaving the rest
pub fn apply_descriptions<F>(abilities: &mut [Ability], describe: F)
where
    F: Fn(&str) -> Option<String>,
{
    for ability in abilities.iter_mut() {
        if let Some(description) = describe(&ability.name) {
            ability.description = description;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> PokemonDocument {
        PokemonDocument::new(999, "Testmon", &["Normal"])
    }

    #[test]
    fn test_list_of_entries() {
        let mut doc = doc();
        doc.abilities = Some(json!([
            {"name": "Levitate", "description": "Floats.", "is_hidden": false},
            "Cursed Body",
            {"description": "nameless"}
        ]));

        let abilities = normalize_abilities(&doc);
        assert_eq!(
            abilities,
            vec![
                Ability::described("Levitate", "Floats.", false),
                Ability::new("Cursed Body", false),
            ]
        );
    }

    #[test]
    fn test_normal_hidden_split() {
        let mut doc = doc();
        doc.ability = Some(json!({"normal": ["Keen Eye", "Tangled Feet"], "hidden": "Big Pecks"}));

        let abilities = normalize_abilities(&doc);
        assert_eq!(abilities.len(), 3);
        assert!(!abilities[0].is_hidden);
        assert_eq!(abilities[2], Ability::new("Big Pecks", true));
    }

    #[test]
    fn test_normal_single_string() {
        let mut doc = doc();
        doc.ability = Some(json!({"normal": "Static"}));

        assert_eq!(normalize_abilities(&doc), vec![Ability::new("Static", false)]);
    }

    #[test]
    fn test_profile_pairs() {
        let mut doc = doc();
        doc.profile = Some(json!({
            "height": "0.7 m",
            "ability": [["Overgrow", "false"], ["Chlorophyll", "true"], "Leaf Guard"]
        }));

        let abilities = normalize_abilities(&doc);
        assert_eq!(
            abilities,
            vec![
                Ability::new("Overgrow", false),
                Ability::new("Chlorophyll", true),
                Ability::new("Leaf Guard", false),
            ]
        );
    }

    #[test]
    fn test_keyed_object_keeps_order_and_hidden_last() {
        let mut doc = doc();
        doc.abilities = Some(json!({"hidden": "Moody", "first": "Run Away", "second": ""}));

        let abilities = normalize_abilities(&doc);
        assert_eq!(
            abilities,
            vec![Ability::new("Run Away", false), Ability::new("Moody", true)]
        );
    }

    #[test]
    fn test_legacy_base_field() {
        let mut doc = doc();
        doc.base = Some(json!({"HP": 45, "Ability": ["Shed Skin"]}));

        assert_eq!(normalize_abilities(&doc), vec![Ability::new("Shed Skin", false)]);
    }

    #[test]
    fn test_name_embedded() {
        let mut doc = doc();
        doc.name.abilities = Some(json!("Sturdy"));

        assert_eq!(AbilityShape::detect(&doc), Some(AbilityShape::NameEmbedded(json!("Sturdy"))));
        assert_eq!(normalize_abilities(&doc), vec![Ability::new("Sturdy", false)]);
    }

    #[test]
    fn test_list_wins_over_later_layouts() {
        let mut doc = doc();
        doc.abilities = Some(json!(["Intimidate"]));
        doc.profile = Some(json!({"ability": [["Moxie", "true"]]}));

        assert_eq!(normalize_abilities(&doc), vec![Ability::new("Intimidate", false)]);
    }

    #[test]
    fn test_well_known_fallback() {
        let mut doc = PokemonDocument::new(25, "Pikachu", &["Electric"]);
        doc.base = Some(json!({"HP": 35}));

        let abilities = normalize_abilities(&doc);
        assert_eq!(abilities.len(), 2);
        assert_eq!(abilities[0].name, "Static");
        assert!(abilities[1].is_hidden);
    }

    #[test]
    fn test_nothing_found() {
        assert!(normalize_abilities(&doc()).is_empty());
    }

    #[test]
    fn test_apply_descriptions() {
        let mut abilities = vec![Ability::new("Static", false), Ability::new("Unknown", false)];
        apply_descriptions(&mut abilities, |name| {
            (name == "Static").then(|| "May paralyze on contact.".to_string())
        });

        assert_eq!(abilities[0].description, "May paralyze on contact.");
        assert_eq!(abilities[1].description, NO_DESCRIPTION);
    }
}
