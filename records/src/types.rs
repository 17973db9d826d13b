//! Type documents as stored in `types.json`

use serde::{Deserialize, Serialize};

/// One elemental type and the attacking types that interact with it.
///
/// The three lists are from the defender's point of view: `effective` holds
/// the attacking types that deal double damage to this type, `ineffective`
/// the ones it resists, `no_effect` the ones it is immune to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDocument {
    #[serde(alias = "english")]
    pub name: String,

    #[serde(default)]
    pub effective: Vec<String>,

    #[serde(default)]
    pub ineffective: Vec<String>,

    #[serde(default, alias = "noEffect")]
    pub no_effect: Vec<String>,
}

impl TypeDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effective: Vec::new(),
            ineffective: Vec::new(),
            no_effect: Vec::new(),
        }
    }
}
