//! Type tables: the built-in chart and the loaded catalog

mod catalog;
mod pokemon_type;

pub use catalog::{TypeCatalog, TypeRecord};
pub use pokemon_type::{Type, TYPE_CHART};
