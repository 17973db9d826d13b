//! Evolution chain resolution
//!
//! Chains are simple paths of at most five species, so the resolver walks a
//! fixed number of hops along the predecessor and first-successor edges
//! rather than doing a general graph traversal.

use pokedex_records::{EvolutionLink, Images, PokemonDocument};
use serde::{Deserialize, Serialize};

use crate::EvolutionError;

/// Hops walked in each direction from the anchor
const MAX_HOPS: usize = 2;

/// Lookup of a species document by national-dex id
pub trait PokemonLookup {
    fn lookup_by_id(&self, id: u32) -> Option<PokemonDocument>;
}

impl<F> PokemonLookup for F
where
    F: Fn(u32) -> Option<PokemonDocument>,
{
    fn lookup_by_id(&self, id: u32) -> Option<PokemonDocument> {
        self(id)
    }
}

/// One species in a resolved chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionNode {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub image: Images,

    /// 1-based position in the chain, oldest first
    pub stage: u8,

    /// Condition on the edge that produced this node; `None` for the anchor
    pub evolution_condition: Option<String>,
}

impl EvolutionNode {
    fn from_doc(doc: &PokemonDocument, condition: Option<String>) -> Self {
        Self {
            id: doc.id,
            name: doc.display_name().to_string(),
            types: doc.types().to_vec(),
            image: doc.image.clone(),
            stage: 0,
            evolution_condition: condition,
        }
    }
}

/// Ordered chain anchored on the queried species
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EvolutionChain {
    nodes: Vec<EvolutionNode>,
    #[serde(skip)]
    anchor: usize,
}

impl EvolutionChain {
    pub fn nodes(&self) -> &[EvolutionNode] {
        &self.nodes
    }

    pub fn anchor(&self) -> &EvolutionNode {
        &self.nodes[self.anchor]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, id: u32) -> Option<&EvolutionNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn into_nodes(self) -> Vec<EvolutionNode> {
        self.nodes
    }
}

/// Follow up to `MAX_HOPS` edges picked by `edge`, stopping at the first gap
fn walk<L, E>(start: &PokemonDocument, lookup: &L, edge: E) -> Vec<EvolutionNode>
where
    L: PokemonLookup + ?Sized,
    E: Fn(&PokemonDocument) -> Option<&EvolutionLink>,
{
    let mut nodes = Vec::with_capacity(MAX_HOPS);
    let mut cursor = edge(start).cloned();

    while nodes.len() < MAX_HOPS {
        let Some(link) = cursor.take() else { break };
        let Some(doc) = lookup.lookup_by_id(link.id) else {
            tracing::debug!(from = start.id, missing = link.id, "Evolution hop missing, truncating chain");
            break;
        };

        cursor = edge(&doc).cloned();
        nodes.push(EvolutionNode::from_doc(&doc, link.condition));
    }

    nodes
}

/// Resolve the chain around `anchor_id`.
///
/// Walks at most two predecessor hops and two first-successor hops. Missing
/// intermediate records truncate the walk; only a missing anchor fails.
pub fn resolve<L>(anchor_id: u32, lookup: &L) -> Result<EvolutionChain, EvolutionError>
where
    L: PokemonLookup + ?Sized,
{
    let anchor = lookup
        .lookup_by_id(anchor_id)
        .ok_or(EvolutionError::NotFound(anchor_id))?;

    let mut nodes = walk(&anchor, lookup, PokemonDocument::prev);
    nodes.reverse();

    let anchor_idx = nodes.len();
    nodes.push(EvolutionNode::from_doc(&anchor, None));
    nodes.extend(walk(&anchor, lookup, |doc| doc.next().first()));

    for (idx, node) in nodes.iter_mut().enumerate() {
        node.stage = idx as u8 + 1;
    }

    Ok(EvolutionChain {
        nodes,
        anchor: anchor_idx,
    })
}

/// Every direct successor of `anchor_id`, for branching families.
///
/// Stages continue from the anchor's stage in its resolved chain.
pub fn branches<L>(anchor_id: u32, lookup: &L) -> Result<Vec<EvolutionNode>, EvolutionError>
where
    L: PokemonLookup + ?Sized,
{
    let anchor = lookup
        .lookup_by_id(anchor_id)
        .ok_or(EvolutionError::NotFound(anchor_id))?;
    let stage = resolve(anchor_id, lookup)?.anchor().stage + 1;

    Ok(anchor
        .next()
        .iter()
        .filter_map(|link| {
            let doc = lookup.lookup_by_id(link.id)?;
            let mut node = EvolutionNode::from_doc(&doc, link.condition.clone());
            node.stage = stage;
            Some(node)
        })
        .collect())
}
