//! The dependency graph built from a scanned record set.
//!
//! Pure transformation, no I/O: records plus the bundled-id set go in, an
//! ordered node list and edge list come out. The orderings are part of the
//! contract because the DOT output must be byte-identical across runs:
//!
//! - nodes: installed mods in record order, then every other referenced id
//!   in first-reference order;
//! - edges: record order outer, declaration order inner;
//! - duplicate `(from, to)` declarations collapse into the first occurrence,
//!   keeping the strongest requirement level.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::record::{ModSet, RequirementLevel};

/// How a node's id relates to the scanned folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// A scanned archive declares this id.
    Installed,
    /// No archive of its own, but an installed archive ships it.
    Bundled,
    /// Referenced by a dependency declaration and nowhere to be found.
    Missing,
}

impl Presence {
    pub fn is_installed(self) -> bool {
        self == Presence::Installed
    }

    pub fn is_missing(self) -> bool {
        self == Presence::Missing
    }
}

/// One node per referenced mod id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModNode {
    pub id: String,
    /// Display name for installed mods, the bare id otherwise.
    pub label: String,
    pub presence: Presence,
    /// Strongest requirement level any referrer declares on this node,
    /// `None` when nothing depends on it.
    pub required_by: Option<RequirementLevel>,
}

/// One edge per `(from, to)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepEdge {
    pub from: String,
    pub to: String,
    pub level: RequirementLevel,
}

/// Node and edge lists in emission order, with an id lookup on the side.
#[derive(Debug, Default)]
pub struct ModGraph {
    nodes: Vec<ModNode>,
    edges: Vec<DepEdge>,
    index: HashMap<String, usize>,
}

impl ModGraph {
    pub fn nodes(&self) -> &[ModNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DepEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&ModNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push_node(&mut self, node: ModNode) -> usize {
        let idx = self.nodes.len();
        self.index.insert(node.id.clone(), idx);
        self.nodes.push(node);
        idx
    }

    fn ensure_node(&mut self, id: &str, bundled: &BTreeSet<String>) -> usize {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let presence = if bundled.contains(id) {
            Presence::Bundled
        } else {
            Presence::Missing
        };
        self.push_node(ModNode {
            id: id.to_string(),
            label: id.to_string(),
            presence,
            required_by: None,
        })
    }

    fn mark_required_by(&mut self, idx: usize, level: RequirementLevel) {
        let node = &mut self.nodes[idx];
        node.required_by = Some(match node.required_by {
            Some(existing) => existing.strongest(level),
            None => level,
        });
    }
}

/// Build the graph for a record set.
///
/// `bundled` decides whether a non-installed id becomes a [`Presence::Bundled`]
/// or a [`Presence::Missing`] node.
pub fn build_mod_graph(set: &ModSet, bundled: &BTreeSet<String>) -> ModGraph {
    let mut graph = ModGraph::default();

    for record in set.iter() {
        graph.push_node(ModNode {
            id: record.id.clone(),
            label: record.name.clone(),
            presence: Presence::Installed,
            required_by: None,
        });
    }

    // Installed nodes were pushed in record order, so the enumeration index
    // doubles as the node index of the edge source.
    let mut edge_slots: HashMap<(usize, usize), usize> = HashMap::new();
    for (from_idx, record) in set.iter().enumerate() {
        for dep in &record.depends {
            let to_idx = graph.ensure_node(&dep.id, bundled);
            graph.mark_required_by(to_idx, dep.level);
            match edge_slots.entry((from_idx, to_idx)) {
                Entry::Occupied(slot) => {
                    let edge = &mut graph.edges[*slot.get()];
                    edge.level = edge.level.strongest(dep.level);
                }
                Entry::Vacant(slot) => {
                    slot.insert(graph.edges.len());
                    graph.edges.push(DepEdge {
                        from: record.id.clone(),
                        to: dep.id.clone(),
                        level: dep.level,
                    });
                }
            }
        }
    }

    debug!(
        "built graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}
