//! Indexes for efficient store lookups.

use onto_core::{EdgeId, GraphId, NodeId};
use std::collections::{BTreeSet, HashMap};

/// Type index: (GraphId, node type) -> Set<NodeId>
#[derive(Debug, Default)]
pub struct TypeIndex {
    index: HashMap<(GraphId, String), BTreeSet<NodeId>>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, graph_id: GraphId, node_type: &str, node_id: NodeId) {
        self.index
            .entry((graph_id, node_type.to_string()))
            .or_default()
            .insert(node_id);
    }

    pub fn remove(&mut self, graph_id: GraphId, node_type: &str, node_id: NodeId) {
        let key = (graph_id, node_type.to_string());
        if let Some(set) = self.index.get_mut(&key) {
            set.remove(&node_id);
            if set.is_empty() {
                self.index.remove(&key);
            }
        }
    }

    pub fn get(&self, graph_id: GraphId, node_type: &str) -> impl Iterator<Item = NodeId> + '_ {
        self.index
            .get(&(graph_id, node_type.to_string()))
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}

/// Adjacency index: NodeId -> { outbound, inbound } edge sets.
///
/// Sets are ordered by edge id so incident-edge listings come back in
/// insertion order.
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    /// Edges where the node is the source.
    outbound: HashMap<NodeId, BTreeSet<EdgeId>>,
    /// Edges where the node is the target.
    inbound: HashMap<NodeId, BTreeSet<EdgeId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge_id: EdgeId, source: NodeId, target: NodeId) {
        self.outbound.entry(source).or_default().insert(edge_id);
        self.inbound.entry(target).or_default().insert(edge_id);
    }

    pub fn remove(&mut self, edge_id: EdgeId, source: NodeId, target: NodeId) {
        remove_from(&mut self.outbound, source, edge_id);
        remove_from(&mut self.inbound, target, edge_id);
    }

    /// Get edges leaving a node.
    pub fn edges_from(&self, node_id: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.outbound
            .get(&node_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get edges entering a node.
    pub fn edges_to(&self, node_id: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.inbound
            .get(&node_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get all edges involving a node, ordered by edge id.
    pub fn edges_involving(&self, node_id: NodeId) -> BTreeSet<EdgeId> {
        self.edges_from(node_id).chain(self.edges_to(node_id)).collect()
    }
}

fn remove_from(index: &mut HashMap<NodeId, BTreeSet<EdgeId>>, node_id: NodeId, edge_id: EdgeId) {
    if let Some(set) = index.get_mut(&node_id) {
        set.remove(&edge_id);
        if set.is_empty() {
            index.remove(&node_id);
        }
    }
}
