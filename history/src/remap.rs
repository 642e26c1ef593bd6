//! Identity remapping.
//!
//! Pure functions: they never look at the store, only at the snapshots they
//! are given.

use onto_core::{Edge, NodeId};

/// Substitute `old` with `new` in a single node reference.
pub fn remap_node(id: NodeId, old: NodeId, new: NodeId) -> NodeId {
    if id == old {
        new
    } else {
        id
    }
}

/// Re-point every edge endpoint equal to `old` at `new`. Everything else in
/// the edges, including their own ids and order, is left as is.
pub fn remap_edges(old: NodeId, new: NodeId, edges: &[Edge]) -> Vec<Edge> {
    edges
        .iter()
        .map(|edge| {
            let mut edge = edge.clone();
            edge.source = remap_node(edge.source, old, new);
            edge.target = remap_node(edge.target, old, new);
            edge
        })
        .collect()
}
