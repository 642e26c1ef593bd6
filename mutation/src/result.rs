//! Mutation result types.

use onto_core::{Edge, EdgeId, Node, NodeId};

/// Outcome of a mutation operation.
///
/// Every variant carries full snapshots: they are what the command log
/// needs to reverse or replay the change later.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// Inserted a node; the snapshot carries the store-assigned id.
    NodeAdded(Node),
    /// Deleted a node and its incident relationships.
    NodeDeleted(DeletedNode),
    /// Overwrote a node.
    NodeUpdated { old: Node, new: Node },
    /// Inserted a relationship.
    EdgeAdded(Edge),
    /// Deleted a relationship.
    EdgeDeleted(Edge),
    /// Overwrote a relationship's type, weight or properties.
    EdgeUpdated { old: Edge, new: Edge },
}

impl MutationOutcome {
    /// Get created node ID if this is a NodeAdded result.
    pub fn created_node(&self) -> Option<NodeId> {
        match self {
            MutationOutcome::NodeAdded(node) => Some(node.id),
            _ => None,
        }
    }

    /// Get created edge ID if this is an EdgeAdded result.
    pub fn created_edge(&self) -> Option<EdgeId> {
        match self {
            MutationOutcome::EdgeAdded(edge) => Some(edge.id),
            _ => None,
        }
    }

    /// Get deleted edge count, including cascaded ones.
    pub fn deleted_edges(&self) -> usize {
        match self {
            MutationOutcome::NodeDeleted(d) => d.edges.len(),
            MutationOutcome::EdgeDeleted(_) => 1,
            _ => 0,
        }
    }
}

/// A deleted node together with every relationship removed with it, as
/// they were just before deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedNode {
    pub node: Node,
    pub edges: Vec<Edge>,
}
