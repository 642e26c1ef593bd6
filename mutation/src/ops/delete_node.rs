//! Delete node - removes a node after its incident relationships.

use onto_core::{Edge, EdgeId, NodeId};
use onto_store::{EntityStore, StoreError};
use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};
use crate::result::{DeletedNode, MutationOutcome};

/// What a cascading delete does with the relationships it already removed
/// when a later step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadePolicy {
    /// Leave them deleted. The graph keeps no dangling edges, since only a
    /// prefix of the incident relationships is gone, but it is not the
    /// graph the caller started with.
    #[default]
    LeavePartial,
    /// Re-insert them before reporting. Restored relationships receive new
    /// ids from the store.
    Compensate,
}

/// Execute a cascading node delete.
///
/// Incident relationships (either direction, same ontology) are deleted one
/// by one, then the node itself. The delete is not transactional: see
/// [`CascadePolicy`] for what happens to the removed prefix when a step fails.
pub fn execute_delete_node<S: EntityStore + ?Sized>(
    store: &mut S,
    id: NodeId,
    policy: CascadePolicy,
) -> EditResult<MutationOutcome> {
    let node = match store.get_node(id)? {
        Some(node) if id.is_valid() => node,
        _ => return Err(EditError::node_not_found(id)),
    };

    let edges: Vec<Edge> = store
        .edges_of_node(id)?
        .into_iter()
        .filter(|e| e.graph_id == node.graph_id)
        .collect();

    let mut deleted: Vec<&Edge> = Vec::with_capacity(edges.len());
    for edge in &edges {
        if let Err(e) = store.delete_edge(edge.id) {
            return Err(abort(store, id, &deleted, edges.len(), policy, e));
        }
        deleted.push(edge);
    }

    if let Err(e) = store.delete_node(id) {
        if deleted.is_empty() {
            return Err(e.into());
        }
        return Err(abort(store, id, &deleted, edges.len(), policy, e));
    }

    Ok(MutationOutcome::NodeDeleted(DeletedNode { node, edges }))
}

/// Build the error for an aborted cascade, restoring the removed prefix
/// first if the policy asks for it.
fn abort<S: EntityStore + ?Sized>(
    store: &mut S,
    node: NodeId,
    deleted: &[&Edge],
    total: usize,
    policy: CascadePolicy,
    source: StoreError,
) -> EditError {
    let restored = match policy {
        CascadePolicy::LeavePartial => Vec::new(),
        CascadePolicy::Compensate => compensate(store, deleted),
    };

    tracing::warn!(
        %node,
        deleted = deleted.len(),
        total,
        restored = restored.len(),
        error = %source,
        "cascading delete aborted"
    );

    EditError::CascadeAborted {
        node,
        deleted: deleted.len(),
        total,
        restored,
        source,
    }
}

/// Re-insert removed relationships, returning the old and new identity of
/// each one that made it back.
fn compensate<S: EntityStore + ?Sized>(store: &mut S, deleted: &[&Edge]) -> Vec<(EdgeId, EdgeId)> {
    let mut restored = Vec::with_capacity(deleted.len());
    for edge in deleted {
        match store.create_edge(edge) {
            Ok(new_id) => {
                tracing::debug!(old = %edge.id, new = %new_id, "restored relationship");
                restored.push((edge.id, new_id));
            }
            Err(e) => {
                tracing::warn!(edge = %edge.id, error = %e, "could not restore relationship");
            }
        }
    }
    restored
}
