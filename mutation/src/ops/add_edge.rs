//! Add edge - inserts a relationship after validation and uniqueness checks.

use onto_core::Edge;
use onto_store::EntityStore;

use crate::error::{EditError, EditResult};
use crate::result::MutationOutcome;
use crate::validation::validate_new_edge;

/// Insert a relationship. On success the caller's edge carries the
/// store-assigned id.
///
/// Checks run in order: input validation, endpoint existence, then
/// uniqueness of (source, target, relation type) within the ontology.
pub fn execute_add_edge<S: EntityStore + ?Sized>(
    store: &mut S,
    edge: &mut Edge,
) -> EditResult<MutationOutcome> {
    validate_new_edge(edge)?;

    for endpoint in [edge.source, edge.target] {
        if store.get_node(endpoint)?.is_none() {
            return Err(EditError::node_not_found(endpoint));
        }
    }

    if store.edge_exists(edge.graph_id, edge.source, edge.target, &edge.relation_type)? {
        return Err(EditError::duplicate(edge));
    }

    edge.id = store.create_edge(edge)?;
    Ok(MutationOutcome::EdgeAdded(edge.clone()))
}
