//! Delete edge - removes a single relationship.

use onto_core::EdgeId;
use onto_store::EntityStore;

use crate::error::{EditError, EditResult};
use crate::result::MutationOutcome;

/// Delete a relationship, returning its last snapshot.
pub fn execute_delete_edge<S: EntityStore + ?Sized>(
    store: &mut S,
    id: EdgeId,
) -> EditResult<MutationOutcome> {
    let edge = match store.get_edge(id)? {
        Some(edge) if id.is_valid() => edge,
        _ => return Err(EditError::edge_not_found(id)),
    };

    store.delete_edge(id)?;
    Ok(MutationOutcome::EdgeDeleted(edge))
}
