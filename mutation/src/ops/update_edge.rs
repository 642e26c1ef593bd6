//! Update edge - rewrites relation type, weight and properties.

use onto_core::Edge;
use onto_store::EntityStore;

use crate::error::{EditError, EditResult};
use crate::result::MutationOutcome;
use crate::validation::validate_edge_update;

/// Overwrite `old` with `new`. Endpoints cannot change; a new relation type
/// must not collide with another relationship between the same endpoints.
pub fn execute_update_edge<S: EntityStore + ?Sized>(
    store: &mut S,
    old: &Edge,
    new: &Edge,
) -> EditResult<MutationOutcome> {
    validate_edge_update(old, new)?;

    let stored = store
        .get_edge(new.id)?
        .ok_or_else(|| EditError::edge_not_found(new.id))?;

    if stored.relation_type != new.relation_type
        && store.edge_exists(stored.graph_id, stored.source, stored.target, &new.relation_type)?
    {
        return Err(EditError::duplicate(new));
    }

    store.update_edge(new)?;
    Ok(MutationOutcome::EdgeUpdated {
        old: old.clone(),
        new: new.clone(),
    })
}
