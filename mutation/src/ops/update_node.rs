//! Update node - overwrites a stored node.

use onto_core::Node;
use onto_store::EntityStore;

use crate::error::{EditError, EditResult};
use crate::result::MutationOutcome;
use crate::validation::validate_node_update;

/// Overwrite `old` with `new`. Both snapshots must name the same node.
pub fn execute_update_node<S: EntityStore + ?Sized>(
    store: &mut S,
    old: &Node,
    new: &Node,
) -> EditResult<MutationOutcome> {
    validate_node_update(old, new)?;

    if store.get_node(new.id)?.is_none() {
        return Err(EditError::node_not_found(new.id));
    }

    store.update_node(new)?;
    Ok(MutationOutcome::NodeUpdated {
        old: old.clone(),
        new: new.clone(),
    })
}
