//! Add node - inserts a validated node.

use onto_core::Node;
use onto_store::EntityStore;

use crate::error::EditResult;
use crate::result::MutationOutcome;
use crate::validation::validate_new_node;

/// Insert a node. On success the caller's node carries the store-assigned id.
pub fn execute_add_node<S: EntityStore + ?Sized>(
    store: &mut S,
    node: &mut Node,
) -> EditResult<MutationOutcome> {
    validate_new_node(node)?;

    node.id = store.create_node(node)?;
    Ok(MutationOutcome::NodeAdded(node.clone()))
}
