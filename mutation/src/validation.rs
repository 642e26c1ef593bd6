//! Input validation helpers for mutation operations.
//!
//! All checks here are pure: they look only at the snapshots handed in and
//! never touch the store.

use onto_core::messages::*;
use onto_core::{Edge, Node};

use crate::error::{EditError, EditResult};

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Validate a node about to be inserted.
pub fn validate_new_node(node: &Node) -> EditResult<()> {
    if !node.graph_id.is_valid() {
        return Err(EditError::validation("graph_id", ERR_GRAPH_ID_REQUIRED));
    }
    validate_node_fields(node)
}

/// Validate an old/new node pair for an in-place update.
pub fn validate_node_update(old: &Node, new: &Node) -> EditResult<()> {
    if old.id != new.id {
        return Err(EditError::validation("id", ERR_NODE_ID_MISMATCH));
    }
    if !old.id.is_valid() || !new.id.is_valid() {
        return Err(EditError::validation("id", ERR_NODE_ID_REQUIRED));
    }
    if old.graph_id != new.graph_id {
        return Err(EditError::validation("graph_id", ERR_GRAPH_IMMUTABLE));
    }
    validate_node_fields(new)
}

fn validate_node_fields(node: &Node) -> EditResult<()> {
    if is_blank(&node.name) {
        return Err(EditError::validation("name", ERR_NODE_NAME_REQUIRED));
    }
    if is_blank(&node.node_type) {
        return Err(EditError::validation("node_type", ERR_NODE_TYPE_REQUIRED));
    }
    Ok(())
}

/// Validate a relationship about to be inserted.
pub fn validate_new_edge(edge: &Edge) -> EditResult<()> {
    if !edge.graph_id.is_valid() {
        return Err(EditError::validation("graph_id", ERR_GRAPH_ID_REQUIRED));
    }
    if !edge.source.is_valid() || !edge.target.is_valid() {
        return Err(EditError::validation("endpoints", ERR_ENDPOINT_REQUIRED));
    }
    if edge.source == edge.target {
        return Err(EditError::validation("endpoints", ERR_SELF_LOOP));
    }
    if is_blank(&edge.relation_type) {
        return Err(EditError::validation(
            "relation_type",
            ERR_RELATION_TYPE_REQUIRED,
        ));
    }
    Ok(())
}

/// Validate an old/new relationship pair for an in-place update. Only the
/// relation type, weight and properties may change.
pub fn validate_edge_update(old: &Edge, new: &Edge) -> EditResult<()> {
    if old.id != new.id {
        return Err(EditError::validation("id", ERR_EDGE_ID_MISMATCH));
    }
    if !old.id.is_valid() || !new.id.is_valid() {
        return Err(EditError::validation("id", ERR_EDGE_ID_REQUIRED));
    }
    if old.graph_id != new.graph_id {
        return Err(EditError::validation("graph_id", ERR_GRAPH_IMMUTABLE));
    }
    if old.source != new.source || old.target != new.target {
        return Err(EditError::validation("endpoints", ERR_ENDPOINTS_IMMUTABLE));
    }
    if is_blank(&new.relation_type) {
        return Err(EditError::validation(
            "relation_type",
            ERR_RELATION_TYPE_REQUIRED,
        ));
    }
    Ok(())
}
