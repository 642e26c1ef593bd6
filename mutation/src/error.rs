//! Mutation error types.

use onto_core::{Edge, EdgeId, NodeId};
use onto_store::StoreError;
use std::fmt;
use thiserror::Error;

/// Result type for mutation operations.
pub type EditResult<T> = Result<T, EditError>;

/// The kind of entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Node,
    Edge,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Node => f.write_str("Node"),
            EntityKind::Edge => f.write_str("Relationship"),
        }
    }
}

/// Coarse classification of an [`EditError`].
///
/// `Validation`, `NotFound` and `Duplicate` are the caller's fault and never
/// worth retrying unchanged. `Store` failures may be transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Duplicate,
    Store,
}

/// Errors that can occur during mutation execution.
#[derive(Debug, Error)]
pub enum EditError {
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: i64 },

    #[error("Relationship already exists: {from} -[{relation_type}]-> {to}")]
    Duplicate {
        from: NodeId,
        to: NodeId,
        relation_type: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A cascading node delete stopped part way. `deleted` incident edges
    /// were removed before the failure. `restored` pairs each one put back
    /// afterwards with the identity the store gave it.
    #[error(
        "Deleting {node} aborted after removing {deleted} of {total} relationships \
         ({} restored): {source}",
        .restored.len()
    )]
    CascadeAborted {
        node: NodeId,
        deleted: usize,
        total: usize,
        restored: Vec<(EdgeId, EdgeId)>,
        source: StoreError,
    },
}

impl EditError {
    pub fn validation(field: &'static str, message: &'static str) -> Self {
        Self::Validation { field, message }
    }

    pub fn node_not_found(id: NodeId) -> Self {
        Self::NotFound {
            entity: EntityKind::Node,
            id: id.raw(),
        }
    }

    /// Relationships re-inserted under a new identity by a compensated
    /// cascade, as `(old, new)` pairs. Empty for every other error.
    pub fn restored_edges(&self) -> &[(EdgeId, EdgeId)] {
        match self {
            EditError::CascadeAborted { restored, .. } => restored,
            _ => &[],
        }
    }

    pub fn edge_not_found(id: EdgeId) -> Self {
        Self::NotFound {
            entity: EntityKind::Edge,
            id: id.raw(),
        }
    }

    pub fn duplicate(edge: &Edge) -> Self {
        Self::Duplicate {
            from: edge.source,
            to: edge.target,
            relation_type: edge.relation_type.clone(),
        }
    }

    /// Classify this error into the four-kind taxonomy. Store errors that
    /// report a missing row count as `NotFound`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditError::Validation { .. } => ErrorKind::Validation,
            EditError::NotFound { .. } => ErrorKind::NotFound,
            EditError::Duplicate { .. } => ErrorKind::Duplicate,
            EditError::Store(e) if e.is_not_found() => ErrorKind::NotFound,
            EditError::Store(_) | EditError::CascadeAborted { .. } => ErrorKind::Store,
        }
    }
}
