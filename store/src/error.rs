//! Store error types.

use onto_core::{AttributeId, EdgeId, GraphId, NodeId};
use std::fmt;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A write operation the store can perform. Used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    CreateOntology,
    UpdateOntology,
    DeleteOntology,
    CreateNode,
    UpdateNode,
    DeleteNode,
    CreateEdge,
    UpdateEdge,
    DeleteEdge,
    CreateAttribute,
    DeleteAttributes,
}

impl StoreOp {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreOp::CreateOntology => "create_ontology",
            StoreOp::UpdateOntology => "update_ontology",
            StoreOp::DeleteOntology => "delete_ontology",
            StoreOp::CreateNode => "create_node",
            StoreOp::UpdateNode => "update_node",
            StoreOp::DeleteNode => "delete_node",
            StoreOp::CreateEdge => "create_edge",
            StoreOp::UpdateEdge => "update_edge",
            StoreOp::DeleteEdge => "delete_edge",
            StoreOp::CreateAttribute => "create_attribute",
            StoreOp::DeleteAttributes => "delete_attributes",
        }
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors reported by the backing store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The store cannot be reached.
    #[error("store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Ontology not found: {0}")]
    OntologyNotFound(GraphId),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Edge not found: {0}")]
    EdgeNotFound(EdgeId),

    #[error("Attribute not found: {0}")]
    AttributeNotFound(AttributeId),

    /// A referenced row does not exist.
    #[error("foreign key violation: {message}")]
    ForeignKey { message: String },

    /// The store refused a malformed row.
    #[error("write rejected: {message}")]
    Rejected { message: String },

    /// A failure armed through failure injection.
    #[error("injected failure on {op}")]
    Injected { op: StoreOp },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn foreign_key(message: impl Into<String>) -> Self {
        Self::ForeignKey {
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Returns true if the error reports a missing entity rather than a
    /// failed store.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::OntologyNotFound(_)
                | StoreError::NodeNotFound(_)
                | StoreError::EdgeNotFound(_)
                | StoreError::AttributeNotFound(_)
        )
    }
}
