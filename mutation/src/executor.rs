//! Mutation executor - coordinates mutation operations.
//!
//! The executor delegates to specialized operation modules in `ops/`:
//! - `ops/add_node.rs` - node insertion
//! - `ops/delete_node.rs` - node deletion with cascade
//! - `ops/update_node.rs` - node overwrite
//! - `ops/add_edge.rs` - relationship insertion with uniqueness check
//! - `ops/delete_edge.rs` - relationship deletion
//! - `ops/update_edge.rs` - relationship overwrite

use onto_core::{Edge, EdgeId, Node, NodeId};
use onto_store::EntityStore;

use crate::error::EditResult;
use crate::ops::{self, CascadePolicy};
use crate::result::MutationOutcome;

/// Mutation executor.
pub struct MutationExecutor<'s, S: EntityStore + ?Sized> {
    store: &'s mut S,
    cascade: CascadePolicy,
}

impl<'s, S: EntityStore + ?Sized> MutationExecutor<'s, S> {
    /// Create a new executor.
    pub fn new(store: &'s mut S) -> Self {
        Self {
            store,
            cascade: CascadePolicy::default(),
        }
    }

    /// Set how aborted cascading deletes are handled.
    pub fn with_cascade(mut self, policy: CascadePolicy) -> Self {
        self.cascade = policy;
        self
    }

    /// Insert a node; its id is written back into `node`.
    pub fn add_node(&mut self, node: &mut Node) -> EditResult<MutationOutcome> {
        ops::execute_add_node(self.store, node)
    }

    /// Delete a node together with its incident relationships.
    pub fn delete_node(&mut self, id: NodeId) -> EditResult<MutationOutcome> {
        ops::execute_delete_node(self.store, id, self.cascade)
    }

    /// Overwrite a node.
    pub fn update_node(&mut self, old: &Node, new: &Node) -> EditResult<MutationOutcome> {
        ops::execute_update_node(self.store, old, new)
    }

    /// Insert a relationship; its id is written back into `edge`.
    pub fn add_edge(&mut self, edge: &mut Edge) -> EditResult<MutationOutcome> {
        ops::execute_add_edge(self.store, edge)
    }

    /// Delete a relationship.
    pub fn delete_edge(&mut self, id: EdgeId) -> EditResult<MutationOutcome> {
        ops::execute_delete_edge(self.store, id)
    }

    /// Overwrite a relationship's type, weight and properties.
    pub fn update_edge(&mut self, old: &Edge, new: &Edge) -> EditResult<MutationOutcome> {
        ops::execute_update_edge(self.store, old, new)
    }
}
