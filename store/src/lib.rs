//! Ontograph Store
//!
//! The entity store contract consumed by the editing core, and an in-memory
//! implementation of it.
//!
//! Responsibilities:
//! - CRUD by numeric identity for ontologies, nodes, edges and attributes
//! - Assign identities on insert (never reused)
//! - Honor cascades: node/edge deletes drop their attributes, ontology
//!   deletes drop everything inside
//! - Answer incident-edge and duplicate-relation lookups
//!
//! The core never talks to a global connection; a store value is injected
//! wherever it is needed.

mod error;
mod fault;
mod index;
mod memory;
mod traits;

pub use error::{StoreError, StoreOp, StoreResult};
pub use memory::MemoryStore;
pub use traits::{AttributeStore, EdgeStore, EntityStore, GraphStore, NodeStore};
