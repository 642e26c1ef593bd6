//! Ontograph Mutation
//!
//! Validate and execute structural edits against an entity store.
//!
//! Responsibilities:
//! - Validate node and relationship input before touching the store
//! - Perform exactly one structural change per call
//! - Handle cascading node deletion (incident edges first)
//! - Enforce relationship uniqueness per ontology
//! - Return snapshots the command log needs to reverse the change
//!
//! # Module Structure
//!
//! - `executor` - Main MutationExecutor that coordinates operations
//! - `ops/` - Individual operation implementations (add/delete/update for nodes and edges)
//! - `validation` - Shared input validation helpers
//! - `error` - Error types and the four-kind error taxonomy
//! - `result` - Result types for mutation outcomes

mod error;
mod executor;
mod ops;
mod result;
mod validation;

pub use error::{EditError, EditResult, EntityKind, ErrorKind};
pub use executor::MutationExecutor;
pub use ops::CascadePolicy;
pub use result::{DeletedNode, MutationOutcome};
