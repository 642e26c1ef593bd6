//! Ontograph Editor
//!
//! The editing session callers work with.
//!
//! Responsibilities:
//! - Own the store handle, the command log and the observers
//! - Run every structural edit through validation, then record it
//! - Undo and redo recorded edits
//! - Notify observers synchronously, in order
//! - Hand out query engines over the current store
//!
//! One editor owns one history. Two editors must not edit the same ontology
//! concurrently: replayed commands assume every change to their entities
//! went through this log.

mod config;
mod editor;
mod events;

pub use config::{ConfigError, ConfigResult, EditorConfig};
pub use editor::Editor;
pub use events::{EditorEvent, EditorObserver, SubscriptionId};

pub use onto_history::{CommandKind, HistoryError, HistoryResult, ReplayFailurePolicy};
pub use onto_mutation::{CascadePolicy, DeletedNode, EditError, EditResult, ErrorKind};
pub use onto_query::{FieldMatch, NodeField, QueryEngine, QueryError, QueryResult, Subgraph};
