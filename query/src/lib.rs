//! Ontograph Query
//!
//! Read-only queries over one ontology.
//!
//! Responsibilities:
//! - Pass-through retrieval of nodes, edges and ontologies
//! - Attribute scans with an explicit per-field match policy
//! - Shortest path between two nodes (edges walked in both directions)
//! - Bounded-depth subgraph extraction
//!
//! The engine holds no state between calls; every answer is computed from
//! the store as it is at call time.

mod engine;
mod error;
mod matching;
mod result;
mod traversal;

pub use engine::QueryEngine;
pub use error::{QueryError, QueryResult};
pub use matching::{FieldMatch, NodeField};
pub use result::Subgraph;
