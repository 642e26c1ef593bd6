//! Ontograph Core Types
//!
//! This crate provides the data model shared by every other crate:
//! - Identity types (GraphId, NodeId, EdgeId, AttributeId)
//! - Scalar values and ordered property bags
//! - Entity structures (Ontology, Node, Edge, Attribute)
//! - Common validation messages

mod entity;
mod id;
pub mod messages;
mod value;

pub use entity::*;
pub use id::*;
pub use value::*;
