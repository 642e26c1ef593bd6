//! Common validation messages used across Ontograph components.
//!
//! These constants keep wording consistent between the mutation service and
//! anything that renders its errors.

/// Error: owning ontology id must be positive.
pub const ERR_GRAPH_ID_REQUIRED: &str = "owning ontology id must be positive";

/// Error: node name is empty or whitespace.
pub const ERR_NODE_NAME_REQUIRED: &str = "node name must not be empty";

/// Error: node type tag is empty.
pub const ERR_NODE_TYPE_REQUIRED: &str = "node type must not be empty";

/// Error: node id must be positive.
pub const ERR_NODE_ID_REQUIRED: &str = "node id must be positive";

/// Error: old and new snapshots name different nodes.
pub const ERR_NODE_ID_MISMATCH: &str = "old and new node ids differ";

/// Error: edge endpoint ids must be positive.
pub const ERR_ENDPOINT_REQUIRED: &str = "source and target ids must be positive";

/// Error: self-loops are not allowed.
pub const ERR_SELF_LOOP: &str = "source and target must differ";

/// Error: relation type is empty.
pub const ERR_RELATION_TYPE_REQUIRED: &str = "relation type must not be empty";

/// Error: edge id must be positive.
pub const ERR_EDGE_ID_REQUIRED: &str = "edge id must be positive";

/// Error: old and new snapshots name different edges.
pub const ERR_EDGE_ID_MISMATCH: &str = "old and new edge ids differ";

/// Error: an update tried to move an edge to different endpoints.
pub const ERR_ENDPOINTS_IMMUTABLE: &str = "edge endpoints cannot be changed by an update";

/// Error: an update tried to move an entity to another ontology.
pub const ERR_GRAPH_IMMUTABLE: &str = "owning ontology cannot be changed by an update";
