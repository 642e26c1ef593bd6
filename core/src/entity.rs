//! Entity structures.
//!
//! An [`Ontology`] scopes a disjoint set of [`Node`]s and [`Edge`]s.
//! [`Attribute`]s are detached key/value rows owned by exactly one node or
//! one edge.

use serde::{Deserialize, Serialize};

use crate::{AttributeId, EdgeId, GraphId, NodeId, Properties, Value, ValueKind};

/// Default node color, carried for presentation layers only.
pub const DEFAULT_NODE_COLOR: &str = "#3498db";

/// Default version string of a new ontology.
pub const DEFAULT_ONTOLOGY_VERSION: &str = "1.0";

/// A named graph ("project") containing nodes and edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ontology {
    pub id: GraphId,
    pub name: String,
    pub description: String,
    pub version: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Milliseconds since the Unix epoch.
    pub updated_at: i64,
}

impl Ontology {
    /// Create an unpersisted ontology.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GraphId::UNSET,
            name: name.into(),
            description: String::new(),
            version: DEFAULT_ONTOLOGY_VERSION.to_string(),
            created_at: 0,
            updated_at: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// 2D layout position. Carried through the core, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

fn default_color() -> String {
    DEFAULT_NODE_COLOR.to_string()
}

/// A typed, named vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Store-assigned identity; [`NodeId::UNSET`] until persisted.
    pub id: NodeId,
    /// Owning ontology.
    pub graph_id: GraphId,
    /// Free-form type tag.
    pub node_type: String,
    /// Display name, required.
    pub name: String,
    pub description: String,
    pub position: Position,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub properties: Properties,
}

impl Node {
    /// Create an unpersisted node.
    pub fn new(graph_id: GraphId, node_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: NodeId::UNSET,
            graph_id,
            node_type: node_type.into(),
            name: name.into(),
            description: String::new(),
            position: Position::default(),
            color: default_color(),
            properties: Properties::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// A node is valid iff its identity is positive.
    pub fn is_valid(&self) -> bool {
        self.id.is_valid()
    }

    /// Get a property value by key.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

fn default_weight() -> f32 {
    1.0
}

/// A typed, weighted, directed relationship between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Store-assigned identity; [`EdgeId::UNSET`] until persisted.
    pub id: EdgeId,
    /// Owning ontology.
    pub graph_id: GraphId,
    pub source: NodeId,
    pub target: NodeId,
    /// Relation tag, required.
    pub relation_type: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
    #[serde(default)]
    pub properties: Properties,
}

impl Edge {
    /// Create an unpersisted edge with weight `1.0`.
    pub fn new(
        graph_id: GraphId,
        source: NodeId,
        target: NodeId,
        relation_type: impl Into<String>,
    ) -> Self {
        Self {
            id: EdgeId::UNSET,
            graph_id,
            source,
            target,
            relation_type: relation_type.into(),
            weight: default_weight(),
            properties: Properties::new(),
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        self.id.is_valid()
    }

    /// Check if this edge has the node as source or target.
    pub fn touches(&self, node_id: NodeId) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// The endpoint opposite to `node_id`, walking the edge in either
    /// direction. Returns `None` if the edge does not touch the node.
    pub fn other_end(&self, node_id: NodeId) -> Option<NodeId> {
        if self.source == node_id {
            Some(self.target)
        } else if self.target == node_id {
            Some(self.source)
        } else {
            None
        }
    }

    /// Check if this edge has the same endpoints and relation type.
    pub fn same_relation(&self, source: NodeId, target: NodeId, relation_type: &str) -> bool {
        self.source == source && self.target == target && self.relation_type == relation_type
    }
}

/// Which kind of entity owns an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OwnerKind {
    Node,
    Relation,
}

/// The single owner of an attribute: a node or an edge, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "entity_type", content = "entity_id", rename_all = "UPPERCASE")]
pub enum AttributeOwner {
    Node(NodeId),
    #[serde(rename = "RELATION")]
    Edge(EdgeId),
}

impl AttributeOwner {
    pub fn kind(&self) -> OwnerKind {
        match self {
            AttributeOwner::Node(_) => OwnerKind::Node,
            AttributeOwner::Edge(_) => OwnerKind::Relation,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            AttributeOwner::Node(id) => Some(*id),
            AttributeOwner::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<EdgeId> {
        match self {
            AttributeOwner::Node(_) => None,
            AttributeOwner::Edge(id) => Some(*id),
        }
    }
}

impl From<NodeId> for AttributeOwner {
    fn from(id: NodeId) -> Self {
        AttributeOwner::Node(id)
    }
}

impl From<EdgeId> for AttributeOwner {
    fn from(id: EdgeId) -> Self {
        AttributeOwner::Edge(id)
    }
}

/// A detached key/value pair attached to one node or one edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: AttributeId,
    #[serde(flatten)]
    pub owner: AttributeOwner,
    pub name: String,
    pub value: String,
    pub kind: ValueKind,
}

impl Attribute {
    /// Create an unpersisted string attribute.
    pub fn new(
        owner: impl Into<AttributeOwner>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            id: AttributeId::UNSET,
            owner: owner.into(),
            name: name.into(),
            value: value.into(),
            kind: ValueKind::String,
        }
    }

    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }
}
