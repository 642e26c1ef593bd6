//! The entity store contract.
//!
//! Reads take `&self`, writes take `&mut self`. Every call completes or
//! fails synchronously. Absence on a point read is `Ok(None)`, never an
//! error; absence on a write is the matching `*NotFound` error.

use onto_core::{
    Attribute, AttributeId, AttributeOwner, Edge, EdgeId, GraphId, Node, NodeId, Ontology,
    OwnerKind,
};

use crate::error::StoreResult;

/// Ontology (graph container) persistence.
pub trait GraphStore {
    /// Insert an ontology and return its new identity. The incoming `id` is
    /// ignored.
    fn create_ontology(&mut self, ontology: &Ontology) -> StoreResult<GraphId>;

    fn get_ontology(&self, id: GraphId) -> StoreResult<Option<Ontology>>;

    fn list_ontologies(&self) -> StoreResult<Vec<Ontology>>;

    fn update_ontology(&mut self, ontology: &Ontology) -> StoreResult<()>;

    /// Delete an ontology together with all of its nodes, edges and their
    /// attributes.
    fn delete_ontology(&mut self, id: GraphId) -> StoreResult<()>;
}

/// Node persistence.
pub trait NodeStore {
    /// Insert a node and return its new identity. The incoming `id` is
    /// ignored: re-inserting a snapshot yields a fresh identity.
    fn create_node(&mut self, node: &Node) -> StoreResult<NodeId>;

    fn get_node(&self, id: NodeId) -> StoreResult<Option<Node>>;

    /// Overwrite the stored node with the same identity.
    fn update_node(&mut self, node: &Node) -> StoreResult<()>;

    /// Delete a node. Its attributes are removed with it.
    fn delete_node(&mut self, id: NodeId) -> StoreResult<()>;

    fn nodes_in_graph(&self, graph_id: GraphId) -> StoreResult<Vec<Node>>;

    fn nodes_by_type(&self, graph_id: GraphId, node_type: &str) -> StoreResult<Vec<Node>> {
        Ok(self
            .nodes_in_graph(graph_id)?
            .into_iter()
            .filter(|n| n.node_type == node_type)
            .collect())
    }
}

/// Edge persistence.
pub trait EdgeStore {
    /// Insert an edge and return its new identity. The incoming `id` is
    /// ignored.
    fn create_edge(&mut self, edge: &Edge) -> StoreResult<EdgeId>;

    fn get_edge(&self, id: EdgeId) -> StoreResult<Option<Edge>>;

    /// Overwrite relation type, weight and properties of the stored edge.
    fn update_edge(&mut self, edge: &Edge) -> StoreResult<()>;

    /// Delete an edge. Its attributes are removed with it.
    fn delete_edge(&mut self, id: EdgeId) -> StoreResult<()>;

    fn edges_in_graph(&self, graph_id: GraphId) -> StoreResult<Vec<Edge>>;

    /// All edges where the node is source or target.
    fn edges_of_node(&self, node_id: NodeId) -> StoreResult<Vec<Edge>>;

    fn edge_exists(
        &self,
        graph_id: GraphId,
        source: NodeId,
        target: NodeId,
        relation_type: &str,
    ) -> StoreResult<bool> {
        Ok(self
            .edges_of_node(source)?
            .iter()
            .any(|e| e.graph_id == graph_id && e.same_relation(source, target, relation_type)))
    }
}

/// Detached attribute persistence.
pub trait AttributeStore {
    fn create_attribute(&mut self, attribute: &Attribute) -> StoreResult<AttributeId>;

    fn attributes_of(&self, owner: AttributeOwner) -> StoreResult<Vec<Attribute>>;

    /// All attributes owned by entities of one kind.
    fn attributes_by_kind(&self, kind: OwnerKind) -> StoreResult<Vec<Attribute>>;

    /// Delete every attribute of an owner, returning how many were removed.
    fn delete_attributes_of(&mut self, owner: AttributeOwner) -> StoreResult<usize>;
}

/// The full store contract.
pub trait EntityStore: GraphStore + NodeStore + EdgeStore + AttributeStore {}

impl<T> EntityStore for T where T: GraphStore + NodeStore + EdgeStore + AttributeStore + ?Sized {}
