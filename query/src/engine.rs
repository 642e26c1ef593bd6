//! Query engine.

use onto_core::{Edge, EdgeId, GraphId, Node, NodeId, Ontology, OwnerKind};
use onto_store::EntityStore;
use std::collections::HashSet;

use crate::error::QueryResult;
use crate::matching::{FieldMatch, NodeField};
use crate::result::Subgraph;
use crate::traversal;

/// Read-only query engine over a borrowed store.
pub struct QueryEngine<'s, S: EntityStore + ?Sized> {
    store: &'s S,
}

impl<'s, S: EntityStore + ?Sized> QueryEngine<'s, S> {
    /// Create a new engine.
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    // ==================== Retrieval ====================

    pub fn list_ontologies(&self) -> QueryResult<Vec<Ontology>> {
        Ok(self.store.list_ontologies()?)
    }

    pub fn get_all_nodes(&self, graph_id: GraphId) -> QueryResult<Vec<Node>> {
        Ok(self.store.nodes_in_graph(graph_id)?)
    }

    pub fn get_all_edges(&self, graph_id: GraphId) -> QueryResult<Vec<Edge>> {
        Ok(self.store.edges_in_graph(graph_id)?)
    }

    /// Get a node by id. Absence is `None`, not an error.
    pub fn get_node_by_id(&self, id: NodeId) -> QueryResult<Option<Node>> {
        if !id.is_valid() {
            return Ok(None);
        }
        Ok(self.store.get_node(id)?)
    }

    /// Get an edge by id. Absence is `None`, not an error.
    pub fn get_edge_by_id(&self, id: EdgeId) -> QueryResult<Option<Edge>> {
        if !id.is_valid() {
            return Ok(None);
        }
        Ok(self.store.get_edge(id)?)
    }

    /// All edges with the node as source or target.
    pub fn get_edges_of_node(&self, id: NodeId) -> QueryResult<Vec<Edge>> {
        Ok(self.store.edges_of_node(id)?)
    }

    pub fn nodes_by_type(&self, graph_id: GraphId, node_type: &str) -> QueryResult<Vec<Node>> {
        Ok(self.store.nodes_by_type(graph_id, node_type)?)
    }

    // ==================== Scans ====================

    /// Find nodes whose field `name` matches `value` under the field's
    /// default policy (see [`NodeField::default_match`]).
    pub fn query_by_attribute(
        &self,
        graph_id: GraphId,
        name: &str,
        value: &str,
    ) -> QueryResult<Vec<Node>> {
        let field = NodeField::parse(name);
        let matcher = field.default_match(value);
        self.query_nodes(graph_id, &field, &matcher)
    }

    /// Find nodes of an ontology whose `field` satisfies `matcher`.
    ///
    /// A property field also matches detached node attributes of the same
    /// name. Each node appears at most once, in listing order.
    pub fn query_nodes(
        &self,
        graph_id: GraphId,
        field: &NodeField,
        matcher: &FieldMatch,
    ) -> QueryResult<Vec<Node>> {
        let detached = match field {
            NodeField::Property(key) => self.detached_matches(key, matcher)?,
            _ => HashSet::new(),
        };

        Ok(self
            .store
            .nodes_in_graph(graph_id)?
            .into_iter()
            .filter(|node| {
                detached.contains(&node.id)
                    || field
                        .text_of(node)
                        .map(|text| matcher.matches(&text))
                        .unwrap_or(false)
            })
            .collect())
    }

    fn detached_matches(&self, key: &str, matcher: &FieldMatch) -> QueryResult<HashSet<NodeId>> {
        Ok(self
            .store
            .attributes_by_kind(OwnerKind::Node)?
            .into_iter()
            .filter(|attr| attr.name == key && matcher.matches(&attr.value))
            .filter_map(|attr| attr.owner.as_node())
            .collect())
    }

    // ==================== Traversal ====================

    /// Shortest path between two nodes, walking edges in both directions.
    /// `find_path(x, x)` is `[x]` for an existing node.
    pub fn find_path(&self, source: NodeId, target: NodeId) -> QueryResult<Vec<NodeId>> {
        traversal::shortest_path(self.store, source, target)
    }

    /// Nodes and edges within `depth` hops of `center`.
    pub fn get_subgraph(&self, center: NodeId, depth: i32) -> QueryResult<Subgraph> {
        traversal::bounded_subgraph(self.store, center, depth)
    }
}
