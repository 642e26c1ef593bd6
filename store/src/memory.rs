//! In-memory store implementation.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use onto_core::{
    Attribute, AttributeId, AttributeOwner, Edge, EdgeId, GraphId, Node, NodeId, Ontology,
    OwnerKind,
};

use crate::error::{StoreError, StoreOp, StoreResult};
use crate::fault::FaultPlan;
use crate::index::{AdjacencyIndex, TypeIndex};
use crate::traits::{AttributeStore, EdgeStore, GraphStore, NodeStore};

/// Auto-increment allocator. Identities are never handed out twice, the way
/// an auto-increment column behaves.
#[derive(Debug)]
struct IdAllocator {
    next_ontology_id: i64,
    next_node_id: i64,
    next_edge_id: i64,
    next_attribute_id: i64,
}

impl IdAllocator {
    fn new() -> Self {
        Self {
            next_ontology_id: 1,
            next_node_id: 1,
            next_edge_id: 1,
            next_attribute_id: 1,
        }
    }

    fn alloc_ontology_id(&mut self) -> GraphId {
        let id = GraphId::new(self.next_ontology_id);
        self.next_ontology_id += 1;
        id
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    fn alloc_edge_id(&mut self) -> EdgeId {
        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;
        id
    }

    fn alloc_attribute_id(&mut self) -> AttributeId {
        let id = AttributeId::new(self.next_attribute_id);
        self.next_attribute_id += 1;
        id
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// An indexed, in-memory entity store.
///
/// Enforces the same row-level rules a relational backend would: foreign
/// keys from nodes to ontologies and from edges to nodes, non-empty required
/// columns, cascading deletes. Relation uniqueness is deliberately *not*
/// enforced here; that is a policy of the mutation service.
///
/// Listings are ordered by identity, which is insertion order.
#[derive(Debug)]
pub struct MemoryStore {
    ontologies: BTreeMap<GraphId, Ontology>,
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
    attributes: BTreeMap<AttributeId, Attribute>,
    id_alloc: IdAllocator,
    type_index: TypeIndex,
    adj_index: AdjacencyIndex,
    faults: FaultPlan,
    available: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            ontologies: BTreeMap::new(),
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            attributes: BTreeMap::new(),
            id_alloc: IdAllocator::new(),
            type_index: TypeIndex::new(),
            adj_index: AdjacencyIndex::new(),
            faults: FaultPlan::default(),
            available: true,
        }
    }

    // ==================== Failure Simulation ====================

    /// Simulate the store becoming unreachable (or reachable again). While
    /// unavailable every call fails with [`StoreError::Unavailable`].
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Let `successes_before` more calls of `op` succeed, then fail the next
    /// one with [`StoreError::Injected`].
    pub fn fail_after(&mut self, op: StoreOp, successes_before: usize) {
        self.faults.arm(op, successes_before);
    }

    /// Disarm all injected failures.
    pub fn clear_faults(&mut self) {
        self.faults.clear();
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    fn check_read(&self) -> StoreResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(StoreError::unavailable("connection closed"))
        }
    }

    fn check_write(&mut self, op: StoreOp) -> StoreResult<()> {
        self.check_read()?;
        self.faults.check(op)
    }

    // ==================== Cascades ====================

    fn remove_edge_row(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(&id)?;
        self.adj_index.remove(id, edge.source, edge.target);
        self.remove_attributes_of(AttributeOwner::Edge(id));
        Some(edge)
    }

    fn remove_node_row(&mut self, id: NodeId) -> Option<Node> {
        let incident = self.adj_index.edges_involving(id);
        for edge_id in incident {
            self.remove_edge_row(edge_id);
        }

        let node = self.nodes.remove(&id)?;
        self.type_index.remove(node.graph_id, &node.node_type, id);
        self.remove_attributes_of(AttributeOwner::Node(id));
        Some(node)
    }

    fn remove_attributes_of(&mut self, owner: AttributeOwner) -> usize {
        let before = self.attributes.len();
        self.attributes.retain(|_, attr| attr.owner != owner);
        before - self.attributes.len()
    }

    fn require_ontology(&self, id: GraphId) -> StoreResult<()> {
        if self.ontologies.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::foreign_key(format!("ontology {} does not exist", id)))
        }
    }

    fn require_node(&self, id: NodeId) -> StoreResult<()> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::foreign_key(format!("node {} does not exist", id)))
        }
    }
}

fn reject_blank(value: &str, column: &str) -> StoreResult<()> {
    if value.trim().is_empty() {
        Err(StoreError::rejected(format!("{} must not be empty", column)))
    } else {
        Ok(())
    }
}

impl GraphStore for MemoryStore {
    fn create_ontology(&mut self, ontology: &Ontology) -> StoreResult<GraphId> {
        self.check_write(StoreOp::CreateOntology)?;
        reject_blank(&ontology.name, "ontology name")?;
        if self.ontologies.values().any(|o| o.name == ontology.name) {
            return Err(StoreError::rejected(format!(
                "ontology name '{}' already exists",
                ontology.name
            )));
        }

        let id = self.id_alloc.alloc_ontology_id();
        let now = now_millis();
        let mut row = ontology.clone();
        row.id = id;
        row.created_at = now;
        row.updated_at = now;
        self.ontologies.insert(id, row);
        Ok(id)
    }

    fn get_ontology(&self, id: GraphId) -> StoreResult<Option<Ontology>> {
        self.check_read()?;
        Ok(self.ontologies.get(&id).cloned())
    }

    fn list_ontologies(&self) -> StoreResult<Vec<Ontology>> {
        self.check_read()?;
        Ok(self.ontologies.values().cloned().collect())
    }

    fn update_ontology(&mut self, ontology: &Ontology) -> StoreResult<()> {
        self.check_write(StoreOp::UpdateOntology)?;
        reject_blank(&ontology.name, "ontology name")?;
        let row = self
            .ontologies
            .get_mut(&ontology.id)
            .ok_or(StoreError::OntologyNotFound(ontology.id))?;

        row.name = ontology.name.clone();
        row.description = ontology.description.clone();
        row.version = ontology.version.clone();
        row.updated_at = now_millis();
        Ok(())
    }

    fn delete_ontology(&mut self, id: GraphId) -> StoreResult<()> {
        self.check_write(StoreOp::DeleteOntology)?;
        if !self.ontologies.contains_key(&id) {
            return Err(StoreError::OntologyNotFound(id));
        }

        let node_ids: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|n| n.graph_id == id)
            .map(|n| n.id)
            .collect();
        for node_id in node_ids {
            self.remove_node_row(node_id);
        }

        // Edges are scoped to the ontology too, even if an endpoint leaked in
        // from elsewhere.
        let edge_ids: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|e| e.graph_id == id)
            .map(|e| e.id)
            .collect();
        for edge_id in edge_ids {
            self.remove_edge_row(edge_id);
        }

        self.ontologies.remove(&id);
        Ok(())
    }
}

impl NodeStore for MemoryStore {
    fn create_node(&mut self, node: &Node) -> StoreResult<NodeId> {
        self.check_write(StoreOp::CreateNode)?;
        self.require_ontology(node.graph_id)?;
        reject_blank(&node.name, "node name")?;
        reject_blank(&node.node_type, "node type")?;

        let id = self.id_alloc.alloc_node_id();
        let mut row = node.clone();
        row.id = id;

        self.type_index.insert(row.graph_id, &row.node_type, id);
        self.nodes.insert(id, row);
        Ok(id)
    }

    fn get_node(&self, id: NodeId) -> StoreResult<Option<Node>> {
        self.check_read()?;
        Ok(self.nodes.get(&id).cloned())
    }

    fn update_node(&mut self, node: &Node) -> StoreResult<()> {
        self.check_write(StoreOp::UpdateNode)?;
        reject_blank(&node.name, "node name")?;
        reject_blank(&node.node_type, "node type")?;
        let row = self
            .nodes
            .get_mut(&node.id)
            .ok_or(StoreError::NodeNotFound(node.id))?;

        let graph_id = row.graph_id;
        let old_type = std::mem::replace(&mut row.node_type, node.node_type.clone());
        row.name = node.name.clone();
        row.description = node.description.clone();
        row.position = node.position;
        row.color = node.color.clone();
        row.properties = node.properties.clone();

        if old_type != node.node_type {
            self.type_index.remove(graph_id, &old_type, node.id);
            self.type_index.insert(graph_id, &node.node_type, node.id);
        }
        Ok(())
    }

    fn delete_node(&mut self, id: NodeId) -> StoreResult<()> {
        self.check_write(StoreOp::DeleteNode)?;
        self.remove_node_row(id)
            .map(|_| ())
            .ok_or(StoreError::NodeNotFound(id))
    }

    fn nodes_in_graph(&self, graph_id: GraphId) -> StoreResult<Vec<Node>> {
        self.check_read()?;
        Ok(self
            .nodes
            .values()
            .filter(|n| n.graph_id == graph_id)
            .cloned()
            .collect())
    }

    fn nodes_by_type(&self, graph_id: GraphId, node_type: &str) -> StoreResult<Vec<Node>> {
        self.check_read()?;
        Ok(self
            .type_index
            .get(graph_id, node_type)
            .filter_map(|id| self.nodes.get(&id).cloned())
            .collect())
    }
}

impl EdgeStore for MemoryStore {
    fn create_edge(&mut self, edge: &Edge) -> StoreResult<EdgeId> {
        self.check_write(StoreOp::CreateEdge)?;
        self.require_ontology(edge.graph_id)?;
        self.require_node(edge.source)?;
        self.require_node(edge.target)?;
        reject_blank(&edge.relation_type, "relation type")?;
        if edge.source == edge.target {
            return Err(StoreError::rejected("self-referencing relation"));
        }

        let id = self.id_alloc.alloc_edge_id();
        let mut row = edge.clone();
        row.id = id;

        self.adj_index.insert(id, row.source, row.target);
        self.edges.insert(id, row);
        Ok(id)
    }

    fn get_edge(&self, id: EdgeId) -> StoreResult<Option<Edge>> {
        self.check_read()?;
        Ok(self.edges.get(&id).cloned())
    }

    fn update_edge(&mut self, edge: &Edge) -> StoreResult<()> {
        self.check_write(StoreOp::UpdateEdge)?;
        reject_blank(&edge.relation_type, "relation type")?;
        let row = self
            .edges
            .get_mut(&edge.id)
            .ok_or(StoreError::EdgeNotFound(edge.id))?;

        row.relation_type = edge.relation_type.clone();
        row.weight = edge.weight;
        row.properties = edge.properties.clone();
        Ok(())
    }

    fn delete_edge(&mut self, id: EdgeId) -> StoreResult<()> {
        self.check_write(StoreOp::DeleteEdge)?;
        self.remove_edge_row(id)
            .map(|_| ())
            .ok_or(StoreError::EdgeNotFound(id))
    }

    fn edges_in_graph(&self, graph_id: GraphId) -> StoreResult<Vec<Edge>> {
        self.check_read()?;
        Ok(self
            .edges
            .values()
            .filter(|e| e.graph_id == graph_id)
            .cloned()
            .collect())
    }

    fn edges_of_node(&self, node_id: NodeId) -> StoreResult<Vec<Edge>> {
        self.check_read()?;
        Ok(self
            .adj_index
            .edges_involving(node_id)
            .into_iter()
            .filter_map(|id| self.edges.get(&id).cloned())
            .collect())
    }

    fn edge_exists(
        &self,
        graph_id: GraphId,
        source: NodeId,
        target: NodeId,
        relation_type: &str,
    ) -> StoreResult<bool> {
        self.check_read()?;
        Ok(self.adj_index.edges_from(source).any(|id| {
            self.edges
                .get(&id)
                .map(|e| e.graph_id == graph_id && e.same_relation(source, target, relation_type))
                .unwrap_or(false)
        }))
    }
}

impl AttributeStore for MemoryStore {
    fn create_attribute(&mut self, attribute: &Attribute) -> StoreResult<AttributeId> {
        self.check_write(StoreOp::CreateAttribute)?;
        reject_blank(&attribute.name, "attribute name")?;
        match attribute.owner {
            AttributeOwner::Node(node_id) => self.require_node(node_id)?,
            AttributeOwner::Edge(edge_id) => {
                if !self.edges.contains_key(&edge_id) {
                    return Err(StoreError::foreign_key(format!(
                        "edge {} does not exist",
                        edge_id
                    )));
                }
            }
        }

        let id = self.id_alloc.alloc_attribute_id();
        let mut row = attribute.clone();
        row.id = id;
        self.attributes.insert(id, row);
        Ok(id)
    }

    fn attributes_of(&self, owner: AttributeOwner) -> StoreResult<Vec<Attribute>> {
        self.check_read()?;
        Ok(self
            .attributes
            .values()
            .filter(|a| a.owner == owner)
            .cloned()
            .collect())
    }

    fn attributes_by_kind(&self, kind: OwnerKind) -> StoreResult<Vec<Attribute>> {
        self.check_read()?;
        Ok(self
            .attributes
            .values()
            .filter(|a| a.owner.kind() == kind)
            .cloned()
            .collect())
    }

    fn delete_attributes_of(&mut self, owner: AttributeOwner) -> StoreResult<usize> {
        self.check_write(StoreOp::DeleteAttributes)?;
        Ok(self.remove_attributes_of(owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onto_core::props;
    use pretty_assertions::assert_eq;

    fn store_with_graph() -> (MemoryStore, GraphId) {
        let mut store = MemoryStore::new();
        let graph = store.create_ontology(&Ontology::new("network")).unwrap();
        (store, graph)
    }

    fn node(store: &mut MemoryStore, graph: GraphId, name: &str) -> NodeId {
        store.create_node(&Node::new(graph, "Concept", name)).unwrap()
    }

    #[test]
    fn test_create_node_assigns_fresh_ids() {
        // GIVEN
        let (mut store, graph) = store_with_graph();
        let mut snapshot = Node::new(graph, "Protocol", "TCP");

        // WHEN
        let first = store.create_node(&snapshot).unwrap();
        snapshot.id = first;
        let second = store.create_node(&snapshot).unwrap();

        // THEN
        assert_ne!(first, second);
        assert_eq!(store.get_node(second).unwrap().unwrap().id, second);
        assert_eq!(store.node_count(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        // GIVEN
        let (mut store, graph) = store_with_graph();
        let a = node(&mut store, graph, "A");

        // WHEN
        store.delete_node(a).unwrap();
        let b = node(&mut store, graph, "B");

        // THEN
        assert!(b > a);
    }

    #[test]
    fn test_create_node_requires_ontology() {
        let mut store = MemoryStore::new();
        let result = store.create_node(&Node::new(GraphId::new(9), "T", "orphan"));

        assert!(matches!(result, Err(StoreError::ForeignKey { .. })));
    }

    #[test]
    fn test_create_edge_requires_endpoints() {
        // GIVEN
        let (mut store, graph) = store_with_graph();
        let a = node(&mut store, graph, "A");

        // WHEN
        let result = store.create_edge(&Edge::new(graph, a, NodeId::new(77), "uses"));

        // THEN
        assert!(matches!(result, Err(StoreError::ForeignKey { .. })));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_store_does_not_enforce_relation_uniqueness() {
        let (mut store, graph) = store_with_graph();
        let a = node(&mut store, graph, "A");
        let b = node(&mut store, graph, "B");
        let edge = Edge::new(graph, a, b, "uses");

        store.create_edge(&edge).unwrap();
        store.create_edge(&edge).unwrap();

        assert_eq!(store.edge_count(), 2);
        assert!(store.edge_exists(graph, a, b, "uses").unwrap());
        assert!(!store.edge_exists(graph, b, a, "uses").unwrap());
    }

    #[test]
    fn test_edges_of_node_covers_both_directions() {
        // GIVEN
        let (mut store, graph) = store_with_graph();
        let a = node(&mut store, graph, "A");
        let b = node(&mut store, graph, "B");
        let c = node(&mut store, graph, "C");
        let ab = store.create_edge(&Edge::new(graph, a, b, "r")).unwrap();
        let ca = store.create_edge(&Edge::new(graph, c, a, "r")).unwrap();
        store.create_edge(&Edge::new(graph, b, c, "r")).unwrap();

        // WHEN
        let ids: Vec<EdgeId> = store.edges_of_node(a).unwrap().iter().map(|e| e.id).collect();

        // THEN
        assert_eq!(ids, vec![ab, ca]);
    }

    #[test]
    fn test_delete_node_cascades_edges_and_attributes() {
        // GIVEN
        let (mut store, graph) = store_with_graph();
        let a = node(&mut store, graph, "A");
        let b = node(&mut store, graph, "B");
        let ab = store.create_edge(&Edge::new(graph, a, b, "r")).unwrap();
        store.create_attribute(&Attribute::new(a, "rfc", "793")).unwrap();
        store.create_attribute(&Attribute::new(ab, "since", "1981")).unwrap();
        store.create_attribute(&Attribute::new(b, "rfc", "791")).unwrap();

        // WHEN
        store.delete_node(a).unwrap();

        // THEN
        assert_eq!(store.edge_count(), 0);
        assert!(store.edges_of_node(b).unwrap().is_empty());
        assert_eq!(store.attribute_count(), 1);
        assert_eq!(store.attributes_of(AttributeOwner::Node(b)).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_rows_report_not_found() {
        let (mut store, _) = store_with_graph();

        assert_eq!(
            store.delete_node(NodeId::new(5)),
            Err(StoreError::NodeNotFound(NodeId::new(5)))
        );
        assert_eq!(
            store.delete_edge(EdgeId::new(5)),
            Err(StoreError::EdgeNotFound(EdgeId::new(5)))
        );
    }

    #[test]
    fn test_update_node_keeps_owner_and_reindexes_type() {
        // GIVEN
        let (mut store, graph) = store_with_graph();
        let id = node(&mut store, graph, "A");
        let mut changed = store.get_node(id).unwrap().unwrap();
        changed.node_type = "Protocol".into();
        changed.graph_id = GraphId::new(99);
        changed.properties = props! { "layer" => 4i64 };

        // WHEN
        store.update_node(&changed).unwrap();

        // THEN
        let stored = store.get_node(id).unwrap().unwrap();
        assert_eq!(stored.graph_id, graph);
        assert_eq!(stored.properties, props! { "layer" => 4i64 });
        assert_eq!(store.nodes_by_type(graph, "Protocol").unwrap().len(), 1);
        assert!(store.nodes_by_type(graph, "Concept").unwrap().is_empty());
    }

    #[test]
    fn test_update_edge_keeps_endpoints() {
        let (mut store, graph) = store_with_graph();
        let a = node(&mut store, graph, "A");
        let b = node(&mut store, graph, "B");
        let id = store.create_edge(&Edge::new(graph, a, b, "r")).unwrap();

        let mut changed = store.get_edge(id).unwrap().unwrap();
        changed.relation_type = "depends_on".into();
        changed.weight = 2.5;
        changed.target = a;
        store.update_edge(&changed).unwrap();

        let stored = store.get_edge(id).unwrap().unwrap();
        assert_eq!(stored.relation_type, "depends_on");
        assert_eq!(stored.weight, 2.5);
        assert_eq!(stored.target, b);
    }

    #[test]
    fn test_delete_ontology_cascades_everything() {
        // GIVEN
        let (mut store, graph) = store_with_graph();
        let other = store.create_ontology(&Ontology::new("other")).unwrap();
        let a = node(&mut store, graph, "A");
        let b = node(&mut store, graph, "B");
        store.create_edge(&Edge::new(graph, a, b, "r")).unwrap();
        store.create_attribute(&Attribute::new(a, "k", "v")).unwrap();
        let kept = node(&mut store, other, "kept");

        // WHEN
        store.delete_ontology(graph).unwrap();

        // THEN
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.attribute_count(), 0);
        assert!(store.get_node(kept).unwrap().is_some());
        assert_eq!(store.list_ontologies().unwrap().len(), 1);
    }

    #[test]
    fn test_ontology_names_are_unique() {
        let (mut store, _) = store_with_graph();
        let result = store.create_ontology(&Ontology::new("network"));

        assert!(matches!(result, Err(StoreError::Rejected { .. })));
    }

    #[test]
    fn test_attributes_by_kind() {
        let (mut store, graph) = store_with_graph();
        let a = node(&mut store, graph, "A");
        let b = node(&mut store, graph, "B");
        let ab = store.create_edge(&Edge::new(graph, a, b, "r")).unwrap();
        store.create_attribute(&Attribute::new(a, "k", "1")).unwrap();
        store.create_attribute(&Attribute::new(ab, "k", "2")).unwrap();

        let on_nodes = store.attributes_by_kind(OwnerKind::Node).unwrap();
        assert_eq!(on_nodes.len(), 1);
        assert_eq!(on_nodes[0].owner, AttributeOwner::Node(a));
        assert_eq!(store.delete_attributes_of(AttributeOwner::Edge(ab)).unwrap(), 1);
    }

    #[test]
    fn test_unavailable_store_fails_reads_and_writes() {
        let (mut store, graph) = store_with_graph();
        store.set_available(false);

        assert!(matches!(
            store.nodes_in_graph(graph),
            Err(StoreError::Unavailable { .. })
        ));
        assert!(matches!(
            store.create_node(&Node::new(graph, "T", "x")),
            Err(StoreError::Unavailable { .. })
        ));

        store.set_available(true);
        assert!(store.nodes_in_graph(graph).is_ok());
    }

    #[test]
    fn test_injected_failure_leaves_state_untouched() {
        let (mut store, graph) = store_with_graph();
        let a = node(&mut store, graph, "A");
        store.fail_after(StoreOp::DeleteNode, 0);

        assert_eq!(
            store.delete_node(a),
            Err(StoreError::Injected {
                op: StoreOp::DeleteNode
            })
        );
        assert!(store.get_node(a).unwrap().is_some());
        assert!(store.delete_node(a).is_ok());
    }

    #[test]
    fn test_cleared_faults_never_fire() {
        let (mut store, graph) = store_with_graph();
        store.fail_after(StoreOp::CreateNode, 0);
        store.clear_faults();

        let id = node(&mut store, graph, "A");

        assert!(store.get_node(id).unwrap().is_some());
    }
}
