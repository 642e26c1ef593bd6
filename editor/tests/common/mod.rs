//! Shared fixtures for editor integration tests.

#![allow(dead_code)]

use onto_core::{Edge, EdgeId, GraphId, Node, NodeId, Ontology};
use onto_editor::{Editor, EditorConfig};
use onto_store::MemoryStore;

pub struct Session {
    pub editor: Editor<MemoryStore>,
    pub graph: GraphId,
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        let mut editor = Editor::with_config(MemoryStore::new(), config).unwrap();
        let graph = editor
            .create_ontology(&mut Ontology::new("network").with_description("test ontology"))
            .unwrap();
        Self { editor, graph }
    }

    pub fn node(&mut self, name: &str) -> Node {
        let mut node = Node::new(self.graph, "Concept", name).with_description(format!("{} node", name));
        self.editor.add_node(&mut node).unwrap();
        node
    }

    pub fn link(&mut self, source: &Node, target: &Node) -> Edge {
        let mut edge = Edge::new(self.graph, source.id, target.id, "related_to");
        self.editor.add_relationship(&mut edge).unwrap();
        edge
    }

    pub fn nodes(&self) -> Vec<Node> {
        self.editor.query().get_all_nodes(self.graph).unwrap()
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.editor.query().get_all_edges(self.graph).unwrap()
    }

    pub fn edges_of(&self, id: NodeId) -> Vec<EdgeId> {
        self.editor
            .query()
            .get_edges_of_node(id)
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.nodes().into_iter().map(|n| n.name).collect()
    }

    pub fn find(&self, name: &str) -> Node {
        self.nodes()
            .into_iter()
            .find(|n| n.name == name)
            .unwrap_or_else(|| panic!("no node named {}", name))
    }
}
