//! Editor session.

use onto_core::{Edge, EdgeId, GraphId, Node, NodeId, Ontology};
use onto_history::{Command, CommandKind, CommandLog, HistoryResult, IdChange};
use onto_mutation::{DeletedNode, EditError, EditResult, MutationExecutor, MutationOutcome};
use onto_query::QueryEngine;
use onto_store::EntityStore;

use crate::config::{ConfigResult, EditorConfig};
use crate::events::{EditorEvent, EditorObserver, Observers, SubscriptionId};

/// An editing session over one store.
pub struct Editor<S: EntityStore> {
    store: S,
    history: CommandLog,
    observers: Observers,
    config: EditorConfig,
}

impl<S: EntityStore> Editor<S> {
    /// Create an editor with default configuration.
    pub fn new(store: S) -> Self {
        Self::build(store, EditorConfig::default())
    }

    /// Create an editor with the given configuration, rejecting settings
    /// that `EditorConfig::validate` refuses.
    pub fn with_config(store: S, config: EditorConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(store, config))
    }

    fn build(store: S, config: EditorConfig) -> Self {
        let history = CommandLog::new()
            .with_limit(config.history_limit)
            .with_policy(config.replay_failure);
        Self {
            store,
            history,
            observers: Observers::default(),
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a mutable reference to the store. Changes made through it bypass
    /// history; undoing commands that touch the same entities afterwards
    /// may fail.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the editor, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Get the command log.
    pub fn history(&self) -> &CommandLog {
        &self.history
    }

    /// A query engine over the current store contents.
    pub fn query(&self) -> QueryEngine<'_, S> {
        QueryEngine::new(&self.store)
    }

    // ==================== Observers ====================

    pub fn subscribe(&mut self, observer: impl EditorObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ==================== Ontologies ====================

    /// Create an ontology. Not recorded in history.
    pub fn create_ontology(&mut self, ontology: &mut Ontology) -> EditResult<GraphId> {
        ontology.id = self.store.create_ontology(ontology)?;
        tracing::debug!(id = %ontology.id, name = %ontology.name, "created ontology");
        Ok(ontology.id)
    }

    /// Delete an ontology with everything in it. History is cleared, since
    /// recorded commands may refer to the removed entities.
    pub fn delete_ontology(&mut self, id: GraphId) -> EditResult<()> {
        self.store.delete_ontology(id)?;
        self.history.clear();
        tracing::debug!(%id, "deleted ontology, history cleared");
        self.observers.emit(&EditorEvent::GraphChanged);
        Ok(())
    }

    // ==================== Mutations ====================

    /// Add a node. On success `node.id` holds the new identity.
    pub fn add_node(&mut self, node: &mut Node) -> EditResult<NodeId> {
        let result = self.executor().add_node(node);
        self.commit("add_node", result)?;
        Ok(node.id)
    }

    /// Delete a node together with every relationship touching it.
    pub fn delete_node(&mut self, id: NodeId) -> EditResult<DeletedNode> {
        let result = self.executor().delete_node(id);
        match self.commit("delete_node", result)? {
            MutationOutcome::NodeDeleted(deleted) => Ok(deleted),
            _ => Err(EditError::node_not_found(id)),
        }
    }

    /// Replace `old` with `new`; both must carry the same identity.
    pub fn update_node(&mut self, old: &Node, new: &Node) -> EditResult<()> {
        let result = self.executor().update_node(old, new);
        self.commit("update_node", result)?;
        Ok(())
    }

    /// Add a relationship. On success `edge.id` holds the new identity.
    pub fn add_relationship(&mut self, edge: &mut Edge) -> EditResult<EdgeId> {
        let result = self.executor().add_edge(edge);
        self.commit("add_relationship", result)?;
        Ok(edge.id)
    }

    /// Delete a relationship, returning its last snapshot.
    pub fn delete_relationship(&mut self, id: EdgeId) -> EditResult<Edge> {
        let result = self.executor().delete_edge(id);
        match self.commit("delete_relationship", result)? {
            MutationOutcome::EdgeDeleted(edge) => Ok(edge),
            _ => Err(EditError::edge_not_found(id)),
        }
    }

    /// Change a relationship's type, weight or properties.
    pub fn update_relationship(&mut self, old: &Edge, new: &Edge) -> EditResult<()> {
        let result = self.executor().update_edge(old, new);
        self.commit("update_relationship", result)?;
        Ok(())
    }

    fn executor(&mut self) -> MutationExecutor<'_, S> {
        MutationExecutor::new(&mut self.store).with_cascade(self.config.cascade)
    }

    /// Record a successful mutation and notify observers, or log the
    /// rejection. Relationships a failed cascade put back under new ids are
    /// still followed by history.
    fn commit(
        &mut self,
        op: &'static str,
        result: EditResult<MutationOutcome>,
    ) -> EditResult<MutationOutcome> {
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(op, kind = ?e.kind(), error = %e, "mutation rejected");
                let restored: Vec<IdChange> = e
                    .restored_edges()
                    .iter()
                    .map(|&(old, new)| IdChange::Edge { old, new })
                    .collect();
                if !restored.is_empty() {
                    self.history.apply_id_changes(&restored);
                }
                return Err(e);
            }
        };

        let event = match &outcome {
            MutationOutcome::NodeAdded(node) => Some(EditorEvent::NodeAdded(node.clone())),
            MutationOutcome::NodeDeleted(deleted) => Some(EditorEvent::NodeDeleted(deleted.node.id)),
            MutationOutcome::EdgeAdded(edge) => Some(EditorEvent::RelationshipAdded(edge.clone())),
            MutationOutcome::EdgeDeleted(edge) => Some(EditorEvent::RelationshipDeleted(edge.id)),
            MutationOutcome::NodeUpdated { .. } | MutationOutcome::EdgeUpdated { .. } => None,
        };

        let id = self.history.record(Command::from(outcome.clone()));
        tracing::debug!(op, command = %id, "mutation committed");

        if let Some(event) = event {
            self.observers.emit(&event);
        }
        self.observers.emit(&EditorEvent::GraphChanged);
        Ok(outcome)
    }

    // ==================== History ====================

    /// Revert the most recent edit. `Ok(None)` if there is nothing to undo.
    pub fn undo(&mut self) -> HistoryResult<Option<CommandKind>> {
        let result = self.history.undo(&mut self.store);
        self.after_replay(&result);
        result
    }

    /// Re-apply the most recently undone edit. `Ok(None)` if there is
    /// nothing to redo.
    pub fn redo(&mut self) -> HistoryResult<Option<CommandKind>> {
        let result = self.history.redo(&mut self.store);
        self.after_replay(&result);
        result
    }

    /// A failed replay may still have changed the store part way, so
    /// observers hear about it too.
    fn after_replay(&mut self, result: &HistoryResult<Option<CommandKind>>) {
        if !matches!(result, Ok(None)) {
            self.observers.emit(&EditorEvent::GraphChanged);
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Forget all recorded edits.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onto_store::{MemoryStore, NodeStore};
    use std::sync::mpsc;

    fn editor_with_graph() -> (Editor<MemoryStore>, GraphId) {
        let mut editor = Editor::new(MemoryStore::new());
        let graph = editor.create_ontology(&mut Ontology::new("net")).unwrap();
        (editor, graph)
    }

    #[test]
    fn test_mutation_events_end_with_graph_changed() {
        // GIVEN
        let (mut editor, graph) = editor_with_graph();
        let (tx, rx) = mpsc::channel();
        editor.subscribe(tx);

        // WHEN
        let mut a = Node::new(graph, "Concept", "A");
        let mut b = Node::new(graph, "Concept", "B");
        editor.add_node(&mut a).unwrap();
        editor.add_node(&mut b).unwrap();
        let mut ab = Edge::new(graph, a.id, b.id, "r");
        editor.add_relationship(&mut ab).unwrap();
        editor.delete_node(a.id).unwrap();

        // THEN
        let events: Vec<EditorEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                EditorEvent::NodeAdded(a.clone()),
                EditorEvent::GraphChanged,
                EditorEvent::NodeAdded(b),
                EditorEvent::GraphChanged,
                EditorEvent::RelationshipAdded(ab),
                EditorEvent::GraphChanged,
                EditorEvent::NodeDeleted(a.id),
                EditorEvent::GraphChanged,
            ]
        );
    }

    #[test]
    fn test_rejected_mutation_emits_nothing_and_records_nothing() {
        let (mut editor, graph) = editor_with_graph();
        let (tx, rx) = mpsc::channel();
        editor.subscribe(tx);

        let result = editor.add_node(&mut Node::new(graph, "Concept", ""));

        assert!(result.is_err());
        assert!(!editor.can_undo());
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn test_undo_redo_emit_graph_changed_only_when_replaying() {
        // GIVEN
        let (mut editor, graph) = editor_with_graph();
        editor.add_node(&mut Node::new(graph, "Concept", "A")).unwrap();
        let (tx, rx) = mpsc::channel();
        editor.subscribe(tx);

        // WHEN
        editor.undo().unwrap();
        editor.undo().unwrap();
        editor.redo().unwrap();

        // THEN
        let events: Vec<EditorEvent> = rx.try_iter().collect();
        assert_eq!(events, vec![EditorEvent::GraphChanged, EditorEvent::GraphChanged]);
    }

    #[test]
    fn test_unsubscribed_observer_hears_nothing() {
        let (mut editor, graph) = editor_with_graph();
        let (tx, rx) = mpsc::channel();
        let id = editor.subscribe(tx);
        assert!(editor.unsubscribe(id));

        editor.add_node(&mut Node::new(graph, "Concept", "A")).unwrap();

        assert_eq!(rx.try_iter().count(), 0);
        assert_eq!(editor.observer_count(), 0);
    }

    #[test]
    fn test_delete_ontology_clears_history() {
        let (mut editor, graph) = editor_with_graph();
        editor.add_node(&mut Node::new(graph, "Concept", "A")).unwrap();

        editor.delete_ontology(graph).unwrap();

        assert!(!editor.can_undo());
        assert!(editor.query().get_all_nodes(graph).unwrap().is_empty());
    }

    #[test]
    fn test_into_store_keeps_committed_edits() {
        let (mut editor, graph) = editor_with_graph();
        let mut node = Node::new(graph, "Concept", "A");
        editor.add_node(&mut node).unwrap();

        let store = editor.into_store();

        assert_eq!(store.node_count(), 1);
        assert!(store.get_node(node.id).unwrap().is_some());
    }
}
