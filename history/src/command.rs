//! Reversible commands.

use onto_core::{Edge, EdgeId, Node, NodeId};
use onto_mutation::MutationOutcome;
use onto_store::{EntityStore, StoreError};
use std::fmt;

use crate::remap::{remap_edges, remap_node};

/// Which way a command is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Re-apply the original change (redo).
    Forward,
    /// Revert the change (undo).
    Reverse,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("redo"),
            Direction::Reverse => f.write_str("undo"),
        }
    }
}

/// The kind of a command, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    AddNode,
    DeleteNode,
    UpdateNode,
    AddEdge,
    DeleteEdge,
    UpdateEdge,
}

impl CommandKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::AddNode => "add-node",
            CommandKind::DeleteNode => "delete-node",
            CommandKind::UpdateNode => "update-node",
            CommandKind::AddEdge => "add-edge",
            CommandKind::DeleteEdge => "delete-edge",
            CommandKind::UpdateEdge => "update-edge",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A store-assigned identity that replaced an older one when a snapshot
/// was re-inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdChange {
    Node { old: NodeId, new: NodeId },
    Edge { old: EdgeId, new: EdgeId },
}

/// A committed structural change plus the snapshots needed to reverse it.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddNode(Node),
    /// A node and every relationship removed with it.
    DeleteNode { node: Node, edges: Vec<Edge> },
    UpdateNode { old: Node, new: Node },
    AddEdge(Edge),
    DeleteEdge(Edge),
    UpdateEdge { old: Edge, new: Edge },
}

/// A replay that stopped part way.
#[derive(Debug)]
pub(crate) struct ApplyFailure {
    pub error: StoreError,
    /// Identity changes that happened before the failure.
    pub changes: Vec<IdChange>,
    /// True if the store was modified before the failure.
    pub progressed: bool,
}

impl From<MutationOutcome> for Command {
    fn from(outcome: MutationOutcome) -> Self {
        match outcome {
            MutationOutcome::NodeAdded(node) => Command::AddNode(node),
            MutationOutcome::NodeDeleted(deleted) => Command::DeleteNode {
                node: deleted.node,
                edges: deleted.edges,
            },
            MutationOutcome::NodeUpdated { old, new } => Command::UpdateNode { old, new },
            MutationOutcome::EdgeAdded(edge) => Command::AddEdge(edge),
            MutationOutcome::EdgeDeleted(edge) => Command::DeleteEdge(edge),
            MutationOutcome::EdgeUpdated { old, new } => Command::UpdateEdge { old, new },
        }
    }
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::AddNode(_) => CommandKind::AddNode,
            Command::DeleteNode { .. } => CommandKind::DeleteNode,
            Command::UpdateNode { .. } => CommandKind::UpdateNode,
            Command::AddEdge(_) => CommandKind::AddEdge,
            Command::DeleteEdge(_) => CommandKind::DeleteEdge,
            Command::UpdateEdge { .. } => CommandKind::UpdateEdge,
        }
    }

    /// Replay this command against the store.
    ///
    /// | Kind       | Forward                        | Reverse |
    /// |------------|--------------------------------|---------|
    /// | AddNode    | insert node                    | delete node |
    /// | DeleteNode | delete edges, then node        | insert node, remap, insert edges |
    /// | UpdateNode | write `new`                    | write `old` |
    /// | AddEdge    | insert edge                    | delete edge |
    /// | DeleteEdge | delete edge                    | insert edge |
    /// | UpdateEdge | write `new`                    | write `old` |
    ///
    /// Every insert yields a fresh identity. The command rewrites its own
    /// snapshots to it and returns the change so the caller can rewrite the
    /// rest of history.
    pub(crate) fn apply<S: EntityStore + ?Sized>(
        &mut self,
        store: &mut S,
        direction: Direction,
    ) -> Result<Vec<IdChange>, ApplyFailure> {
        let mut changes = Vec::new();
        let mut progressed = false;
        let result = self.apply_steps(store, direction, &mut changes, &mut progressed);

        match result {
            Ok(()) => Ok(changes),
            Err(error) => Err(ApplyFailure {
                error,
                changes,
                progressed,
            }),
        }
    }

    fn apply_steps<S: EntityStore + ?Sized>(
        &mut self,
        store: &mut S,
        direction: Direction,
        changes: &mut Vec<IdChange>,
        progressed: &mut bool,
    ) -> Result<(), StoreError> {
        use Direction::{Forward, Reverse};

        match (self, direction) {
            (Command::AddNode(node), Forward) => {
                changes.push(insert_node(store, node)?);
            }
            (Command::AddNode(node), Reverse) => {
                store.delete_node(node.id)?;
            }

            (Command::DeleteNode { node, edges }, Forward) => {
                for edge in edges.iter() {
                    store.delete_edge(edge.id)?;
                    *progressed = true;
                }
                store.delete_node(node.id)?;
            }
            (Command::DeleteNode { node, edges }, Reverse) => {
                let old = node.id;
                let change = insert_node(store, node)?;
                *progressed = true;
                changes.push(change);

                *edges = remap_edges(old, node.id, edges);
                for edge in edges.iter_mut() {
                    changes.push(insert_edge(store, edge)?);
                }
            }

            (Command::UpdateNode { new, .. }, Forward) => store.update_node(new)?,
            (Command::UpdateNode { old, .. }, Reverse) => store.update_node(old)?,

            (Command::AddEdge(edge), Forward) | (Command::DeleteEdge(edge), Reverse) => {
                changes.push(insert_edge(store, edge)?);
            }
            (Command::AddEdge(edge), Reverse) | (Command::DeleteEdge(edge), Forward) => {
                store.delete_edge(edge.id)?;
            }

            (Command::UpdateEdge { new, .. }, Forward) => store.update_edge(new)?,
            (Command::UpdateEdge { old, .. }, Reverse) => store.update_edge(old)?,
        }

        Ok(())
    }

    /// Rewrite every reference to a replaced identity in this command's
    /// snapshots.
    pub fn remap(&mut self, change: IdChange) {
        match change {
            IdChange::Node { old, new } => self.remap_node_refs(old, new),
            IdChange::Edge { old, new } => self.remap_edge_refs(old, new),
        }
    }

    fn remap_node_refs(&mut self, old: NodeId, new: NodeId) {
        let fix_node = |node: &mut Node| node.id = remap_node(node.id, old, new);
        let fix_edge = |edge: &mut Edge| {
            edge.source = remap_node(edge.source, old, new);
            edge.target = remap_node(edge.target, old, new);
        };

        match self {
            Command::AddNode(node) => fix_node(node),
            Command::DeleteNode { node, edges } => {
                fix_node(node);
                *edges = remap_edges(old, new, edges);
            }
            Command::UpdateNode { old: before, new: after } => {
                fix_node(before);
                fix_node(after);
            }
            Command::AddEdge(edge) | Command::DeleteEdge(edge) => fix_edge(edge),
            Command::UpdateEdge { old: before, new: after } => {
                fix_edge(before);
                fix_edge(after);
            }
        }
    }

    fn remap_edge_refs(&mut self, old: EdgeId, new: EdgeId) {
        let fix = |edge: &mut Edge| {
            if edge.id == old {
                edge.id = new;
            }
        };

        match self {
            Command::AddNode(_) | Command::UpdateNode { .. } => {}
            Command::DeleteNode { edges, .. } => edges.iter_mut().for_each(fix),
            Command::AddEdge(edge) | Command::DeleteEdge(edge) => fix(edge),
            Command::UpdateEdge { old: before, new: after } => {
                fix(before);
                fix(after);
            }
        }
    }
}

fn insert_node<S: EntityStore + ?Sized>(store: &mut S, node: &mut Node) -> Result<IdChange, StoreError> {
    let old = node.id;
    node.id = store.create_node(node)?;
    Ok(IdChange::Node { old, new: node.id })
}

fn insert_edge<S: EntityStore + ?Sized>(store: &mut S, edge: &mut Edge) -> Result<IdChange, StoreError> {
    let old = edge.id;
    edge.id = store.create_edge(edge)?;
    Ok(IdChange::Edge { old, new: edge.id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use onto_core::{GraphId, Ontology};
    use onto_store::{EdgeStore, GraphStore, MemoryStore, NodeStore, StoreOp};
    use pretty_assertions::assert_eq;

    fn seeded() -> (MemoryStore, Node, Node, Node) {
        let mut store = MemoryStore::new();
        let g = store.create_ontology(&Ontology::new("net")).unwrap();
        let mut nodes = ["A", "B", "C"].map(|name| Node::new(g, "Concept", name));
        for node in nodes.iter_mut() {
            node.id = store.create_node(node).unwrap();
        }
        let [a, b, c] = nodes;
        (store, a, b, c)
    }

    fn stored_edge(store: &mut MemoryStore, source: &Node, target: &Node) -> Edge {
        let mut edge = Edge::new(source.graph_id, source.id, target.id, "r");
        edge.id = store.create_edge(&edge).unwrap();
        edge
    }

    #[test]
    fn test_delete_node_reverse_remaps_edges() {
        // GIVEN: A -> B, C -> A, then A is deleted
        let (mut store, a, b, c) = seeded();
        let ab = stored_edge(&mut store, &a, &b);
        let ca = stored_edge(&mut store, &c, &a);
        store.delete_node(a.id).unwrap();
        let mut command = Command::DeleteNode {
            node: a.clone(),
            edges: vec![ab.clone(), ca.clone()],
        };

        // WHEN
        let changes = command.apply(&mut store, Direction::Reverse).unwrap();

        // THEN
        let Command::DeleteNode { node, edges } = &command else {
            unreachable!()
        };
        assert_ne!(node.id, a.id);
        assert_eq!(changes[0], IdChange::Node { old: a.id, new: node.id });
        assert_eq!(changes.len(), 3);
        assert_eq!((edges[0].source, edges[0].target), (node.id, b.id));
        assert_eq!((edges[1].source, edges[1].target), (c.id, node.id));

        let live = store.edges_of_node(node.id).unwrap();
        assert_eq!(live.len(), 2);
        assert!(live.iter().all(|e| !e.touches(a.id)));
    }

    #[test]
    fn test_delete_node_forward_after_reverse_uses_new_ids() {
        let (mut store, a, b, _) = seeded();
        let ab = stored_edge(&mut store, &a, &b);
        store.delete_node(a.id).unwrap();
        let mut command = Command::DeleteNode {
            node: a,
            edges: vec![ab],
        };

        command.apply(&mut store, Direction::Reverse).unwrap();
        command.apply(&mut store, Direction::Forward).unwrap();

        assert_eq!(store.node_count(), 2);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_partial_reverse_reports_progress() {
        // GIVEN
        let (mut store, a, b, c) = seeded();
        let ab = stored_edge(&mut store, &a, &b);
        let ac = stored_edge(&mut store, &a, &c);
        store.delete_node(a.id).unwrap();
        store.fail_after(StoreOp::CreateEdge, 1);
        let mut command = Command::DeleteNode {
            node: a,
            edges: vec![ab, ac],
        };

        // WHEN
        let failure = command.apply(&mut store, Direction::Reverse).unwrap_err();

        // THEN
        assert!(failure.progressed);
        assert_eq!(failure.changes.len(), 2);
        assert!(matches!(failure.error, StoreError::Injected { .. }));
    }

    #[test]
    fn test_add_edge_forward_then_reverse() {
        let (mut store, a, b, _) = seeded();
        let mut command = Command::AddEdge(Edge::new(a.graph_id, a.id, b.id, "r"));

        let changes = command.apply(&mut store, Direction::Forward).unwrap();
        let Command::AddEdge(edge) = &command else {
            unreachable!()
        };
        assert_eq!(changes, vec![IdChange::Edge { old: EdgeId::UNSET, new: edge.id }]);
        assert_eq!(store.edge_count(), 1);

        command.apply(&mut store, Direction::Reverse).unwrap();
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_update_node_switches_snapshots() {
        let (mut store, a, _, _) = seeded();
        let renamed = a.clone().with_description("changed");
        let mut command = Command::UpdateNode {
            old: a.clone(),
            new: renamed.clone(),
        };

        command.apply(&mut store, Direction::Forward).unwrap();
        assert_eq!(store.get_node(a.id).unwrap().unwrap(), renamed);

        command.apply(&mut store, Direction::Reverse).unwrap();
        assert_eq!(store.get_node(a.id).unwrap().unwrap(), a);
    }

    #[test]
    fn test_remap_touches_every_reference() {
        // GIVEN
        let g = GraphId::new(1);
        let (old, new) = (NodeId::new(1), NodeId::new(9));
        let mut add_edge = Command::AddEdge(Edge::new(g, old, NodeId::new(2), "r"));
        let mut update = Command::UpdateEdge {
            old: Edge::new(g, NodeId::new(3), old, "r"),
            new: Edge::new(g, NodeId::new(3), old, "s"),
        };

        // WHEN
        add_edge.remap(IdChange::Node { old, new });
        update.remap(IdChange::Node { old, new });

        // THEN
        assert_eq!(
            add_edge,
            Command::AddEdge(Edge::new(g, new, NodeId::new(2), "r"))
        );
        assert_eq!(
            update,
            Command::UpdateEdge {
                old: Edge::new(g, NodeId::new(3), new, "r"),
                new: Edge::new(g, NodeId::new(3), new, "s"),
            }
        );
    }

    #[test]
    fn test_remap_edge_id() {
        let g = GraphId::new(1);
        let mut edge = Edge::new(g, NodeId::new(1), NodeId::new(2), "r");
        edge.id = EdgeId::new(4);
        let mut command = Command::DeleteEdge(edge.clone());

        command.remap(IdChange::Edge {
            old: EdgeId::new(4),
            new: EdgeId::new(8),
        });

        edge.id = EdgeId::new(8);
        assert_eq!(command, Command::DeleteEdge(edge));
    }
}
