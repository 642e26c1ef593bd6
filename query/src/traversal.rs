//! Breadth-first traversals.
//!
//! Edges are walked in both directions: `A -> B` lets the walk move from A
//! to B and from B to A. Neighbors are visited in the store's edge-listing
//! order.

use onto_core::{EdgeId, NodeId};
use onto_store::EntityStore;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::QueryResult;
use crate::result::Subgraph;

/// Shortest path from `source` to `target`, both ends included.
///
/// Returns `[source]` when both ends are the same existing node, and an
/// empty path when `source` does not exist or `target` is unreachable.
pub fn shortest_path<S: EntityStore + ?Sized>(
    store: &S,
    source: NodeId,
    target: NodeId,
) -> QueryResult<Vec<NodeId>> {
    if store.get_node(source)?.is_none() {
        return Ok(Vec::new());
    }
    if source == target {
        return Ok(vec![source]);
    }

    let mut queue = VecDeque::from([source]);
    let mut visited = HashSet::from([source]);
    let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
    let mut found = false;

    while let Some(current) = queue.pop_front() {
        if current == target {
            found = true;
            break;
        }

        for edge in store.edges_of_node(current)? {
            let Some(neighbor) = edge.other_end(current) else {
                continue;
            };
            if visited.insert(neighbor) {
                parents.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    if !found {
        return Ok(Vec::new());
    }

    let mut path = vec![target];
    let mut current = target;
    while current != source {
        match parents.get(&current) {
            Some(&parent) => {
                path.push(parent);
                current = parent;
            }
            None => return Ok(Vec::new()),
        }
    }
    path.reverse();
    Ok(path)
}

/// Everything within `depth` hops of `center`.
///
/// Only edges leaving nodes closer than `depth` are collected, so
/// `depth == 0` yields the center alone. Each edge appears once.
pub fn bounded_subgraph<S: EntityStore + ?Sized>(
    store: &S,
    center: NodeId,
    depth: i32,
) -> QueryResult<Subgraph> {
    if depth < 0 {
        return Ok(Subgraph::default());
    }
    let Some(center_node) = store.get_node(center)? else {
        return Ok(Subgraph::default());
    };

    let mut subgraph = Subgraph {
        nodes: vec![center_node],
        edges: Vec::new(),
    };
    let mut visited = HashSet::from([center]);
    let mut seen_edges: HashSet<EdgeId> = HashSet::new();
    let mut queue = VecDeque::from([(center, 0)]);

    while let Some((current, hops)) = queue.pop_front() {
        if hops >= depth {
            continue;
        }

        for edge in store.edges_of_node(current)? {
            if !seen_edges.insert(edge.id) {
                continue;
            }
            let neighbor = edge.other_end(current);
            subgraph.edges.push(edge);

            let Some(neighbor) = neighbor else {
                continue;
            };
            if visited.insert(neighbor) {
                if let Some(node) = store.get_node(neighbor)? {
                    subgraph.nodes.push(node);
                    queue.push_back((neighbor, hops + 1));
                }
            }
        }
    }

    Ok(subgraph)
}
