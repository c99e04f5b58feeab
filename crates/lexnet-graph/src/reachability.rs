//! Hop-bounded reachability

use std::collections::VecDeque;

use petgraph::visit::{VisitMap, Visitable};

use crate::EntityGraph;

/// Check whether `target` can be reached from `source` in at most
/// `max_distance` hops.
///
/// A node is marked on first enqueue and nodes at `max_distance` are not
/// expanded. A name absent from the graph is never reachable, and a present
/// node always reaches itself.
pub fn is_reachable(graph: &EntityGraph, source: &str, target: &str, max_distance: usize) -> bool {
    let (Some(source), Some(target)) = (graph.node(source), graph.node(target)) else {
        return false;
    };
    if source == target {
        return true;
    }

    let inner = graph.inner();
    let mut visited = inner.visit_map();
    let mut queue = VecDeque::new();

    visited.visit(source);
    queue.push_back((source, 0usize));

    while let Some((current, distance)) = queue.pop_front() {
        if distance == max_distance {
            continue;
        }
        for next in inner.neighbors(current) {
            if next == target {
                return true;
            }
            if visited.visit(next) {
                queue.push_back((next, distance + 1));
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexnet_core::Edge;

    fn chain() -> EntityGraph {
        let edges: Vec<Edge> = [("a", "b"), ("b", "c"), ("c", "d"), ("x", "y")]
            .iter()
            .map(|(a, b)| Edge::new(*a, *b).unwrap())
            .collect();
        EntityGraph::from_edges(&edges)
    }

    #[test]
    fn test_distance_bound() {
        let graph = chain();
        assert!(graph.is_reachable("a", "b", 1));
        assert!(!graph.is_reachable("a", "c", 1));
        assert!(graph.is_reachable("a", "c", 2));
        assert!(graph.is_reachable("a", "d", 3));
        assert!(graph.is_reachable("d", "a", 5));
    }

    #[test]
    fn test_zero_distance() {
        let graph = chain();
        assert!(graph.is_reachable("a", "a", 0));
        assert!(!graph.is_reachable("a", "b", 0));
    }

    #[test]
    fn test_disconnected_and_absent() {
        let graph = chain();
        assert!(!graph.is_reachable("a", "y", 10));
        assert!(!graph.is_reachable("a", "nobody", 10));
        assert!(!graph.is_reachable("nobody", "nobody", 10));
    }
}
