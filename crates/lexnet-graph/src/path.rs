//! Fixed-length simple paths
//!
//! Path length counts nodes: a path of length 1 is a single node and a
//! single edge is a path of length 2. Shortest-path search cannot tell
//! whether a longer simple path exists, so this is an exhaustive search over
//! simple paths driven by an explicit stack.

use petgraph::graph::NodeIndex;

use crate::EntityGraph;

/// Check for a simple path of exactly `length` nodes from `source` to
/// `target`.
///
/// Names absent from the graph yield false, as does a length of zero or a
/// length larger than the number of nodes.
pub fn has_path_of_length(graph: &EntityGraph, source: &str, target: &str, length: usize) -> bool {
    let (Some(source), Some(target)) = (graph.node(source), graph.node(target)) else {
        return false;
    };
    if length == 0 || length > graph.node_count() {
        return false;
    }
    if length == 1 {
        return source == target;
    }

    let inner = graph.inner();
    let neighbors = |node: NodeIndex| inner.neighbors(node).collect::<Vec<_>>();

    let mut on_path = vec![false; inner.node_count()];
    let mut path = vec![source];
    // one frame per path node: neighbors still to try from it
    let mut stack = vec![neighbors(source)];
    on_path[source.index()] = true;

    loop {
        let candidate = match stack.last_mut() {
            Some(frame) => frame.pop(),
            None => break,
        };

        let Some(next) = candidate else {
            stack.pop();
            if let Some(done) = path.pop() {
                on_path[done.index()] = false;
            }
            continue;
        };

        if on_path[next.index()] {
            continue;
        }
        if path.len() + 1 == length {
            if next == target {
                return true;
            }
            continue;
        }
        // arriving early would force a revisit of the target
        if next == target {
            continue;
        }

        on_path[next.index()] = true;
        path.push(next);
        stack.push(neighbors(next));
    }

    false
}
