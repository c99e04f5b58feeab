//! lexnet Graph - Entity graphs and sentence clustering
//!
//! Graphs are built once and then queried read-only:
//!
//! - [`cooccurrence`]: windowed co-occurrence counting into an edge list
//! - [`EntityGraph`]: immutable arena over an edge list, indexed by name
//! - [`reachability`] and [`path`]: per-pair boolean queries on that arena
//! - [`cluster`]: connected components of the sentence overlap graph

pub mod cluster;
pub mod cooccurrence;
pub mod path;
pub mod query;
pub mod reachability;

pub use cluster::{cluster_sentences, Cluster, OverlapGraph};
pub use cooccurrence::{build_edges, cooccurrence_counts};
pub use path::has_path_of_length;
pub use query::{answer_pairs, PairAnswer, PairQuery};
pub use reachability::is_reachable;

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::debug;

use lexnet_core::{Corpus, Edge, EntityRegistry, Result};

/// Undirected simple graph over entity names.
///
/// Nodes are exactly the names appearing in the edges it was built from.
#[derive(Debug, Clone, Default)]
pub struct EntityGraph {
    graph: UnGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl EntityGraph {
    /// Build from an edge list; repeated edges collapse into one
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> Self {
        let mut graph = UnGraph::default();
        let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

        for edge in edges {
            let (a, b) = edge.endpoints();
            let a = *nodes
                .entry(a.to_string())
                .or_insert_with(|| graph.add_node(a.to_string()));
            let b = *nodes
                .entry(b.to_string())
                .or_insert_with(|| graph.add_node(b.to_string()));
            graph.update_edge(a, b, ());
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built entity graph"
        );
        Self { graph, nodes }
    }

    /// Count co-occurrences over the corpus and build the graph of the
    /// resulting edges
    pub fn from_corpus(
        corpus: &Corpus,
        registry: &EntityRegistry,
        window_size: usize,
        threshold: usize,
    ) -> Result<Self> {
        let edges = build_edges(corpus, registry, window_size, threshold)?;
        Ok(Self::from_edges(&edges))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn node(&self, name: &str) -> Option<NodeIndex> {
        self.nodes.get(name).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Access the underlying petgraph graph
    pub fn inner(&self) -> &UnGraph<String, ()> {
        &self.graph
    }

    /// See [`reachability::is_reachable`]
    pub fn is_reachable(&self, source: &str, target: &str, max_distance: usize) -> bool {
        is_reachable(self, source, target, max_distance)
    }

    /// See [`path::has_path_of_length`]
    pub fn has_path_of_length(&self, source: &str, target: &str, length: usize) -> bool {
        has_path_of_length(self, source, target, length)
    }
}
