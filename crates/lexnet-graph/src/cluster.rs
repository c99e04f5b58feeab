//! Vocabulary clustering
//!
//! Sentences are nodes, identified by corpus position. Two sentences are
//! joined when they share at least `threshold` distinct tokens, and clusters
//! are the connected components of that graph. Isolated sentences form
//! singleton clusters.

use std::collections::HashSet;

use petgraph::graph::UnGraph;
use petgraph::visit::{Dfs, VisitMap};
use serde::Serialize;
use tracing::debug;

use lexnet_core::{Corpus, Sentence};

/// Sentence overlap graph; node weights are corpus positions
#[derive(Debug, Clone)]
pub struct OverlapGraph {
    graph: UnGraph<usize, usize>,
}

impl OverlapGraph {
    /// Join every pair of sentences sharing at least `threshold` distinct
    /// tokens. A threshold of zero joins every pair.
    pub fn build(corpus: &Corpus, threshold: usize) -> Self {
        let vocabularies: Vec<HashSet<&str>> =
            corpus.iter().map(Sentence::distinct_tokens).collect();

        let mut graph: UnGraph<usize, usize> = UnGraph::with_capacity(corpus.len(), 0);
        let nodes: Vec<_> = (0..corpus.len()).map(|i| graph.add_node(i)).collect();

        for i in 0..vocabularies.len() {
            for j in i + 1..vocabularies.len() {
                let shared = vocabularies[i].intersection(&vocabularies[j]).count();
                if shared >= threshold {
                    graph.add_edge(nodes[i], nodes[j], shared);
                }
            }
        }

        debug!(
            sentences = graph.node_count(),
            edges = graph.edge_count(),
            threshold,
            "Built overlap graph"
        );
        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Connected components as ascending corpus positions, in order of
    /// their smallest position. Every position appears exactly once.
    pub fn components(&self) -> Vec<Vec<usize>> {
        let graph = &self.graph;
        let mut dfs = Dfs::empty(graph);
        let mut components = Vec::new();

        for start in graph.node_indices() {
            if dfs.discovered.is_visited(&start) {
                continue;
            }
            dfs.move_to(start);

            let mut members = Vec::new();
            while let Some(node) = dfs.next(graph) {
                members.push(graph[node]);
            }
            members.sort_unstable();
            components.push(members);
        }

        components
    }
}

/// A numbered group of sentences; serialized as `["Group N", [sentence, ...]]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "(String, Vec<Sentence>)")]
pub struct Cluster {
    pub number: usize,
    pub sentences: Vec<Sentence>,
}

impl From<Cluster> for (String, Vec<Sentence>) {
    fn from(c: Cluster) -> Self {
        (format!("Group {}", c.number), c.sentences)
    }
}

/// Cluster the corpus by shared vocabulary.
///
/// Sentences inside a cluster are sorted; clusters are ordered by size,
/// then by content, and numbered from 1.
pub fn cluster_sentences(corpus: &Corpus, threshold: usize) -> Vec<Cluster> {
    let overlap = OverlapGraph::build(corpus, threshold);

    let mut groups: Vec<Vec<Sentence>> = overlap
        .components()
        .into_iter()
        .map(|members| {
            let mut sentences: Vec<Sentence> = members
                .into_iter()
                .filter_map(|i| corpus.get(i).cloned())
                .collect();
            sentences.sort();
            sentences
        })
        .collect();
    groups.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    groups
        .into_iter()
        .enumerate()
        .map(|(i, sentences)| Cluster {
            number: i + 1,
            sentences,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(lines: &[&str]) -> Corpus {
        lines
            .iter()
            .map(|l| Sentence::from_text(l).unwrap())
            .collect()
    }

    #[test]
    fn test_shared_token_example() {
        let corpus = corpus(&["a b c", "c d", "e"]);

        let overlap = OverlapGraph::build(&corpus, 1);
        assert_eq!(overlap.components(), vec![vec![0, 1], vec![2]]);

        let clusters = cluster_sentences(&corpus, 1);
        assert_eq!(
            serde_json::to_value(&clusters).unwrap(),
            serde_json::json!([
                ["Group 1", [["e"]]],
                ["Group 2", [["a", "b", "c"], ["c", "d"]]]
            ])
        );
    }

    #[test]
    fn test_transitive_membership() {
        // 0 and 2 share nothing but both overlap with 1
        let corpus = corpus(&["a b", "b c", "c d", "x y"]);
        assert_eq!(
            OverlapGraph::build(&corpus, 1).components(),
            vec![vec![0, 1, 2], vec![3]]
        );
    }

    #[test]
    fn test_distinct_tokens_only() {
        // "a a" shares one distinct token with "a b"
        let corpus = corpus(&["a a", "a b"]);
        assert_eq!(OverlapGraph::build(&corpus, 2).edge_count(), 0);
        assert_eq!(OverlapGraph::build(&corpus, 1).edge_count(), 1);
    }

    #[test]
    fn test_zero_threshold_joins_everything() {
        let corpus = corpus(&["a", "b", "c"]);
        assert_eq!(OverlapGraph::build(&corpus, 0).components(), vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_duplicate_sentences_stay_separate_nodes() {
        let corpus = corpus(&["a", "a", "b"]);
        let clusters = cluster_sentences(&corpus, 1);

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].sentences, vec![Sentence::from_text("b").unwrap()]);
        assert_eq!(clusters[1].sentences.len(), 2);
        assert_eq!(clusters[1].number, 2);
    }

    #[test]
    fn test_empty_corpus() {
        assert!(cluster_sentences(&Corpus::default(), 1).is_empty());
    }
}
