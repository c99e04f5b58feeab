//! Batched pair queries against a built [`EntityGraph`]

use serde::Serialize;
use tracing::debug;

use crate::EntityGraph;

/// Boolean question asked about each pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairQuery {
    /// Connected within `max_distance` hops
    Reachable { max_distance: usize },
    /// Joined by a simple path of exactly `length` nodes
    ExactPath { length: usize },
}

impl PairQuery {
    pub fn ask(&self, graph: &EntityGraph, a: &str, b: &str) -> bool {
        match *self {
            Self::Reachable { max_distance } => graph.is_reachable(a, b, max_distance),
            Self::ExactPath { length } => graph.has_path_of_length(a, b, length),
        }
    }
}

/// Answer for one pair; serialized as `[first, second, answer]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "(String, String, bool)")]
pub struct PairAnswer {
    pub first: String,
    pub second: String,
    pub answer: bool,
}

impl From<PairAnswer> for (String, String, bool) {
    fn from(p: PairAnswer) -> Self {
        (p.first, p.second, p.answer)
    }
}

/// Answer every pair against the same graph.
///
/// Names missing from the graph get `false` without affecting other pairs.
/// Each pair's names are sorted and the answers come out sorted.
pub fn answer_pairs(graph: &EntityGraph, pairs: &[(String, String)], query: PairQuery) -> Vec<PairAnswer> {
    let mut answers: Vec<PairAnswer> = pairs
        .iter()
        .map(|(a, b)| {
            let (first, second) = if a <= b { (a, b) } else { (b, a) };
            PairAnswer {
                first: first.clone(),
                second: second.clone(),
                answer: query.ask(graph, first, second),
            }
        })
        .collect();
    answers.sort();

    debug!(
        pairs = answers.len(),
        connected = answers.iter().filter(|p| p.answer).count(),
        query = ?query,
        "Answered pair queries"
    );
    answers
}
