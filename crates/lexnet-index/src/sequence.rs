//! Sequence index
//!
//! Maps the key of every contiguous token run (up to an optional maximum
//! length) to the distinct sentences containing it. Sentences are stored once
//! in sorted order and buckets refer to them by position, so bucket contents
//! come out sorted and independent of corpus order.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use lexnet_core::{sequence_key, Corpus, Sentence, Token};

// ============================================================================
// Index
// ============================================================================

/// Inverted index from sequence keys to sentences
#[derive(Debug, Clone, Default)]
pub struct SequenceIndex {
    /// Distinct sentences, sorted
    sentences: Vec<Sentence>,
    /// Sequence key -> positions in `sentences`, ascending
    buckets: HashMap<String, Vec<usize>>,
    max_length: Option<usize>,
}

impl SequenceIndex {
    /// Build the index.
    ///
    /// Runs of length `1..=min(max_length, sentence length)` are indexed;
    /// `None` indexes runs of every length. `Some(0)` builds an empty index.
    pub fn build(corpus: &Corpus, max_length: Option<usize>) -> Self {
        let mut sentences: Vec<Sentence> = corpus.iter().cloned().collect();
        sentences.sort();
        sentences.dedup();

        let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, sentence) in sentences.iter().enumerate() {
            for run in sentence.runs(max_length) {
                let bucket = buckets.entry(sequence_key(run)).or_default();
                // a sentence repeating a run still appears once
                if bucket.last() != Some(&position) {
                    bucket.push(position);
                }
            }
        }

        debug!(
            sentences = sentences.len(),
            keys = buckets.len(),
            max_length = ?max_length,
            "Built sequence index"
        );

        Self {
            sentences,
            buckets,
            max_length,
        }
    }

    /// Sentences containing the run `key`, sorted; empty when absent
    pub fn lookup(&self, key: &str) -> Vec<&Sentence> {
        self.buckets
            .get(key)
            .map(|positions| positions.iter().map(|&p| &self.sentences[p]).collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.buckets.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Resolve candidate sequences against the index.
    ///
    /// Candidates are deduplicated keeping first occurrences; sequences that
    /// occur nowhere are omitted rather than reported with no sentences.
    /// The result is sorted by key.
    pub fn count_known_sequences(&self, candidates: &[Vec<Token>]) -> Vec<SequenceMatch> {
        let mut matches: Vec<SequenceMatch> = dedup_preserving_order(candidates)
            .into_iter()
            .map(sequence_key)
            .filter_map(|key| {
                let sentences: Vec<Sentence> = self.lookup(&key).into_iter().cloned().collect();
                (!sentences.is_empty()).then_some(SequenceMatch { key, sentences })
            })
            .collect();

        matches.sort_by(|a, b| a.key.cmp(&b.key));
        matches
    }
}

/// Keep the first occurrence of every candidate, in order
pub fn dedup_preserving_order(candidates: &[Vec<Token>]) -> Vec<&[Token]> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for candidate in candidates {
        if seen.insert(candidate.as_slice()) {
            unique.push(candidate.as_slice());
        }
    }
    unique
}

/// A known sequence with the sentences containing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "(String, Vec<Sentence>)")]
pub struct SequenceMatch {
    pub key: String,
    pub sentences: Vec<Sentence>,
}

impl From<SequenceMatch> for (String, Vec<Sentence>) {
    fn from(m: SequenceMatch) -> Self {
        (m.key, m.sentences)
    }
}

// ============================================================================
// Run counting
// ============================================================================

/// Occurrence counts of every run of one length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "(String, Vec<(String, usize)>)")]
pub struct SequenceCounts {
    pub length: usize,
    /// `(key, occurrences)` sorted by key
    pub counts: Vec<(String, usize)>,
}

impl From<SequenceCounts> for (String, Vec<(String, usize)>) {
    fn from(c: SequenceCounts) -> Self {
        (format!("{}_seq", c.length), c.counts)
    }
}

/// Count occurrences of every run of length `1..=max_k` across the corpus.
///
/// Every occurrence counts, including repeats within one sentence.
pub fn sequence_counts(corpus: &Corpus, max_k: usize) -> Vec<SequenceCounts> {
    (1..=max_k)
        .map(|length| {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for sentence in corpus {
                for run in sentence.tokens().windows(length) {
                    *counts.entry(sequence_key(run)).or_default() += 1;
                }
            }
            SequenceCounts {
                length,
                counts: counts.into_iter().collect(),
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(lines: &[&str]) -> Corpus {
        lines
            .iter()
            .map(|l| Sentence::from_text(l).unwrap())
            .collect()
    }

    fn keys(index: &SequenceIndex, key: &str) -> Vec<String> {
        index.lookup(key).into_iter().map(Sentence::key).collect()
    }

    fn tokens(text: &str) -> Vec<Token> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_contiguous_runs_only() {
        let index = SequenceIndex::build(&corpus(&["a b a"]), Some(2));

        for key in ["a", "b", "a b", "b a"] {
            assert_eq!(keys(&index, key), vec!["a b a"], "key {key}");
        }
        assert!(!index.contains("a a"));
        assert!(!index.contains("a b a"));
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_buckets_sorted_and_deduplicated() {
        let index = SequenceIndex::build(&corpus(&["c a", "a b", "c a", "a"]), None);
        assert_eq!(keys(&index, "a"), vec!["a", "a b", "c a"]);
    }

    #[test]
    fn test_zero_max_length_builds_empty_index() {
        let index = SequenceIndex::build(&corpus(&["a b"]), Some(0));
        assert!(index.is_empty());
        assert!(index.lookup("a").is_empty());
    }

    #[test]
    fn test_count_known_sequences() {
        let index = SequenceIndex::build(&corpus(&["harry met ron", "ron met harry"]), None);
        let candidates = vec![
            tokens("ron met"),
            tokens("harry"),
            tokens("hermione"),
            tokens("ron met"),
        ];

        let matches = index.count_known_sequences(&candidates);
        let found: Vec<&str> = matches.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(found, vec!["harry", "ron met"]);
        assert_eq!(matches[0].sentences.len(), 2);
        assert_eq!(matches[1].sentences[0].key(), "ron met harry");
    }

    #[test]
    fn test_empty_candidates_yield_nothing() {
        let index = SequenceIndex::build(&corpus(&["a b"]), None);
        assert!(index.count_known_sequences(&[]).is_empty());
        assert_eq!(index.count_known_sequences(&[tokens("b")]).len(), 1);
    }

    #[test]
    fn test_dedup_preserving_order() {
        let candidates = vec![tokens("b"), tokens("a"), tokens("b"), tokens("a c")];
        let unique: Vec<String> = dedup_preserving_order(&candidates)
            .into_iter()
            .map(sequence_key)
            .collect();
        assert_eq!(unique, vec!["b", "a", "a c"]);
    }

    #[test]
    fn test_sequence_counts() {
        let counts = sequence_counts(&corpus(&["a b a", "b"]), 3);
        assert_eq!(counts.len(), 3);
        assert_eq!(
            counts[0].counts,
            vec![("a".to_string(), 2), ("b".to_string(), 2)]
        );
        assert_eq!(
            counts[1].counts,
            vec![("a b".to_string(), 1), ("b a".to_string(), 1)]
        );
        assert_eq!(counts[2].counts, vec![("a b a".to_string(), 1)]);
    }

    #[test]
    fn test_match_wire_format() {
        let m = SequenceMatch {
            key: "a".to_string(),
            sentences: vec![Sentence::from_text("a b").unwrap()],
        };
        assert_eq!(
            serde_json::to_value(&m).unwrap(),
            serde_json::json!(["a", [["a", "b"]]])
        );

        let c = SequenceCounts {
            length: 2,
            counts: vec![("a b".to_string(), 3)],
        };
        assert_eq!(
            serde_json::to_value(&c).unwrap(),
            serde_json::json!(["2_seq", [["a b", 3]]])
        );
    }
}
