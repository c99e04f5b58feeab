//! Windowed co-occurrence counting
//!
//! A window is `window_size` consecutive sentences; windows start at every
//! position where a full window fits. A pair of entities co-occurs in a
//! window when each of them is mentioned by at least one of its sentences.
//! The count of a pair is the number of such windows.

use tracing::debug;

use lexnet_core::{Checker, Corpus, Edge, Entity, EntityRegistry, Result, Sentence};

fn check_parameters(corpus: &Corpus, window_size: usize, threshold: usize) -> Result<()> {
    let mut checker = Checker::new();
    checker
        .at_least("window_size", window_size, 1)
        .at_least("threshold", threshold, 1)
        .at_most("window_size", window_size, corpus.len(), "corpus length");
    checker.finish()
}

fn mentioned_in_window(entity: &Entity, window: &[Sentence]) -> bool {
    window.iter().any(|sentence| entity.is_mentioned_in(sentence))
}

/// Co-occurrence count of every unordered entity pair, sorted by edge.
///
/// Pairs that never co-occur are reported with a count of zero.
pub fn cooccurrence_counts(
    corpus: &Corpus,
    registry: &EntityRegistry,
    window_size: usize,
) -> Result<Vec<(Edge, usize)>> {
    check_parameters(corpus, window_size, 1)?;

    let entities = registry.entities();
    let mut pairs: Vec<(&Entity, &Entity, usize)> = Vec::new();
    for (i, a) in entities.iter().enumerate() {
        for b in &entities[i + 1..] {
            pairs.push((a, b, 0));
        }
    }

    let mut windows = 0usize;
    for window in corpus.windows(window_size) {
        windows += 1;
        for (a, b, count) in pairs.iter_mut() {
            if mentioned_in_window(a, window) && mentioned_in_window(b, window) {
                *count += 1;
            }
        }
    }

    let mut counts = pairs
        .into_iter()
        .map(|(a, b, count)| Ok((Edge::new(a.name(), b.name())?, count)))
        .collect::<Result<Vec<_>>>()?;
    counts.sort();

    debug!(
        entities = entities.len(),
        pairs = counts.len(),
        windows,
        window_size,
        "Counted co-occurrences"
    );
    Ok(counts)
}

/// Edges between every pair co-occurring in at least `threshold` windows.
///
/// `window_size` and `threshold` must be positive and `window_size` may not
/// exceed the number of sentences. Edges come out sorted.
pub fn build_edges(
    corpus: &Corpus,
    registry: &EntityRegistry,
    window_size: usize,
    threshold: usize,
) -> Result<Vec<Edge>> {
    check_parameters(corpus, window_size, threshold)?;

    Ok(cooccurrence_counts(corpus, registry, window_size)?
        .into_iter()
        .filter(|(_, count)| *count >= threshold)
        .map(|(edge, _)| edge)
        .collect())
}
