//! Mention location
//!
//! An entity is mentioned by a sentence when any token of its canonical name
//! or of one of its aliases appears in the sentence as a whole token.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use lexnet_core::{Corpus, EntityRegistry, Sentence, Token};

/// Distinct sentences mentioning one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMentions {
    /// Canonical name joined into one string
    pub name: String,
    /// Sorted, deduplicated by value
    pub sentences: Vec<Sentence>,
}

/// Token runs found around one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "(String, Vec<Vec<Token>>)")]
pub struct EntityContext {
    pub name: String,
    /// Sorted lexicographically by token sequence
    pub sequences: Vec<Vec<Token>>,
}

impl From<EntityContext> for (String, Vec<Vec<Token>>) {
    fn from(c: EntityContext) -> Self {
        (c.name, c.sequences)
    }
}

/// Number of mention tokens of one entity across the corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "(String, usize)")]
pub struct MentionCount {
    pub name: String,
    pub count: usize,
}

impl From<MentionCount> for (String, usize) {
    fn from(c: MentionCount) -> Self {
        (c.name, c.count)
    }
}

/// Sentences mentioning each entity.
///
/// Entities mentioned nowhere are dropped; the rest are ordered by name.
pub fn mentions_by_entity(corpus: &Corpus, registry: &EntityRegistry) -> Vec<EntityMentions> {
    let mut mentions: Vec<EntityMentions> = registry
        .iter()
        .filter_map(|entity| {
            let sentences: BTreeSet<&Sentence> = corpus
                .iter()
                .filter(|sentence| entity.is_mentioned_in(sentence))
                .collect();

            (!sentences.is_empty()).then(|| EntityMentions {
                name: entity.name(),
                sentences: sentences.into_iter().cloned().collect(),
            })
        })
        .collect();

    mentions.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(
        entities = registry.len(),
        mentioned = mentions.len(),
        "Located entity mentions"
    );
    mentions
}

/// Distinct token runs of length `1..=max_length` in each entity's
/// sentences.
///
/// A `max_length` of zero requests no context and yields nothing.
pub fn context_sequences(mentions: &[EntityMentions], max_length: usize) -> Vec<EntityContext> {
    if max_length == 0 {
        return Vec::new();
    }

    let mut contexts: Vec<EntityContext> = mentions
        .iter()
        .map(|m| {
            let sequences: BTreeSet<&[Token]> = m
                .sentences
                .iter()
                .flat_map(|s| s.runs(Some(max_length)))
                .collect();

            EntityContext {
                name: m.name.clone(),
                sequences: sequences.into_iter().map(<[Token]>::to_vec).collect(),
            }
        })
        .collect();

    contexts.sort_by(|a, b| a.name.cmp(&b.name));
    contexts
}

/// Count mention tokens per entity across every sentence.
///
/// Zero counts are dropped; the rest are ordered by name.
pub fn mention_counts(corpus: &Corpus, registry: &EntityRegistry) -> Vec<MentionCount> {
    let mut counts: Vec<MentionCount> = registry
        .iter()
        .map(|entity| MentionCount {
            name: entity.name(),
            count: corpus.iter().map(|s| entity.mention_count(s)).sum(),
        })
        .filter(|c| c.count > 0)
        .collect();

    counts.sort_by(|a, b| a.name.cmp(&b.name));
    counts
}
