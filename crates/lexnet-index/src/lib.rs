//! lexnet Index - Lexical lookups over a normalized corpus
//!
//! - [`sequence`]: inverted index from every contiguous token run to the
//!   sentences containing it, plus per-length run counting
//! - [`mention`]: which sentences mention which entity, the token runs
//!   around each entity, and how often each entity is mentioned

pub mod mention;
pub mod sequence;

pub use mention::{
    context_sequences, mention_counts, mentions_by_entity, EntityContext, EntityMentions,
    MentionCount,
};
pub use sequence::{
    dedup_preserving_order, sequence_counts, SequenceCounts, SequenceIndex, SequenceMatch,
};
