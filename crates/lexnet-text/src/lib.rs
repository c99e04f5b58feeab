//! lexnet Text - Normalization of raw text into tokens
//!
//! Raw sentences and names go through the same pipeline:
//! - every character outside `[a-zA-Z0-9 ]` becomes a space
//! - the text is lowercased
//! - whole-word removal words are deleted
//! - whitespace runs collapse to single spaces
//!
//! The [`loader`] module reads CSV and JSON inputs and produces the
//! normalized corpus and entity registry consumed by the analytics crates.

use lexnet_core::{LexnetError, Token};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub mod loader;

pub use loader::{
    load_edges, load_entities, load_pairs, load_preprocessed, load_query_keys,
    load_removal_words, load_sentences, EdgeListReport, PairMatches, ProcessedCorpus,
    ProcessedReport,
};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while loading or normalizing input
#[derive(Error, Debug)]
pub enum TextError {
    /// IO error while reading the file
    #[error("IO error reading file: {path}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV decoding error
    #[error("CSV error in {path}: {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// JSON decoding error
    #[error("JSON error in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Structurally valid file with unusable content
    #[error("Malformed content in {path}: {message}")]
    Malformed { path: String, message: String },

    /// Removal words could not be compiled into a pattern
    #[error("Invalid removal pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Core(#[from] LexnetError),
}

impl From<TextError> for LexnetError {
    fn from(err: TextError) -> Self {
        match err {
            TextError::Core(inner) => inner,
            TextError::IoError { .. } => LexnetError::Other(anyhow::Error::new(err)),
            other => LexnetError::MalformedInput(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, TextError>;

// ============================================================================
// Normalization
// ============================================================================

static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9 ]").expect("static pattern compiles"));

/// Replace every character outside `[a-zA-Z0-9 ]` with a space
pub fn remove_punctuation(text: &str) -> String {
    NON_ALNUM.replace_all(text, " ").into_owned()
}

/// Collapse whitespace runs into single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize text without removing any words
pub fn clean_string_no_remove_words(text: &str) -> String {
    collapse_whitespace(&remove_punctuation(text).to_lowercase())
}

/// Normalize text and delete removal words
pub fn clean_string(text: &str, removal: &RemovalList) -> String {
    removal.strip(&remove_punctuation(text).to_lowercase())
}

/// Normalize text and split it into tokens
pub fn tokenize(text: &str, removal: &RemovalList) -> Vec<Token> {
    clean_string(text, removal)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Words deleted from sentences and names during normalization
#[derive(Debug, Clone, Default)]
pub struct RemovalList {
    words: Vec<String>,
    pattern: Option<Regex>,
}

impl RemovalList {
    /// Build a removal list.
    ///
    /// Words are matched verbatim against text that is already lowercased
    /// and stripped of punctuation, so `Bob` never removes `bob`. Blank
    /// words are ignored.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for word in words {
            let word = word.as_ref();
            if !word.trim().is_empty() && !unique.iter().any(|w| w == word) {
                unique.push(word.to_string());
            }
        }

        let pattern = if unique.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = unique.iter().map(|w| regex::escape(w)).collect();
            Some(Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|")))?)
        };

        Ok(Self {
            words: unique,
            pattern,
        })
    }

    /// A list that removes nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Delete removal words from already lowercased text
    pub fn strip(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => collapse_whitespace(&pattern.replace_all(text, "")),
            None => collapse_whitespace(text),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_punctuation() {
        assert_eq!(remove_punctuation("Hello, world!"), "Hello  world ");
        assert_eq!(remove_punctuation(""), "");
        assert_eq!(remove_punctuation("@#%jo went.. to the"), "   jo went   to the");
        assert_eq!(
            remove_punctuation("Joe1 He$Llo YO#U8 are Ve..Ry NI,,ce"),
            "Joe1 He Llo YO U8 are Ve  Ry NI  ce"
        );
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("   Hello     world   "), "Hello world");
        assert_eq!(collapse_whitespace("            "), "");
        assert_eq!(collapse_whitespace(" T "), "T");
    }

    #[test]
    fn test_clean_string_no_remove_words() {
        assert_eq!(clean_string_no_remove_words("Hello, World!"), "hello world");
        assert_eq!(clean_string_no_remove_words("  Hello,    World!   "), "hello world");
        assert_eq!(clean_string_no_remove_words("HeLLo WoRLd"), "hello world");
    }

    #[test]
    fn test_removal_list_whole_words_only() {
        let removal = RemovalList::new(["you", "are", "so"]).unwrap();
        assert_eq!(
            clean_string("I thought you didnt wanted to come so", &removal),
            "i thought didnt wanted to come"
        );
        // "so" inside "some" survives
        assert_eq!(clean_string("some are here", &removal), "some here");
    }

    #[test]
    fn test_removal_words_match_verbatim() {
        let removal = RemovalList::new(["Alice", "Bob", "", "  ", "bob"]).unwrap();
        assert_eq!(removal.words(), &["Alice", "Bob", "bob"]);
        assert_eq!(
            tokenize("Alice and Bob are friends", &removal),
            vec!["alice", "and", "are", "friends"]
        );

        let capitalized = RemovalList::new(["Alice", "Bob"]).unwrap();
        assert_eq!(
            tokenize("Alice and Bob are friends", &capitalized),
            vec!["alice", "and", "bob", "are", "friends"]
        );
    }

    #[test]
    fn test_empty_removal_list() {
        let removal = RemovalList::empty();
        assert!(removal.is_empty());
        assert_eq!(clean_string("hi how are you today", &removal), "hi how are you today");
        assert!(tokenize("%$^&*($@", &removal).is_empty());
    }

    #[test]
    fn test_text_error_maps_to_core() {
        let err = TextError::Malformed {
            path: "names.csv".to_string(),
            message: "bad row".to_string(),
        };
        assert!(matches!(LexnetError::from(err), LexnetError::MalformedInput(_)));
    }
}
