//! lexnet Core - Domain models, errors and shared types
//!
//! This crate defines the core abstractions used throughout lexnet:
//! - Corpus models (tokens, sentences, corpora)
//! - Entity registry (canonical names and aliases)
//! - Graph edges between entities
//! - Common error types
//! - Declarative parameter validation
//! - Configuration management

pub mod config;
pub mod validation;

pub use config::{AppConfig, ConfigError, LoggingConfig, OutputConfig};
pub use validation::{Checker, Rule, Violation, Violations};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for lexnet operations
#[derive(Error, Debug)]
pub enum LexnetError {
    #[error("Invalid parameters: {0}")]
    InvalidParameter(Violations),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for LexnetError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LexnetError>;

// ============================================================================
// Tokens and Sentences
// ============================================================================

/// A normalized (lowercase, punctuation-free) word
pub type Token = String;

/// Join a token run into its sequence key
pub fn sequence_key(tokens: &[Token]) -> String {
    tokens.join(" ")
}

fn check_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(LexnetError::MalformedInput("empty token".to_string()));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(LexnetError::MalformedInput(format!(
            "token contains whitespace: {token:?}"
        )));
    }
    Ok(())
}

/// An ordered, non-empty sequence of tokens
///
/// Ordering is lexicographic over the token sequence, which is the order
/// used for every sorted output in lexnet.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Token>", into = "Vec<Token>")]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    /// Create a sentence, rejecting empty sentences and malformed tokens
    pub fn new(tokens: Vec<Token>) -> Result<Self> {
        if tokens.is_empty() {
            return Err(LexnetError::MalformedInput("empty sentence".to_string()));
        }
        for token in &tokens {
            check_token(token)?;
        }
        Ok(Self { tokens })
    }

    /// Parse a whitespace separated, already normalized line
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(text.split_whitespace().map(str::to_string).collect())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Space-joined form of the whole sentence
    pub fn key(&self) -> String {
        sequence_key(&self.tokens)
    }

    /// Check for a literal token match
    pub fn contains_token(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Distinct tokens of the sentence
    pub fn distinct_tokens(&self) -> HashSet<&str> {
        self.tokens.iter().map(String::as_str).collect()
    }

    /// Every contiguous token run of length `1..=min(max_length, len)`,
    /// shortest runs first
    pub fn runs(&self, max_length: Option<usize>) -> impl Iterator<Item = &[Token]> + '_ {
        let longest = max_length.map_or(self.tokens.len(), |m| m.min(self.tokens.len()));
        (1..=longest).flat_map(move |n| self.tokens.windows(n))
    }
}

impl TryFrom<Vec<Token>> for Sentence {
    type Error = LexnetError;

    fn try_from(tokens: Vec<Token>) -> Result<Self> {
        Self::new(tokens)
    }
}

impl From<Sentence> for Vec<Token> {
    fn from(sentence: Sentence) -> Self {
        sentence.tokens
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// An ordered corpus of sentences, identified by position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    sentences: Vec<Sentence>,
}

impl Corpus {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.sentences.iter()
    }

    /// Windows of `size` consecutive sentences, one sentence step apart.
    ///
    /// Yields nothing when `size` is zero or larger than the corpus.
    pub fn windows(&self, size: usize) -> impl Iterator<Item = &[Sentence]> + '_ {
        let count = if size == 0 || size > self.sentences.len() {
            0
        } else {
            self.sentences.len() - size + 1
        };
        (0..count).map(move |start| &self.sentences[start..start + size])
    }
}

impl FromIterator<Sentence> for Corpus {
    fn from_iter<I: IntoIterator<Item = Sentence>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Sentence;
    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.iter()
    }
}

// ============================================================================
// Entities
// ============================================================================

/// Wire form of an entity: `[canonical_tokens, [alias_tokens, ...]]`
type EntityRecord = (Vec<Token>, Vec<Vec<Token>>);

/// A named entity with a canonical name and alternate names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntityRecord", into = "EntityRecord")]
pub struct Entity {
    /// Primary name, never empty
    canonical: Vec<Token>,

    /// Alternate names, each non-empty and distinct
    aliases: Vec<Vec<Token>>,

    /// Every token of the canonical name and of every alias
    mention_tokens: BTreeSet<Token>,
}

impl Entity {
    /// Create an entity.
    ///
    /// Empty alias sequences are dropped and duplicate aliases collapse to
    /// their first occurrence. An empty canonical name is malformed input.
    pub fn new(canonical: Vec<Token>, aliases: Vec<Vec<Token>>) -> Result<Self> {
        if canonical.is_empty() {
            return Err(LexnetError::MalformedInput(
                "entity with empty canonical name".to_string(),
            ));
        }
        for token in &canonical {
            check_token(token)?;
        }

        let mut unique: Vec<Vec<Token>> = Vec::new();
        for alias in aliases.into_iter().filter(|a| !a.is_empty()) {
            for token in &alias {
                check_token(token)?;
            }
            if !unique.contains(&alias) {
                unique.push(alias);
            }
        }

        let mention_tokens = canonical
            .iter()
            .chain(unique.iter().flatten())
            .cloned()
            .collect();

        Ok(Self {
            canonical,
            aliases: unique,
            mention_tokens,
        })
    }

    /// Entity without aliases
    pub fn named(canonical: &str) -> Result<Self> {
        Self::new(
            canonical.split_whitespace().map(str::to_string).collect(),
            Vec::new(),
        )
    }

    /// Add an alias
    pub fn with_alias(self, alias: &str) -> Result<Self> {
        let mut aliases = self.aliases;
        aliases.push(alias.split_whitespace().map(str::to_string).collect());
        Self::new(self.canonical, aliases)
    }

    pub fn canonical(&self) -> &[Token] {
        &self.canonical
    }

    pub fn aliases(&self) -> &[Vec<Token>] {
        &self.aliases
    }

    /// Canonical name joined into a single string
    pub fn name(&self) -> String {
        sequence_key(&self.canonical)
    }

    /// Tokens whose literal presence in a sentence counts as a mention
    pub fn mention_tokens(&self) -> &BTreeSet<Token> {
        &self.mention_tokens
    }

    /// Check whether any canonical or alias token occurs in the sentence
    pub fn is_mentioned_in(&self, sentence: &Sentence) -> bool {
        sentence
            .tokens()
            .iter()
            .any(|t| self.mention_tokens.contains(t))
    }

    /// Number of sentence tokens that are canonical or alias tokens
    pub fn mention_count(&self, sentence: &Sentence) -> usize {
        sentence
            .tokens()
            .iter()
            .filter(|t| self.mention_tokens.contains(*t))
            .count()
    }
}

impl TryFrom<EntityRecord> for Entity {
    type Error = LexnetError;

    fn try_from((canonical, aliases): EntityRecord) -> Result<Self> {
        Self::new(canonical, aliases)
    }
}

impl From<Entity> for EntityRecord {
    fn from(entity: Entity) -> Self {
        (entity.canonical, entity.aliases)
    }
}

/// Ordered registry of entities with unique canonical names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Entity>", into = "Vec<Entity>")]
pub struct EntityRegistry {
    entities: Vec<Entity>,
}

impl EntityRegistry {
    /// Build a registry; a repeated canonical name keeps its first entity
    pub fn new(entities: impl IntoIterator<Item = Entity>) -> Self {
        let mut seen = HashSet::new();
        let entities = entities
            .into_iter()
            .filter(|e| seen.insert(e.canonical.clone()))
            .collect();
        Self { entities }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Find an entity by its joined canonical name
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name() == name)
    }
}

impl From<Vec<Entity>> for EntityRegistry {
    fn from(entities: Vec<Entity>) -> Self {
        Self::new(entities)
    }
}

impl From<EntityRegistry> for Vec<Entity> {
    fn from(registry: EntityRegistry) -> Self {
        registry.entities
    }
}

impl FromIterator<Entity> for EntityRegistry {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ============================================================================
// Graph Edges
// ============================================================================

/// An undirected edge between two distinct entity names.
///
/// Endpoints are stored sorted, so `Edge::new("b", "a")` equals
/// `Edge::new("a", "b")` and edges order by `(first, second)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(String, String)", into = "(String, String)")]
pub struct Edge {
    first: String,
    second: String,
}

impl Edge {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Result<Self> {
        let (a, b) = (a.into(), b.into());
        if a.is_empty() || b.is_empty() {
            return Err(LexnetError::MalformedInput(
                "edge with an empty endpoint".to_string(),
            ));
        }
        if a == b {
            return Err(LexnetError::MalformedInput(format!("self-loop on {a:?}")));
        }
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Ok(Self { first, second })
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.first, &self.second)
    }
}

impl TryFrom<(String, String)> for Edge {
    type Error = LexnetError;

    fn try_from((a, b): (String, String)) -> Result<Self> {
        Self::new(a, b)
    }
}

impl From<Edge> for (String, String) {
    fn from(edge: Edge) -> Self {
        (edge.first, edge.second)
    }
}

// ============================================================================
// Tests
// ============================================================================
