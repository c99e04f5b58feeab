//! Input loaders
//!
//! Reads the raw CSV inputs (sentences, names, removal words) and the JSON
//! inputs (preprocessed corpora, query keys, pairs, edge lists) into the
//! normalized core types.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use lexnet_core::{Corpus, Edge, Entity, EntityRegistry, Sentence, Token};

use crate::{clean_string_no_remove_words, tokenize, RemovalList, Result, TextError};

// ============================================================================
// Report shapes shared with the CLI
// ============================================================================

/// Normalized corpus and registry, as written by the normalization task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedCorpus {
    #[serde(rename = "Processed Sentences")]
    pub sentences: Corpus,

    #[serde(rename = "Processed Names", default)]
    pub names: EntityRegistry,
}

/// `{"Question 1": {...}}` wrapper around [`ProcessedCorpus`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedReport {
    #[serde(rename = "Question 1")]
    pub question: ProcessedCorpus,
}

/// Co-occurrence edges, as written by the graph-building task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairMatches {
    #[serde(rename = "Pair Matches")]
    pub pairs: Vec<Edge>,
}

/// `{"Question 6": {...}}` wrapper around [`PairMatches`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeListReport {
    #[serde(rename = "Question 6")]
    pub question: PairMatches,
}

#[derive(Debug, Deserialize)]
struct KeysFile {
    keys: Vec<Vec<String>>,
}

// ============================================================================
// Readers
// ============================================================================

fn display(path: &Path) -> String {
    path.display().to_string()
}

/// Read every data row of a CSV file; the first row is a header
fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let csv_error = |source| TextError::CsvError {
        path: display(path),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| TextError::IoError {
        path: display(path),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| TextError::JsonError {
        path: display(path),
        source: e,
    })
}

/// Load removal words: every field of every data row
pub fn load_removal_words(path: &Path) -> Result<RemovalList> {
    let rows = read_csv_rows(path)?;
    RemovalList::new(rows.iter().flatten())
}

/// Load and normalize sentences, one per data row.
///
/// Multi-field rows are joined with spaces. Rows that normalize to nothing
/// are dropped.
pub fn load_sentences(path: &Path, removal: &RemovalList) -> Result<Corpus> {
    let rows = read_csv_rows(path)?;
    let total = rows.len();

    let mut sentences = Vec::with_capacity(total);
    for row in rows {
        let tokens = tokenize(&row.join(" "), removal);
        if tokens.is_empty() {
            continue;
        }
        sentences.push(Sentence::new(tokens)?);
    }

    debug!(
        path = %path.display(),
        rows = total,
        kept = sentences.len(),
        "Loaded sentences"
    );
    Ok(Corpus::new(sentences))
}

/// Load and normalize the people registry.
///
/// Column 0 holds the canonical name, column 1 a comma separated list of
/// aliases. Rows whose canonical name normalizes to nothing are discarded;
/// a repeated canonical name keeps its first row.
pub fn load_entities(path: &Path, removal: &RemovalList) -> Result<EntityRegistry> {
    let rows = read_csv_rows(path)?;
    let total = rows.len();

    let mut entities = Vec::with_capacity(total);
    for (line, row) in rows.iter().enumerate() {
        if row.len() < 2 {
            warn!(path = %path.display(), row = line + 1, "Skipping names row without alias column");
            continue;
        }

        let canonical = tokenize(&row[0], removal);
        if canonical.is_empty() {
            continue;
        }

        let aliases: Vec<Vec<Token>> = row[1]
            .trim()
            .split(',')
            .map(|alias| tokenize(alias, removal))
            .filter(|alias| !alias.is_empty())
            .collect();

        entities.push(Entity::new(canonical, aliases)?);
    }

    let registry = EntityRegistry::new(entities);
    debug!(
        path = %path.display(),
        rows = total,
        kept = registry.len(),
        "Loaded names"
    );
    Ok(registry)
}

/// Load a corpus written earlier by the normalization task
pub fn load_preprocessed(path: &Path) -> Result<ProcessedCorpus> {
    let report: ProcessedReport = read_json(path)?;
    Ok(report.question)
}

/// Load candidate query sequences, normalized without removal words.
///
/// Order is preserved and duplicates are kept; entries that normalize to
/// nothing are dropped.
pub fn load_query_keys(path: &Path) -> Result<Vec<Vec<Token>>> {
    let file: KeysFile = read_json(path)?;
    Ok(file
        .keys
        .iter()
        .map(|key| {
            clean_string_no_remove_words(&key.join(" "))
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|tokens| !tokens.is_empty())
        .collect())
}

/// Load name pairs to query; every entry must hold exactly two names
pub fn load_pairs(path: &Path) -> Result<Vec<(String, String)>> {
    let file: KeysFile = read_json(path)?;

    file.keys
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            let malformed = |message: String| TextError::Malformed {
                path: display(path),
                message,
            };
            match pair.as_slice() {
                [a, b] => {
                    let (a, b) = (clean_string_no_remove_words(a), clean_string_no_remove_words(b));
                    if a.is_empty() || b.is_empty() {
                        Err(malformed(format!("pair {i} has an empty name")))
                    } else {
                        Ok((a, b))
                    }
                }
                other => Err(malformed(format!(
                    "pair {i} has {} names, expected 2",
                    other.len()
                ))),
            }
        })
        .collect()
}

/// Load an edge list written earlier by the graph-building task
pub fn load_edges(path: &Path) -> Result<Vec<Edge>> {
    let report: EdgeListReport = read_json(path)?;
    Ok(report.question.pairs)
}

// ============================================================================
// Tests
// ============================================================================
