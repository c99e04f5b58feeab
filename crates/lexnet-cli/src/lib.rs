//! lexnet CLI - Task runner
//!
//! Parses arguments, checks them against the task's contract, runs the task
//! and renders the `{"Question N": {...}}` report.

pub mod contract;
pub mod tasks;

use std::path::PathBuf;

use clap::Parser;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::info;

use lexnet_core::{LexnetError, Result};
use lexnet_text::ProcessedCorpus;

pub use contract::{Param, Params, TaskContract};

#[derive(Debug, Parser)]
#[command(name = "lexnet")]
#[command(about = "Sequence, mention and co-occurrence analysis over a sentence corpus")]
#[command(version)]
pub struct Cli {
    /// Task to run (1-9)
    #[arg(short = 't', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub task: u8,

    /// Sentences CSV file
    #[arg(short = 's', long)]
    pub sentences: Option<PathBuf>,

    /// Names CSV file
    #[arg(short = 'n', long)]
    pub names: Option<PathBuf>,

    /// Removal words CSV file
    #[arg(short = 'r', long = "remove_words")]
    pub remove_words: Option<PathBuf>,

    /// Output of task 1, used instead of the CSV files
    #[arg(long)]
    pub preprocessed: Option<PathBuf>,

    /// Maximal sequence length
    #[arg(long, allow_negative_numbers = true)]
    pub maxk: Option<i64>,

    /// JSON file of sequences to look up
    #[arg(long = "qsek_query_path")]
    pub qsek_query_path: Option<PathBuf>,

    /// Number of consecutive sentences per window
    #[arg(long, allow_negative_numbers = true)]
    pub windowsize: Option<i64>,

    /// Minimal co-occurrence count, or minimal shared words for task 9
    #[arg(long, allow_negative_numbers = true)]
    pub threshold: Option<i64>,

    /// JSON file of name pairs to query
    #[arg(long)]
    pub pairs: Option<PathBuf>,

    /// Maximal number of hops between two names
    #[arg(long = "maximal_distance", allow_negative_numbers = true)]
    pub maximal_distance: Option<i64>,

    /// Exact number of names on the connecting path
    #[arg(long = "fixed_length", allow_negative_numbers = true)]
    pub fixed_length: Option<i64>,

    /// Output of task 6, used instead of building the graph
    #[arg(long)]
    pub edges: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Task result under its report key
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Task 1: processed sentences and names
    Processed(ProcessedCorpus),
    /// Every other task: a single keyed value
    Keyed {
        key: String,
        value: serde_json::Value,
    },
}

impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Body::Processed(processed) => processed.serialize(serializer),
            Body::Keyed { key, value } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(key, value)?;
                map.end()
            }
        }
    }
}

/// `{"Question N": body}`
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub task: u8,
    pub body: Body,
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&format!("Question {}", self.task), &self.body)?;
        map.end()
    }
}

/// Validate the arguments and run the selected task
pub fn run(cli: &Cli) -> Result<Report> {
    let contract = TaskContract::for_task(cli.task)
        .ok_or_else(|| LexnetError::Config(format!("unknown task {}", cli.task)))?;
    let params = contract.check(cli)?;

    info!(task = cli.task, "Running task");
    let body = tasks::execute(cli, contract, &params)?;
    info!(task = cli.task, "Task finished");

    Ok(Report {
        task: cli.task,
        body,
    })
}

/// Pretty-print a report with `indent` spaces per level
pub fn render(report: &Report, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);

    report
        .serialize(&mut serializer)
        .map_err(|e| LexnetError::Other(e.into()))?;
    String::from_utf8(buffer).map_err(|e| LexnetError::Other(e.into()))
}
