//! CLI Integration Tests
//!
//! Each test writes its CSV/JSON inputs to a temporary directory, runs a
//! task through the library entry point and checks the JSON report. The
//! binary is exercised for exit status and the `invalid input` message.

use std::path::{Path, PathBuf};
use std::process::Command;

use clap::Parser;
use lexnet_cli::{run, Cli};
use serde_json::{json, Value};
use tempfile::TempDir;

const SENTENCES: &str = "sentence\n\
Alice and John talk.\n\
Ally met Bob!\n\
The weather is nice\n\
John and Bob, the friends\n";

const NAMES: &str = "Name,Other Names\n\
John,\n\
Alice,\"Ally\"\n\
Bob,Bobby\n\
Carol,\n";

const REMOVE: &str = "word\nthe\nis\n";

/// Temporary directory holding the standard inputs
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };
        fixture.write("sentences.csv", SENTENCES);
        fixture.write("names.csv", NAMES);
        fixture.write("remove.csv", REMOVE);
        fixture
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn arg(&self, name: &str) -> String {
        self.path(name).to_str().unwrap().to_string()
    }

    /// Raw input arguments: sentences, names and removal words
    fn raw(&self) -> Vec<String> {
        vec![
            "-s".into(),
            self.arg("sentences.csv"),
            "-n".into(),
            self.arg("names.csv"),
            "-r".into(),
            self.arg("remove.csv"),
        ]
    }
}

fn report(args: &[String]) -> Value {
    let cli = Cli::try_parse_from(std::iter::once("lexnet".to_string()).chain(args.iter().cloned()))
        .unwrap();
    serde_json::to_value(run(&cli).unwrap()).unwrap()
}

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn with(mut base: Vec<String>, extra: &[&str]) -> Vec<String> {
    base.extend(args(extra));
    base
}

// =============================================================================
// Library entry point
// =============================================================================

#[test]
fn test_task1_normalizes_inputs() {
    let f = Fixture::new();
    let out = report(&with(f.raw(), &["-t", "1"]));

    assert_eq!(
        out["Question 1"]["Processed Sentences"],
        json!([
            ["alice", "and", "john", "talk"],
            ["ally", "met", "bob"],
            ["weather", "nice"],
            ["john", "and", "bob", "friends"]
        ])
    );
    assert_eq!(
        out["Question 1"]["Processed Names"],
        json!([
            [["john"], []],
            [["alice"], [["ally"]]],
            [["bob"], [["bobby"]]],
            [["carol"], []]
        ])
    );
}

#[test]
fn test_task2_sequence_counts() {
    let f = Fixture::new();
    let out = report(&with(f.raw(), &["-t", "2", "--maxk", "2"]));
    let body = &out["Question 2"]["2-Seq Counts"];

    assert_eq!(body[0][0], "1_seq");
    assert_eq!(body[1][0], "2_seq");
    let unigrams = body[0][1].as_array().unwrap();
    assert!(unigrams.contains(&json!(["and", 2])));
    assert!(unigrams.contains(&json!(["john", 2])));
    assert!(body[1][1].as_array().unwrap().contains(&json!(["and john", 1])));
}

#[test]
fn test_task3_name_mentions() {
    let f = Fixture::new();
    let out = report(&with(f.raw(), &["-t", "3"]));

    assert_eq!(
        out["Question 3"]["Name Mentions"],
        json!([["alice", 2], ["bob", 2], ["john", 2]])
    );
}

#[test]
fn test_task4_known_sequences_from_preprocessed() {
    let f = Fixture::new();
    let processed = report(&with(f.raw(), &["-t", "1"]));
    f.write("q1.json", &processed.to_string());
    f.write(
        "keys.json",
        r#"{"keys": [["John", "and"], ["weather"], ["unknown", "words"], ["john", "and"]]}"#,
    );

    let out = report(&args(&[
        "-t",
        "4",
        "--preprocessed",
        &f.arg("q1.json"),
        "--maxk",
        "3",
        "--qsek_query_path",
        &f.arg("keys.json"),
    ]));

    assert_eq!(
        out["Question 4"]["K-Seq Matches"],
        json!([
            ["john and", [["john", "and", "bob", "friends"]]],
            ["weather", [["weather", "nice"]]]
        ])
    );
}

#[test]
fn test_task5_person_contexts() {
    let f = Fixture::new();
    let out = report(&with(f.raw(), &["-t", "5", "--maxk", "1"]));
    let contexts = out["Question 5"]["Person Contexts and K-Seqs"].as_array().unwrap();

    let names: Vec<&str> = contexts.iter().map(|c| c[0].as_str().unwrap()).collect();
    assert_eq!(names, vec!["alice", "bob", "john"]);
    assert_eq!(
        contexts[0][1],
        json!([["alice"], ["ally"], ["and"], ["bob"], ["john"], ["met"], ["talk"]])
    );
}

#[test]
fn test_task6_and_7_share_the_edge_list() {
    let f = Fixture::new();
    let edges = report(&with(f.raw(), &["-t", "6", "--windowsize", "1", "--threshold", "1"]));
    assert_eq!(
        edges["Question 6"]["Pair Matches"],
        json!([["alice", "bob"], ["alice", "john"], ["bob", "john"]])
    );

    f.write("q6.json", &edges.to_string());
    f.write("pairs.json", r#"{"keys": [["John", "Alice"], ["carol", "bob"]]}"#);

    let from_edges = report(&args(&[
        "-t",
        "7",
        "--edges",
        &f.arg("q6.json"),
        "--pairs",
        &f.arg("pairs.json"),
        "--maximal_distance",
        "1",
    ]));
    let from_corpus = report(&with(
        f.raw(),
        &[
            "-t",
            "7",
            "--windowsize",
            "1",
            "--threshold",
            "1",
            "--pairs",
            &f.arg("pairs.json"),
            "--maximal_distance",
            "1",
        ],
    ));

    let expected = json!([["alice", "john", true], ["bob", "carol", false]]);
    assert_eq!(from_edges["Question 7"]["Pair Matches"], expected);
    assert_eq!(from_corpus["Question 7"]["Pair Matches"], expected);
}

#[test]
fn test_task8_fixed_length() {
    let f = Fixture::new();
    f.write(
        "q6.json",
        r#"{"Question 6": {"Pair Matches": [["a", "b"], ["b", "c"], ["a", "c"]]}}"#,
    );
    f.write("pairs.json", r#"{"keys": [["a", "c"], ["b", "d"]]}"#);

    let out = report(&args(&[
        "-t",
        "8",
        "--edges",
        &f.arg("q6.json"),
        "--pairs",
        &f.arg("pairs.json"),
        "--fixed_length",
        "3",
    ]));
    assert_eq!(
        out["Question 8"]["Pair Matches"],
        json!([["a", "c", true], ["b", "d", false]])
    );
}

#[test]
fn test_task9_groups() {
    let f = Fixture::new();
    f.write("groups.csv", "sentence\na b c\nc d\ne\n");

    let out = report(&args(&[
        "-t",
        "9",
        "-s",
        &f.arg("groups.csv"),
        "--threshold",
        "1",
    ]));
    assert_eq!(
        out["Question 9"]["group Matches"],
        json!([
            ["Group 1", [["e"]]],
            ["Group 2", [["a", "b", "c"], ["c", "d"]]]
        ])
    );
}

#[test]
fn test_window_larger_than_corpus_is_rejected() {
    let f = Fixture::new();
    let cli = Cli::try_parse_from(
        std::iter::once("lexnet".to_string())
            .chain(with(f.raw(), &["-t", "6", "--windowsize", "9", "--threshold", "1"])),
    )
    .unwrap();
    assert!(run(&cli).is_err());
}

// =============================================================================
// Binary
// =============================================================================

fn lexnet(args: &[String], cwd: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_lexnet"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_binary_prints_report() {
    let f = Fixture::new();
    let output = lexnet(&with(f.raw(), &["-t", "3"]), f.dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("{\n    \"Question 3\""));
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["Question 3"]["Name Mentions"][0], json!(["alice", 2]));
}

#[test]
fn test_binary_reports_invalid_input() {
    let f = Fixture::new();
    let cases = [
        args(&["-t", "2"]),
        with(f.raw(), &["-t", "2", "--maxk", "-1"]),
        with(f.raw(), &["-t", "6", "--windowsize", "1"]),
        args(&["-t", "12"]),
        args(&["-t", "1", "-s", "sentences.csv", "-n", "names.csv"]),
        args(&["-t", "3", "-s", "missing.csv", "-n", "missing.csv"]),
    ];

    for case in cases {
        let output = lexnet(&case, f.dir.path());
        assert_eq!(output.status.code(), Some(1), "args {case:?}");
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "invalid input");
    }
}

#[test]
fn test_binary_help_and_version_succeed() {
    let f = Fixture::new();

    let version = lexnet(&args(&["--version"]), f.dir.path());
    assert!(version.status.success());
    assert!(String::from_utf8_lossy(&version.stdout).starts_with("lexnet"));

    let help = lexnet(&args(&["--help"]), f.dir.path());
    assert!(help.status.success());
    let stdout = String::from_utf8_lossy(&help.stdout);
    assert!(stdout.contains("--remove_words"));
    assert!(!stdout.contains("invalid input"));
}

#[test]
fn test_binary_honors_config_indent() {
    let f = Fixture::new();
    f.write("lexnet.toml", "[output]\nindent = 2\n");

    let output = lexnet(
        &with(f.raw(), &["-t", "3", "--config", &f.arg("lexnet.toml")]),
        f.dir.path(),
    );
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("{\n  \"Question 3\""));
}
