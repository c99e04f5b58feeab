//! lexnet - Command-line entry point
//!
//! Usage:
//!   lexnet -t 1 -s sentences.csv -n names.csv [-r remove.csv]
//!   lexnet -t 4 --preprocessed q1.json --maxk 3 --qsek_query_path keys.json
//!   lexnet -t 7 --edges q6.json --pairs pairs.json --maximal_distance 2
//!
//! The report goes to stdout. Any failure prints `invalid input` and exits
//! with status 1; details are logged to stderr.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use lexnet_cli::{render, run, Cli};
use lexnet_core::{AppConfig, ConfigError, LoggingConfig};

fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(path) => AppConfig::from_file(path)?.with_env_override(),
        None => AppConfig::from_env(),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn execute(cli: &Cli, config: &AppConfig) -> anyhow::Result<String> {
    let report = run(cli).with_context(|| format!("task {} failed", cli.task))?;
    let rendered = render(&report, config.output.indent).context("rendering report")?;
    Ok(rendered)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help and --version
            return match e.print() {
                Ok(()) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            };
        }
        Err(e) => {
            eprintln!("{e}");
            println!("invalid input");
            return ExitCode::FAILURE;
        }
    };

    let config = load_config(cli.config.as_deref());
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    let outcome = config
        .context("loading configuration")
        .and_then(|config| execute(&cli, &config));

    match outcome {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Invalid input");
            println!("invalid input");
            ExitCode::FAILURE
        }
    }
}
