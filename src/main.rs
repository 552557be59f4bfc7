#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # skillcheck
//!
//! Command-line front-end: reads submissions from files, glob patterns or
//! stdin, assesses them, and prints a summary table with feedback (or JSON).

use std::path::PathBuf;

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use dotenvy::dotenv;
use itertools::Itertools;
use serde::Serialize;
use skillcheck::{
    AssessmentConfig, Assessor, SubmissionResult,
    constants::CONFIG_ENV_VAR,
    grade::SummaryRow,
};
use tabled::{Table, settings::Style};
use tokio::io::AsyncReadExt;
use tracing::{Level, debug, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
struct Global {
    /// Path to a JSON policy file.
    config:  Option<PathBuf>,
    /// Log at DEBUG instead of INFO.
    verbose: bool,
}

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Assess submissions
    Assess {
        /// Shared options.
        global:  Global,
        /// Emit JSON instead of a table.
        json:    bool,
        /// Paths, glob patterns, or `-` for stdin.
        sources: Vec<String>,
    },
    /// Print the active policy
    Policy(Global),
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses shared options
    fn global_opts() -> impl Parser<Global> {
        let config = long("config")
            .short('c')
            .help("JSON file overriding score weights and thresholds")
            .argument::<PathBuf>("PATH")
            .optional();
        let verbose = long("verbose")
            .short('v')
            .help("Log each pipeline stage")
            .switch();
        construct!(Global { config, verbose })
    }

    let json = long("json").help("Print results as a JSON array").switch();
    let sources = positional::<String>("PATH")
        .help("Python file, glob pattern, or - for stdin")
        .some("expected at least one submission");

    let global = global_opts();
    let assess = construct!(Cmd::Assess {
        global,
        json,
        sources
    })
    .to_options()
    .command("assess")
    .help("Assess one or more submissions");

    let policy = construct!(Cmd::Policy(global_opts()))
        .to_options()
        .command("policy")
        .help("Print the active scoring policy as JSON");

    construct!([assess, policy])
        .to_options()
        .descr("Skill assessment and feedback for learner Python code")
        .run()
}

/// Installs the fmt subscriber.
fn init_tracing(verbose: bool) {
    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::registry()
        .with(fmt)
        .with(LevelFilter::from_level(level))
        .init();
}

/// Loads the policy from `--config`, then `SKILLCHECK_CONFIG`, then defaults.
fn load_config(global: &Global) -> Result<AssessmentConfig> {
    let path = global
        .config
        .clone()
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading policy");
            AssessmentConfig::from_json_file(&path)
                .with_context(|| format!("Invalid policy in {}", path.display()))
        }
        None => Ok(AssessmentConfig::default()),
    }
}

/// Expands glob patterns; plain paths and `-` pass through unchanged.
fn expand_sources(sources: &[String]) -> Result<Vec<String>> {
    let mut expanded = Vec::new();
    for source in sources {
        if source == "-" || !source.contains(['*', '?', '[']) {
            expanded.push(source.clone());
            continue;
        }
        let matches: Vec<String> = glob::glob(source)
            .with_context(|| format!("Invalid glob pattern: {source}"))?
            .map_ok(|p| p.display().to_string())
            .collect::<Result<_, _>>()
            .with_context(|| format!("Could not read a match of {source}"))?;
        if matches.is_empty() {
            anyhow::bail!("No files match {source}");
        }
        expanded.extend(matches);
    }
    Ok(expanded)
}

/// Reads a submission from a file, or stdin for `-`.
async fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut code = String::new();
        tokio::io::stdin()
            .read_to_string(&mut code)
            .await
            .context("Could not read submission from stdin")?;
        return Ok(code);
    }
    tokio::fs::read_to_string(source)
        .await
        .with_context(|| format!("Could not read submission {source}"))
}

/// A result labelled with the submission it came from.
#[derive(Serialize)]
struct Labelled {
    /// Path or `-`.
    submission: String,
    /// The assessment.
    #[serde(flatten)]
    result:     SubmissionResult,
}

/// Assesses every source concurrently, returning results in input order.
async fn assess_all(assessor: Assessor, sources: Vec<String>) -> Result<Vec<Labelled>> {
    let mut handles = Vec::with_capacity(sources.len());
    for source in sources {
        let code = read_source(&source).await?;
        handles.push(tokio::task::spawn_blocking(move || Labelled {
            result:     assessor.assess(&code),
            submission: source,
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.context("Assessment task panicked")?);
    }
    Ok(results)
}

/// Prints the summary table followed by numbered feedback per submission.
fn print_report(results: &[Labelled]) {
    let rows = results
        .iter()
        .map(|l| SummaryRow::new(l.submission.clone(), &l.result));
    println!("{}", Table::new(rows).with(Style::modern()));

    for labelled in results {
        let header = match labelled.result.tier() {
            Some(tier) => format!("{} ({tier})", labelled.submission),
            None if labelled.result.syntax_score() == 0.0 => {
                format!("{} (syntax error)", labelled.submission)
            }
            None => labelled.submission.clone(),
        };
        println!("\n{}", header.bold());
        let feedback = labelled
            .result
            .feedback()
            .iter()
            .enumerate()
            .map(|(i, line)| format!("  {}. {line}", i + 1))
            .join("\n");
        if labelled.result.syntax_score() == 0.0 {
            println!("{}", feedback.red());
        } else {
            println!("{}", feedback.cyan());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    match options() {
        Cmd::Assess {
            global,
            json,
            sources,
        } => {
            init_tracing(global.verbose);
            let assessor = Assessor::new(load_config(&global)?);
            let sources = expand_sources(&sources)?;
            let results = assess_all(assessor, sources).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_report(&results);
            }
        }
        Cmd::Policy(global) => {
            init_tracing(global.verbose);
            let config = load_config(&global)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    };

    Ok(())
}
