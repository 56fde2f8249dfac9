//! CLI entry point for the burrow solver.
//!
//! Usage:
//!   burrow-sort solve <diagram.txt> [options]
//!   burrow-sort solve --stdin [options]
//!
//! Options:
//!   --costs <file>          JSON step costs, e.g. {"amber":1,"bronze":10}
//!   --timeout <seconds>     Maximum search time (default: unlimited)
//!   --max-expansions <n>    Maximum states to expand (default: unlimited)
//!   --json                  Print a JSON report instead of the bare cost
//!
//! Exit codes: 0 solved, 1 bad input, 2 unreachable, 3 aborted.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use burrow_sort::{
    find_minimum_cost, parse_diagram, SearchOutcome, SolverConfig, SolverResult, StepCosts,
};

#[derive(Parser)]
#[command(name = "burrow-sort")]
#[command(about = "Minimum-energy solver for sorting amphipods into their rooms")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the least energy needed to sort a burrow
    Solve {
        /// Path to the burrow diagram (stdin is read when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the diagram from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// JSON file with per-type step costs
        #[arg(long, value_name = "FILE")]
        costs: Option<PathBuf>,

        /// Maximum search time in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Maximum number of states to expand
        #[arg(long)]
        max_expansions: Option<usize>,

        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

/// Output format for the JSON report
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_cost: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    search_exhausted: bool,
    states_expanded: usize,
    states_seen: usize,
    time_elapsed_ms: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            costs,
            timeout,
            max_expansions,
            json,
        } => {
            let diagram = match file {
                Some(path) if !stdin => fs::read_to_string(&path)
                    .unwrap_or_else(|e| fail(&format!("Failed to read file {:?}: {}", path, e))),
                _ => {
                    let mut buffer = String::new();
                    if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                        fail(&format!("Failed to read from stdin: {}", e));
                    }
                    buffer
                }
            };

            let burrow = parse_diagram(&diagram)
                .unwrap_or_else(|e| fail(&format!("Error parsing diagram: {}", e)));

            let costs = match costs {
                Some(path) => load_costs(&path),
                None => StepCosts::default(),
            };

            let config = SolverConfig {
                costs,
                max_expansions,
                timeout: timeout.map(Duration::from_secs),
                ..Default::default()
            };

            info!(depth = burrow.depth(), ?costs, "solving burrow");
            let result = find_minimum_cost(&burrow, &config);
            info!(
                expansions = result.expansions,
                elapsed_ms = result.time_elapsed_ms,
                "search done"
            );

            if json {
                let output = format_result(&result);
                match serde_json::to_string_pretty(&output) {
                    Ok(text) => println!("{}", text),
                    Err(e) => fail(&format!("Failed to serialize report: {}", e)),
                }
            } else {
                match result.outcome {
                    SearchOutcome::Solved { cost } => println!("{}", cost),
                    SearchOutcome::Unreachable => println!("unreachable"),
                    SearchOutcome::Aborted(reason) => println!("aborted: {}", reason.as_str()),
                }
            }

            process::exit(exit_code(&result.outcome));
        }
    }
}

fn load_costs(path: &Path) -> StepCosts {
    let text = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("Failed to read costs file {:?}: {}", path, e)));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| fail(&format!("Error parsing costs JSON: {}", e)))
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn exit_code(outcome: &SearchOutcome) -> i32 {
    match outcome {
        SearchOutcome::Solved { .. } => 0,
        SearchOutcome::Unreachable => 2,
        SearchOutcome::Aborted(_) => 3,
    }
}

fn format_result(result: &SolverResult) -> SolveOutput {
    let reason = match result.outcome {
        SearchOutcome::Solved { .. } => None,
        SearchOutcome::Unreachable => Some("unreachable".to_string()),
        SearchOutcome::Aborted(reason) => Some(reason.as_str().to_string()),
    };
    SolveOutput {
        solved: result.cost().is_some(),
        minimum_cost: result.cost(),
        reason,
        search_exhausted: result.outcome == SearchOutcome::Unreachable,
        states_expanded: result.expansions,
        states_seen: result.states_seen,
        time_elapsed_ms: result.time_elapsed_ms,
    }
}
