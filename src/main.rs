//! All-pairs shortest paths from the command line.
//!
//! Reads `N M` followed by `M` triples `source destination weight` (1-based
//! nodes, non-negative weights) and prints the final distance matrix followed
//! by the computation time.
//!
//! # Example
//!
//! ```bash
//! # Concurrent sweep on the default pool
//! printf '3 2\n1 2 4\n2 3 1\n' | cfw
//!
//! # Single-threaded reference sweep
//! cfw --sequential --input graph.txt
//!
//! # Baseline compare-then-write on four workers
//! cfw --workers 4 --consistency monotone --input graph.txt
//! ```

use cfw::{Config, Consistency, Graph, Scheduler, Solution, sequential};
use clap::{Parser, ValueEnum};
use std::{
    fs, io,
    num::NonZeroUsize,
    path::PathBuf,
    process::ExitCode,
};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Concurrent Floyd-Warshall
///
/// Computes shortest distances between every pair of nodes of an undirected
/// graph with non-negative edge weights.
#[derive(Parser, Debug)]
#[command(name = "cfw")]
#[command(version, about, long_about = None)]
struct Args {
    /// Read the graph from this file instead of standard input
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of worker threads. Defaults to the available parallelism.
    #[arg(short, long)]
    workers: Option<NonZeroUsize>,

    /// How row-tasks turn a shorter candidate into a write
    #[arg(long, value_enum, default_value_t = ConsistencyArg::Checked)]
    consistency: ConsistencyArg,

    /// Largest accepted node count
    #[arg(long, default_value_t = cfw::config::DEFAULT_MAX_NODES)]
    max_nodes: usize,

    /// Run the single-threaded sweep instead
    #[arg(long)]
    sequential: bool,
}

#[derive(ValueEnum, Debug, Copy, Clone)]
enum ConsistencyArg {
    /// Compare and write inside one exclusive critical section
    Checked,
    /// Compare under the shared lock, write under a separate exclusive one
    Monotone,
}

impl From<ConsistencyArg> for Consistency {
    fn from(arg: ConsistencyArg) -> Self {
        match arg {
            ConsistencyArg::Checked => Self::Checked,
            ConsistencyArg::Monotone => Self::Monotone,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read input: {0}")]
    Read(#[from] io::Error),
    #[error(transparent)]
    Solve(#[from] cfw::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,cfw=info")),
        )
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(solution) => {
            print!("Final distance matrix:\n{}", solution.distances);
            println!("Execution time: {:.4} seconds", solution.elapsed_secs());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "run failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Solution, CliError> {
    let mut config = Config::new()
        .with_max_nodes(args.max_nodes)
        .with_consistency(args.consistency.into());
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };
    let graph = Graph::parse(&text, &config)?;
    info!(nodes = graph.order(), sequential = args.sequential, "graph loaded");

    let solution = if args.sequential {
        sequential::solve(&graph)?
    } else {
        Scheduler::new(config)?.solve(&graph)?
    };
    Ok(solution)
}
