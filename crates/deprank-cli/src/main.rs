#![forbid(unsafe_code)]

mod cmd;
mod config;
mod input;
mod output;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "deprank: stable dependency ranking with cycle detection",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (defaults to pretty on a terminal, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file to use instead of `./deprank.toml`.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Load config files and resolve the output mode for a graph command.
    fn settings(&self) -> anyhow::Result<cmd::Settings> {
        let project_root = env::current_dir().context("Failed to read the working directory")?;
        let config = config::resolve_config(&project_root, self.config.as_deref())?;
        let output = output::resolve_output_mode(self.format, self.json, config.output_format);
        Ok(cmd::Settings { output, config })
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Graph",
        about = "Print nodes in dependency order",
        long_about = "Print every node with its level, dependents before their dependencies. \
                      Members of a cycle keep their input order.",
        after_help = "EXAMPLES:\n    # Rank a dependency map\n    deprank rank deps.yaml\n\n    # Build order (dependencies first)\n    deprank rank deps.yaml --reverse\n\n    # Emit machine-readable output\n    deprank rank deps.json --format json"
    )]
    Rank(cmd::GraphArgs),

    #[command(
        next_help_heading = "Graph",
        about = "Group nodes by level",
        long_about = "Group nodes into layers of equal level. On an acyclic map the nodes of \
                      one layer do not depend on each other.",
        after_help = "EXAMPLES:\n    # Build waves for a dependency map\n    deprank layers deps.toml --reverse\n\n    # Read JSON from stdin\n    cat deps.json | deprank layers -"
    )]
    Layers(cmd::GraphArgs),

    #[command(
        next_help_heading = "Graph",
        about = "List dependency cycles",
        long_about = "List groups of nodes that depend on each other, and nodes that depend on themselves.",
        after_help = "EXAMPLES:\n    # Check a dependency map for cycles\n    deprank cycles deps.yaml\n\n    # Emit machine-readable output\n    deprank cycles deps.yaml --json"
    )]
    Cycles(cmd::GraphArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Install bash completions\n    deprank completions bash > ~/.local/share/bash-completion/completions/deprank"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("DEPRANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "deprank=debug,info"
        } else {
            "deprank=info,warn"
        })
    });

    let format = env::var("DEPRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    // stdout carries command output; logs always go to stderr.
    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let started = Instant::now();
    let result = match &cli.command {
        Commands::Rank(args) => cli
            .settings()
            .and_then(|settings| cmd::rank::run_rank(args, &settings)),
        Commands::Layers(args) => cli
            .settings()
            .and_then(|settings| cmd::layers::run_layers(args, &settings)),
        Commands::Cycles(args) => cli
            .settings()
            .and_then(|settings| cmd::cycles::run_cycles(args, &settings)),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command)
        }
    };
    debug!(elapsed_us = started.elapsed().as_micros(), "command finished");

    result
}
