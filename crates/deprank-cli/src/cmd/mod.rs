pub mod completions;
pub mod cycles;
pub mod layers;
pub mod rank;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use deprank_core::{DependencyGraph, MissingNodes, NodeId, Ranking};
use tracing::{debug, warn};

use crate::config::EffectiveConfig;
use crate::input;
use crate::output::OutputMode;

/// Input arguments shared by the graph commands.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Dependency map (.json, .yaml, .yml or .toml). Use `-` for JSON on stdin.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Rank the reversed graph: dependencies first (build order).
    #[arg(long)]
    pub reverse: bool,

    /// Add undeclared dependencies as extra nodes instead of failing.
    #[arg(long)]
    pub append_missing: bool,
}

/// Everything a graph command needs besides its own arguments.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub output: OutputMode,
    pub config: EffectiveConfig,
}

impl GraphArgs {
    /// Read the dependency map and build the graph to rank.
    pub fn load_graph(&self, settings: &Settings) -> Result<DependencyGraph<String>> {
        let map = input::read_dependency_map(&self.file)?;

        let missing = if self.append_missing || settings.config.append_missing {
            MissingNodes::Append
        } else {
            MissingNodes::Reject
        };
        let graph = DependencyGraph::from_adjacency_with(map.into_entries(), missing)
            .with_context(|| format!("Invalid dependency map in {}", self.file.display()))?;
        debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            "built dependency graph"
        );

        if self.reverse || settings.config.reverse {
            Ok(graph.reversed())
        } else {
            Ok(graph)
        }
    }
}

/// Display name of `node`.
pub fn name_of(graph: &DependencyGraph<String>, node: NodeId) -> String {
    graph
        .payload(node)
        .cloned()
        .unwrap_or_else(|| node.to_string())
}

/// Warn once when the ranked graph has cycles. Members of a cycle are placed
/// in input order.
pub fn warn_on_cycles(ranking: &Ranking<'_, String>) {
    let report = ranking.cycles();
    if report.is_acyclic() {
        return;
    }
    warn!(
        cycles = report.cycle_count(),
        "dependency graph has cycles; run `deprank cycles` for details"
    );
}
