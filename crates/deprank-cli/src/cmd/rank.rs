//! `deprank rank`: print every node in dependency order with its level.

use std::io::{self, Write};

use anyhow::Result;
use deprank_core::Ranking;
use serde::Serialize;

use super::{GraphArgs, Settings, name_of, warn_on_cycles};
use crate::output::{pretty_kv, pretty_section, render_mode};

#[derive(Debug, Serialize)]
struct RankOutput {
    nodes: Vec<RankedEntry>,
    cycle_count: usize,
}

#[derive(Debug, Serialize)]
struct RankedEntry {
    name: String,
    level: usize,
    rank: usize,
    in_cycle: bool,
}

impl RankOutput {
    fn from_ranking(ranking: &Ranking<'_, String>) -> Self {
        let graph = ranking.graph();
        let report = ranking.cycles();
        let nodes = ranking
            .entries()
            .iter()
            .map(|entry| RankedEntry {
                name: name_of(graph, entry.node),
                level: entry.level,
                rank: entry.rank,
                in_cycle: report.cycle_of(entry.node).is_some(),
            })
            .collect();
        Self {
            nodes,
            cycle_count: report.cycle_count(),
        }
    }
}

/// Execute `deprank rank`.
pub fn run_rank(args: &GraphArgs, settings: &Settings) -> Result<()> {
    let graph = args.load_graph(settings)?;
    let ranking = graph.rank();
    warn_on_cycles(&ranking);

    let payload = RankOutput::from_ranking(&ranking);
    render_mode(settings.output, &payload, render_rank_text, render_rank_pretty)
}

fn render_rank_text(payload: &RankOutput, w: &mut dyn Write) -> io::Result<()> {
    for node in &payload.nodes {
        writeln!(w, "{}\t{}", node.level, node.name)?;
    }
    Ok(())
}

fn render_rank_pretty(payload: &RankOutput, w: &mut dyn Write) -> io::Result<()> {
    if payload.nodes.is_empty() {
        writeln!(w, "No nodes to rank.")?;
        return Ok(());
    }

    pretty_section(w, "Dependency order")?;
    let width = payload.nodes.len().to_string().len();
    for (pos, node) in payload.nodes.iter().enumerate() {
        let marker = if node.in_cycle { "  (cycle)" } else { "" };
        writeln!(
            w,
            "{:>width$}. level {:<3} {}{marker}",
            pos + 1,
            node.level,
            node.name
        )?;
    }

    writeln!(w)?;
    pretty_kv(w, "nodes", payload.nodes.len().to_string())?;
    pretty_kv(w, "cycles", payload.cycle_count.to_string())
}
