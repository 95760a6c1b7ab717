//! `deprank layers`: group nodes by level.
//!
//! On an acyclic map, the nodes of one layer never depend on each other, so
//! a layer is a batch that can be processed in parallel. With `--reverse` the
//! layers read as build waves: everything in a layer only needs earlier ones.

use std::io::{self, Write};

use anyhow::Result;
use deprank_core::Ranking;
use serde::Serialize;

use super::{GraphArgs, Settings, name_of, warn_on_cycles};
use crate::output::{pretty_section, render_mode};

#[derive(Debug, Serialize)]
struct LayersOutput {
    layers: Vec<LayerEntry>,
}

#[derive(Debug, Serialize)]
struct LayerEntry {
    level: usize,
    nodes: Vec<String>,
}

impl LayersOutput {
    fn from_ranking(ranking: &Ranking<'_, String>) -> Self {
        let graph = ranking.graph();
        let layers = ranking
            .layers()
            .into_iter()
            .map(|layer| LayerEntry {
                level: layer.level,
                nodes: layer
                    .nodes
                    .into_iter()
                    .map(|node| name_of(graph, node))
                    .collect(),
            })
            .collect();
        Self { layers }
    }
}

/// Execute `deprank layers`.
pub fn run_layers(args: &GraphArgs, settings: &Settings) -> Result<()> {
    let graph = args.load_graph(settings)?;
    let ranking = graph.rank();
    warn_on_cycles(&ranking);

    let payload = LayersOutput::from_ranking(&ranking);
    render_mode(
        settings.output,
        &payload,
        render_layers_text,
        render_layers_pretty,
    )
}

/// One line per layer: the level, then its members, tab-separated.
fn render_layers_text(payload: &LayersOutput, w: &mut dyn Write) -> io::Result<()> {
    for layer in &payload.layers {
        writeln!(w, "{}\t{}", layer.level, layer.nodes.join("\t"))?;
    }
    Ok(())
}

fn render_layers_pretty(payload: &LayersOutput, w: &mut dyn Write) -> io::Result<()> {
    if payload.layers.is_empty() {
        writeln!(w, "No nodes to rank.")?;
        return Ok(());
    }

    for (idx, layer) in payload.layers.iter().enumerate() {
        if idx > 0 {
            writeln!(w)?;
        }
        pretty_section(
            w,
            &format!("Level {} ({} nodes)", layer.level, layer.nodes.len()),
        )?;
        for name in &layer.nodes {
            writeln!(w, "  {name}")?;
        }
    }
    Ok(())
}
