//! `deprank cycles`: list dependency cycles (strongly connected components).

use std::io::{self, Write};

use anyhow::Result;
use deprank_core::Ranking;
use serde::Serialize;

use super::{GraphArgs, Settings, name_of};
use crate::output::render_mode;

#[derive(Debug, Serialize)]
struct CyclesOutput {
    cycles: Vec<Vec<String>>,
    self_loops: Vec<String>,
}

impl CyclesOutput {
    fn from_ranking(ranking: &Ranking<'_, String>) -> Self {
        let graph = ranking.graph();
        let report = ranking.cycles();
        Self {
            cycles: report
                .cycles
                .iter()
                .map(|cycle| cycle.members.iter().map(|&node| name_of(graph, node)).collect())
                .collect(),
            self_loops: report
                .self_loops
                .iter()
                .map(|&node| name_of(graph, node))
                .collect(),
        }
    }
}

/// Execute `deprank cycles`.
pub fn run_cycles(args: &GraphArgs, settings: &Settings) -> Result<()> {
    let graph = args.load_graph(settings)?;
    let ranking = graph.rank();

    let payload = CyclesOutput::from_ranking(&ranking);
    render_mode(
        settings.output,
        &payload,
        render_cycles_text,
        render_cycles_human,
    )
}

fn render_cycles_text(payload: &CyclesOutput, w: &mut dyn Write) -> io::Result<()> {
    for cycle in &payload.cycles {
        writeln!(w, "cycle\t{}", cycle.join("\t"))?;
    }
    for name in &payload.self_loops {
        writeln!(w, "self-loop\t{name}")?;
    }
    Ok(())
}

fn render_cycles_human(payload: &CyclesOutput, w: &mut dyn Write) -> io::Result<()> {
    if payload.cycles.is_empty() {
        writeln!(w, "No dependency cycles found.")?;
    } else {
        writeln!(w, "Dependency cycles ({})", payload.cycles.len())?;

        for (idx, cycle) in payload.cycles.iter().enumerate() {
            writeln!(w, "\nCycle {}:", idx + 1)?;
            for name in cycle {
                writeln!(w, "  - {name}")?;
            }
        }
    }

    if !payload.self_loops.is_empty() {
        writeln!(w, "\nSelf-dependencies ({}):", payload.self_loops.len())?;
        for name in &payload.self_loops {
            writeln!(w, "  - {name}")?;
        }
    }

    Ok(())
}
