//! The ranking pipeline.
//!
//! # Overview
//!
//! ```text
//! DependencyGraph
//!        ↓  Adjacency::sorted      (edges by target position, once)
//! sorted adjacency
//!        ↓  SccRanker::run         (iterative Pearce/Tarjan, reverse input order)
//! rank per node (shared within an SCC)
//!        ├─ CycleReport::from_ranks  (advisory, logged at debug)
//!        ↓  reorder::stable_order  (counting sort, ascending rank, stable)
//! final order
//!        ↓  levels::propagate      (single pass)
//! Ranking: (level, node) in final order
//! ```
//!
//! The whole pipeline is synchronous, linear in nodes + edges, and uses
//! `O(n)` pre-sized auxiliary memory. No native recursion is involved, so
//! deep chains and large cycles cannot exhaust the thread's stack.

pub mod cycles;
mod levels;
mod reorder;
mod scc;
mod stack;

pub use cycles::{Cycle, CycleReport};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::adjacency::Adjacency;
use crate::graph::model::{DependencyGraph, NodeId};

use self::scc::SccRanker;

/// One node's place in a [`Ranking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedNode {
    /// The node.
    pub node: NodeId,
    /// Longest dependency chain reaching this node from a node nothing
    /// depends on. Approximate inside cycles.
    pub level: usize,
    /// The node's component rank. Equal ranks mean the same SCC.
    pub rank: usize,
}

/// Nodes sharing one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    /// The shared level.
    pub level: usize,
    /// Members in final order.
    pub nodes: Vec<NodeId>,
}

/// Result of ranking a [`DependencyGraph`].
///
/// Borrows the graph so entries can be resolved back to payloads. The graph
/// itself is never modified.
#[derive(Debug, Clone)]
pub struct Ranking<'g, T> {
    graph: &'g DependencyGraph<T>,
    entries: Vec<RankedNode>,
    /// Final position of each node, indexed by node position.
    positions: Vec<usize>,
    cycles: CycleReport,
}

impl<'g, T> Ranking<'g, T> {
    /// Entries in final order: every node before the nodes it depends on,
    /// ties in input order.
    #[must_use]
    pub fn entries(&self) -> &[RankedNode] {
        &self.entries
    }

    /// `(level, payload)` pairs in final order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'g T)> + '_ {
        let graph = self.graph;
        self.entries.iter().filter_map(move |entry| {
            graph
                .payload(entry.node)
                .map(|payload| (entry.level, payload))
        })
    }

    /// Node ids in final order.
    pub fn order(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|entry| entry.node)
    }

    /// The cycle diagnostics gathered while ranking.
    #[must_use]
    pub const fn cycles(&self) -> &CycleReport {
        &self.cycles
    }

    /// The ranked graph.
    #[must_use]
    pub const fn graph(&self) -> &'g DependencyGraph<T> {
        self.graph
    }

    /// Level of `node`, or `None` if it is not part of the graph.
    #[must_use]
    pub fn level_of(&self, node: NodeId) -> Option<usize> {
        self.entry_of(node).map(|entry| entry.level)
    }

    /// Final position of `node`, or `None` if it is not part of the graph.
    #[must_use]
    pub fn position_of(&self, node: NodeId) -> Option<usize> {
        self.positions.get(node.index()).copied()
    }

    fn entry_of(&self, node: NodeId) -> Option<&RankedNode> {
        self.position_of(node).and_then(|pos| self.entries.get(pos))
    }

    /// Nodes grouped by level, lowest level first, empty levels skipped.
    ///
    /// Within a layer nodes keep their final order. On an acyclic graph no
    /// node in a layer depends on another node of the same or a later layer,
    /// so each layer can be processed in parallel once the layers before it
    /// are done (for a "needed by" graph, see
    /// [`DependencyGraph::reversed`]).
    #[must_use]
    pub fn layers(&self) -> Vec<Layer> {
        let order: Vec<usize> = self.order().map(NodeId::index).collect();
        let mut level_by_node = vec![0usize; self.entries.len()];
        for entry in &self.entries {
            level_by_node[entry.node.index()] = entry.level;
        }
        levels::layers(&order, &level_by_node)
            .into_iter()
            .map(|(level, nodes)| Layer {
                level,
                nodes: nodes.into_iter().map(NodeId::from_index).collect(),
            })
            .collect()
    }

    /// Number of ranked nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if the graph was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rank `graph`: order every node before its dependencies and assign levels.
///
/// Equal-rank nodes (members of one cycle) keep their input order. Cycles are
/// reported through [`Ranking::cycles`] and a `debug` log event; they never
/// cause a failure. An empty graph yields an empty ranking.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.len(), edges = graph.edge_count()))]
pub fn rank<T>(graph: &DependencyGraph<T>) -> Ranking<'_, T> {
    let adjacency = Adjacency::sorted(graph);
    let ranks = SccRanker::new(&adjacency).run();

    let cycles = CycleReport::from_ranks(&ranks, &adjacency);
    if !cycles.is_acyclic() || !cycles.self_loops.is_empty() {
        debug!(
            cycle_count = cycles.cycle_count(),
            self_loops = cycles.self_loops.len(),
            cycles = ?cycles.cycles,
            "dependency cycles detected"
        );
    }

    let order = reorder::stable_order(&ranks);
    let node_levels = levels::propagate(&order, &adjacency);

    let mut positions = vec![0usize; order.len()];
    let entries = order
        .iter()
        .enumerate()
        .map(|(pos, &node)| {
            positions[node] = pos;
            RankedNode {
                node: NodeId::from_index(node),
                level: node_levels[node],
                rank: ranks[node],
            }
        })
        .collect();

    Ranking {
        graph,
        entries,
        positions,
        cycles,
    }
}
