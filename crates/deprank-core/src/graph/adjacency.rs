//! Per-call sorted adjacency in compressed sparse row form.
//!
//! Layout:
//! - `offsets`: length `n + 1`, `offsets[v]..offsets[v + 1]` spans `v`'s edges
//! - `targets`: edge targets as raw positions, sorted ascending per node
//!
//! Sorting by target position is what fixes the walk's descent order and so
//! the final ordering. It is done once, before the walk, on a copy; the
//! caller's edge order is never touched.

use crate::graph::model::DependencyGraph;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Adjacency {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl Adjacency {
    /// Snapshot `graph`'s edges, each node's targets sorted by position.
    pub(crate) fn sorted<T>(graph: &DependencyGraph<T>) -> Self {
        let mut offsets = Vec::with_capacity(graph.len() + 1);
        let mut targets = Vec::with_capacity(graph.edge_count());
        offsets.push(0);

        for node in graph.nodes() {
            let start = targets.len();
            targets.extend(node.edges().iter().map(|id| id.index()));
            targets[start..].sort_unstable();
            offsets.push(targets.len());
        }

        Self { offsets, targets }
    }

    /// Number of nodes.
    pub(crate) fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Sorted edge targets of `node`.
    pub(crate) fn targets(&self, node: usize) -> &[usize] {
        &self.targets[self.offsets[node]..self.offsets[node + 1]]
    }

    pub(crate) fn has_self_loop(&self, node: usize) -> bool {
        self.targets(node).binary_search(&node).is_ok()
    }
}
