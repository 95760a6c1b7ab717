//! Iterative strongly connected components ranking.
//!
//! # Algorithm
//!
//! Pearce's space-efficient variant of Tarjan's algorithm, with the recursion
//! replaced by an explicit call stack of `(node, edge cursor)` frames.
//!
//! A single `rindex` array plays two roles:
//!
//! - while a node is open it holds its discovery index, later lowered to the
//!   smallest index reachable from it (its low-link);
//! - once the node's component is complete it holds the component's rank.
//!
//! Discovery indices count up from 1 and are released as components close,
//! while ranks count down from `n - 1`. A finished node therefore always
//! compares greater than any open node and never lowers a low-link, which is
//! what lets one array replace Tarjan's separate `on_stack` set.
//!
//! Nodes are walked from the highest position down and each node's edges in
//! ascending target position, so the ranks, and everything derived from them,
//! depend only on the graph and its input order.
//!
//! # Output
//!
//! One rank per node. Members of an SCC share a rank. If component `X` has an
//! edge into component `Y`, then `rank(X) < rank(Y)`: `Y` is completed first
//! and takes the larger value.

use fixedbitset::FixedBitSet;

use crate::graph::adjacency::Adjacency;
use crate::rank::stack::DualStack;

/// `rindex` value of a node the walk has not reached yet.
const UNVISITED: usize = 0;

pub(crate) struct SccRanker<'a> {
    adjacency: &'a Adjacency,
    rindex: Vec<usize>,
    /// Nodes that may still head their own component.
    root: FixedBitSet,
    /// Next discovery index.
    index: usize,
    /// Rank handed to the next completed component.
    component: usize,
    /// Front: open nodes (call stack). Back: nodes awaiting their root.
    vertices: DualStack<usize>,
    /// Edge cursor of each frame on the call stack, parallel to the front.
    cursors: Vec<usize>,
}

impl<'a> SccRanker<'a> {
    pub(crate) fn new(adjacency: &'a Adjacency) -> Self {
        let n = adjacency.len();
        Self {
            adjacency,
            rindex: vec![UNVISITED; n],
            root: FixedBitSet::with_capacity(n),
            index: 1,
            component: n.saturating_sub(1),
            vertices: DualStack::with_capacity(n),
            cursors: Vec::with_capacity(n),
        }
    }

    /// Walk the whole graph and return each node's rank, indexed by position.
    pub(crate) fn run(mut self) -> Vec<usize> {
        // Highest position first.
        for v in (0..self.adjacency.len()).rev() {
            if self.rindex[v] == UNVISITED {
                self.visit(v);
            }
        }
        self.rindex
    }

    fn visit(&mut self, start: usize) {
        self.begin_visiting(start);
        loop {
            let (Some(v), Some(&cursor)) = (self.vertices.peek_front(), self.cursors.last()) else {
                break;
            };
            self.resume(v, cursor);
        }
    }

    /// Continue `v`'s edge scan at `cursor` until it either descends into an
    /// undiscovered node or runs out of edges.
    fn resume(&mut self, v: usize, mut cursor: usize) {
        let adjacency = self.adjacency;
        let targets = adjacency.targets(v);

        while cursor <= targets.len() {
            if cursor > 0 {
                // Fold in the edge scanned last (and any descent through it).
                self.finish_edge(v, targets[cursor - 1]);
            }
            if cursor < targets.len() && self.begin_edge(targets[cursor], cursor) {
                return;
            }
            cursor += 1;
        }

        self.finish_visiting(v);
    }

    fn begin_visiting(&mut self, v: usize) {
        self.vertices.push_front(v);
        self.cursors.push(0);
        self.root.insert(v);
        self.rindex[v] = self.index;
        self.index += 1;
    }

    /// Descend into `w` if it is undiscovered. The current frame resumes at
    /// `k + 1`, which folds edge `k` back in first.
    fn begin_edge(&mut self, w: usize, k: usize) -> bool {
        if self.rindex[w] != UNVISITED {
            return false;
        }
        if let Some(cursor) = self.cursors.last_mut() {
            *cursor = k + 1;
        }
        self.begin_visiting(w);
        true
    }

    fn finish_edge(&mut self, v: usize, w: usize) {
        if self.rindex[w] < self.rindex[v] {
            self.rindex[v] = self.rindex[w];
            self.root.set(v, false);
        }
    }

    fn finish_visiting(&mut self, v: usize) {
        self.vertices.pop_front();
        self.cursors.pop();

        if !self.root.contains(v) {
            self.vertices.push_back(v);
            return;
        }

        // `v` heads a component: claim every waiting node discovered after it.
        self.index -= 1;
        while let Some(w) = self.vertices.peek_back() {
            if self.rindex[v] > self.rindex[w] {
                break;
            }
            self.vertices.pop_back();
            self.rindex[w] = self.component;
            self.index -= 1;
        }
        self.rindex[v] = self.component;
        self.component = self.component.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::{DependencyGraph, NodeId};

    fn ranks(n: usize, edges: &[(usize, usize)]) -> Vec<usize> {
        let mut graph = DependencyGraph::new();
        for i in 0..n {
            graph.add_node(i);
        }
        for &(a, b) in edges {
            graph
                .add_edge(NodeId::from_index(a), NodeId::from_index(b))
                .expect("edge in range");
        }
        let adjacency = Adjacency::sorted(&graph);
        SccRanker::new(&adjacency).run()
    }

    #[test]
    fn empty_graph() {
        assert!(ranks(0, &[]).is_empty());
    }

    #[test]
    fn chain_ranks_follow_edges() {
        // 0 → 1 → 2
        assert_eq!(ranks(3, &[(0, 1), (1, 2)]), vec![0, 1, 2]);
    }

    #[test]
    fn isolated_nodes_rank_by_position() {
        assert_eq!(ranks(3, &[]), vec![0, 1, 2]);
    }

    #[test]
    fn two_cycle_shares_one_rank() {
        let r = ranks(2, &[(0, 1), (1, 0)]);
        assert_eq!(r[0], r[1]);
        assert_eq!(r[0], 1);
    }

    #[test]
    fn self_loop_is_a_singleton_component() {
        let r = ranks(2, &[(0, 0), (0, 1)]);
        assert!(r[0] < r[1]);
    }

    #[test]
    fn cycle_with_tail_and_entry() {
        // 0 → 1 ⇄ 2 → 3
        let r = ranks(4, &[(0, 1), (1, 2), (2, 1), (2, 3)]);
        assert_eq!(r[1], r[2], "1 and 2 form a cycle");
        assert!(r[0] < r[1], "0 depends on the cycle");
        assert!(r[1] < r[3], "the cycle depends on 3");
    }

    #[test]
    fn nested_cycles_collapse_into_one_component() {
        // 0 → 1 → 2 → 0 and 2 → 3 → 2
        let r = ranks(4, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 2)]);
        assert!(r.iter().all(|&x| x == r[0]), "all four mutually reachable: {r:?}");
    }

    #[test]
    fn ranks_stay_in_range() {
        let edges = [(0, 3), (3, 1), (1, 0), (2, 4), (4, 4), (5, 2)];
        let r = ranks(6, &edges);
        assert!(r.iter().all(|&x| x < 6), "ranks out of range: {r:?}");
    }
}
