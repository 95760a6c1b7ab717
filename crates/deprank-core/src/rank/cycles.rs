//! Cycle reporting over computed ranks.
//!
//! Nodes sharing a rank form one strongly connected component; a component
//! with more than one member is a dependency cycle. The report is advisory:
//! building it never changes ranks or order, and a cyclic graph still ranks.

use serde::Serialize;

use crate::graph::adjacency::Adjacency;
use crate::graph::model::NodeId;

/// One dependency cycle: the members of a multi-node component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    /// The component's shared rank.
    pub rank: usize,
    /// Members in input order.
    pub members: Vec<NodeId>,
}

impl Cycle {
    /// Number of members (always at least 2).
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`; present for API symmetry with [`len`](Self::len).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Cycles found while ranking, in final output order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Multi-node components, ordered by rank.
    pub cycles: Vec<Cycle>,
    /// Nodes with an edge to themselves, in input order.
    ///
    /// A self-loop alone does not make a cycle here; these are listed so
    /// callers can flag them.
    pub self_loops: Vec<NodeId>,
}

impl CycleReport {
    /// Group nodes by rank and keep the groups with more than one member.
    pub(crate) fn from_ranks(ranks: &[usize], adjacency: &Adjacency) -> Self {
        let mut groups: Vec<Vec<NodeId>> = vec![Vec::new(); ranks.len()];
        for (node, &rank) in ranks.iter().enumerate() {
            groups[rank].push(NodeId::from_index(node));
        }

        let cycles = groups
            .into_iter()
            .enumerate()
            .filter(|(_, members)| members.len() > 1)
            .map(|(rank, members)| Cycle { rank, members })
            .collect();

        let self_loops = (0..adjacency.len())
            .filter(|&node| adjacency.has_self_loop(node))
            .map(NodeId::from_index)
            .collect();

        Self { cycles, self_loops }
    }

    /// Number of multi-node cycles.
    #[must_use]
    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }

    /// Return `true` if no multi-node cycle was found.
    #[must_use]
    pub fn is_acyclic(&self) -> bool {
        self.cycles.is_empty()
    }

    /// The cycle containing `node`, if any.
    #[must_use]
    pub fn cycle_of(&self, node: NodeId) -> Option<&Cycle> {
        self.cycles
            .iter()
            .find(|cycle| cycle.members.binary_search(&node).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::DependencyGraph;

    fn adjacency(n: usize, edges: &[(usize, usize)]) -> Adjacency {
        let mut graph = DependencyGraph::new();
        for i in 0..n {
            graph.add_node(i);
        }
        for &(a, b) in edges {
            graph
                .add_edge(NodeId::from_index(a), NodeId::from_index(b))
                .expect("edge in range");
        }
        Adjacency::sorted(&graph)
    }

    #[test]
    fn distinct_ranks_have_no_cycles() {
        let report = CycleReport::from_ranks(&[0, 1, 2], &adjacency(3, &[(0, 1)]));
        assert!(report.is_acyclic());
        assert_eq!(report.cycle_count(), 0);
        assert!(report.self_loops.is_empty());
    }

    #[test]
    fn shared_ranks_are_grouped_in_input_order() {
        // Ranks: nodes 1 and 3 share 2, nodes 0 and 4 share 1.
        let report = CycleReport::from_ranks(&[1, 2, 0, 2, 1], &adjacency(5, &[]));
        assert_eq!(report.cycle_count(), 2);
        assert_eq!(report.cycles[0].rank, 1);
        assert_eq!(
            report.cycles[0].members,
            vec![NodeId::from_index(0), NodeId::from_index(4)]
        );
        assert_eq!(
            report.cycles[1].members,
            vec![NodeId::from_index(1), NodeId::from_index(3)]
        );
        assert_eq!(
            report.cycle_of(NodeId::from_index(3)).map(|c| c.rank),
            Some(2)
        );
        assert!(report.cycle_of(NodeId::from_index(2)).is_none());
    }

    #[test]
    fn self_loops_are_listed_separately() {
        let report = CycleReport::from_ranks(&[0, 1], &adjacency(2, &[(1, 1), (0, 1)]));
        assert!(report.is_acyclic(), "a self-loop is not a multi-node cycle");
        assert_eq!(report.self_loops, vec![NodeId::from_index(1)]);
    }
}
