//! Level propagation over the final order.
//!
//! One pass: every node pushes `level + 1` to each of its edge targets.
//! Because the order places a node before everything it depends on, a node's
//! level is final by the time it is visited wherever the graph is acyclic, so
//! the result is the longest dependency chain reaching each node.
//!
//! Inside a cycle there is no such order; members get whatever the single
//! pass produces under the input-order tie-break. No extra passes are made.
//! Self-loops are skipped so they never raise a node's own level.

use crate::graph::adjacency::Adjacency;

/// Compute levels, indexed by node position, by walking `order` once.
pub(crate) fn propagate(order: &[usize], adjacency: &Adjacency) -> Vec<usize> {
    let mut levels = vec![0usize; adjacency.len()];
    for &node in order {
        let next = levels[node] + 1;
        for &target in adjacency.targets(node) {
            if target != node && levels[target] < next {
                levels[target] = next;
            }
        }
    }
    levels
}

/// Group `order` by level: ascending level, each group in `order` order.
///
/// Levels with no nodes are skipped. That only happens inside cycles, where
/// a member can be raised past the level it handed to its successor.
pub(crate) fn layers(order: &[usize], levels: &[usize]) -> Vec<(usize, Vec<usize>)> {
    let depth = levels.iter().copied().max().map_or(0, |max| max + 1);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); depth];
    for &node in order {
        layers[levels[node]].push(node);
    }
    layers
        .into_iter()
        .enumerate()
        .filter(|(_, nodes)| !nodes.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::{DependencyGraph, NodeId};

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
    fn longest_chain_wins() {
        // 0 → 1 → 2 and the shortcut 0 → 2.
        let adj = adjacency(3, &[(0, 1), (1, 2), (0, 2)]);
        assert_eq!(propagate(&[0, 1, 2], &adj), vec![0, 1, 2]);
    }

    #[test]
    fn self_loop_does_not_raise_level() {
        let adj = adjacency(2, &[(0, 0), (0, 1), (1, 1)]);
        assert_eq!(propagate(&[0, 1], &adj), vec![0, 1]);
    }

    #[test]
    fn duplicate_edges_are_harmless() {
        let adj = adjacency(2, &[(0, 1), (0, 1)]);
        assert_eq!(propagate(&[0, 1], &adj), vec![0, 1]);
    }

    #[test]
    fn layers_group_by_level_in_order() {
        let order = [3, 0, 2, 1];
        let levels = [1, 2, 1, 0];
        assert_eq!(
            layers(&order, &levels),
            vec![(0, vec![3]), (1, vec![0, 2]), (2, vec![1])]
        );
    }

    #[test]
    fn cycles_can_leave_level_gaps() {
        // 0 → 1 ⇄ 2, ordered [0, 1, 2]: 1 gets 1, 2 gets 2, then 1 is raised to 3.
        let adj = adjacency(3, &[(0, 1), (1, 2), (2, 1)]);
        let levels = propagate(&[0, 1, 2], &adj);
        assert_eq!(levels, vec![0, 3, 2]);
        assert_eq!(
            layers(&[0, 1, 2], &levels),
            vec![(0, vec![0]), (2, vec![2]), (3, vec![1])]
        );
    }

    #[test]
    fn layers_of_nothing() {
        assert!(layers(&[], &[]).is_empty());
    }
}
