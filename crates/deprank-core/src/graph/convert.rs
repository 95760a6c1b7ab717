//! Conversion from petgraph graphs.

use petgraph::graph::{DiGraph, IndexType};
use petgraph::visit::EdgeRef;

use crate::graph::model::{DependencyGraph, NodeId};

impl<N: Clone> DependencyGraph<N> {
    /// Copy a petgraph [`DiGraph`] into a dependency graph.
    ///
    /// Node order follows petgraph's node indices, so `NodeIndex(i)` becomes
    /// the node at position `i`. Edge weights are dropped; parallel edges and
    /// self-loops are kept.
    #[must_use]
    pub fn from_digraph<E, Ix: IndexType>(graph: &DiGraph<N, E, Ix>) -> Self {
        let mut out = Self::with_capacity(graph.node_count());
        for weight in graph.node_weights() {
            out.add_node(weight.clone());
        }
        for edge in graph.edge_references() {
            out.push_edge(
                NodeId::from_index(edge.source().index()),
                NodeId::from_index(edge.target().index()),
            );
        }
        out
    }
}
