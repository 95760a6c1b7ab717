//! Nodes, ids and the graph arena.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::rank::{Ranking, rank};

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Position of a node in its graph's input order.
///
/// Assigned once by [`DependencyGraph::add_node`] and never changed. This is
/// the tie-break key for every ordering the ranking produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw position. Ids are only meaningful for the graph that issued
    /// them; [`DependencyGraph::add_edge`] rejects positions it does not hold.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// The node's original input position.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A node: opaque payload plus outgoing "depends on" edges in caller order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    payload: T,
    edges: Vec<NodeId>,
}

impl<T> Node<T> {
    /// The caller-supplied payload.
    #[must_use]
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    /// Outgoing edges in the order they were added.
    ///
    /// Self-loops and duplicates are kept as given.
    #[must_use]
    pub fn edges(&self) -> &[NodeId] {
        &self.edges
    }
}

// ---------------------------------------------------------------------------
// DependencyGraph
// ---------------------------------------------------------------------------

/// How [`DependencyGraph::from_adjacency_with`] treats dependencies that were
/// never declared as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingNodes {
    /// Fail with [`GraphError::UnknownDependency`].
    #[default]
    Reject,
    /// Append the dependency as a new node after every declared node, in
    /// first-reference order.
    Append,
}

/// A directed "depends on" graph with stable node positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph<T> {
    nodes: Vec<Node<T>>,
    edge_count: usize,
}

impl<T> Default for DependencyGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DependencyGraph<T> {
    /// Create an empty graph.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edge_count: 0,
        }
    }

    /// Create an empty graph with room for `nodes` nodes.
    #[must_use]
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edge_count: 0,
        }
    }

    /// Append a node and return its id (its position in input order).
    pub fn add_node(&mut self, payload: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            payload,
            edges: Vec::new(),
        });
        id
    }

    /// Add the edge `from → to` ("`from` depends on `to`").
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EdgeOutOfBounds`] if either endpoint is not a
    /// node of this graph. The graph is left unchanged in that case.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let len = self.nodes.len();
        if from.0 >= len || to.0 >= len {
            return Err(GraphError::EdgeOutOfBounds {
                from: from.0,
                to: to.0,
                len,
            });
        }
        self.push_edge(from, to);
        Ok(())
    }

    /// Add an edge whose endpoints are already known to be in range.
    pub(super) fn push_edge(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from.0].edges.push(to);
        self.edge_count += 1;
    }

    /// Look up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Look up a node's payload by id.
    #[must_use]
    pub fn payload(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(Node::payload)
    }

    /// All nodes in input order.
    #[must_use]
    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// Iterate `(id, payload)` in input order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId(idx), &node.payload))
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges, counting duplicates and self-loops.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Rank this graph. Shorthand for [`rank`](crate::rank::rank).
    #[must_use]
    pub fn rank(&self) -> Ranking<'_, T> {
        rank(self)
    }

    /// Return a copy with every edge flipped and node order unchanged.
    ///
    /// Ranking a "depends on" graph puts dependents first; ranking its
    /// reverse puts dependencies first, which is the order to build in.
    #[must_use]
    pub fn reversed(&self) -> Self
    where
        T: Clone,
    {
        let mut reversed = Self::with_capacity(self.nodes.len());
        for node in &self.nodes {
            reversed.add_node(node.payload.clone());
        }
        for (from, node) in self.nodes.iter().enumerate() {
            for &to in &node.edges {
                reversed.push_edge(to, NodeId(from));
            }
        }
        reversed
    }
}

impl<K> DependencyGraph<K>
where
    K: Eq + Hash + Clone + fmt::Display,
{
    /// Build a graph from `(key, dependencies)` entries.
    ///
    /// Node order is entry order. Every dependency must name a declared key.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateNode`] if a key is declared twice.
    /// - [`GraphError::UnknownDependency`] if a dependency is not declared.
    pub fn from_adjacency<I, D>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, D)>,
        D: IntoIterator<Item = K>,
    {
        Self::from_adjacency_with(entries, MissingNodes::Reject)
    }

    /// Like [`from_adjacency`](Self::from_adjacency), with a policy for
    /// undeclared dependencies.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateNode`] if a key is declared twice.
    /// - [`GraphError::UnknownDependency`] if a dependency is not declared and
    ///   `missing` is [`MissingNodes::Reject`].
    pub fn from_adjacency_with<I, D>(entries: I, missing: MissingNodes) -> Result<Self>
    where
        I: IntoIterator<Item = (K, D)>,
        D: IntoIterator<Item = K>,
    {
        let entries: Vec<(K, Vec<K>)> = entries
            .into_iter()
            .map(|(key, deps)| (key, deps.into_iter().collect()))
            .collect();

        let mut graph = Self::with_capacity(entries.len());
        let mut index: HashMap<K, NodeId> = HashMap::with_capacity(entries.len());

        // Pass 1: every declared key becomes a node, in entry order.
        for (key, _) in &entries {
            if index.contains_key(key) {
                return Err(GraphError::DuplicateNode(key.to_string()));
            }
            let id = graph.add_node(key.clone());
            index.insert(key.clone(), id);
        }

        // Pass 2: wire edges. Declared ids are all known at this point.
        for (node_pos, (key, deps)) in entries.into_iter().enumerate() {
            let from = NodeId(node_pos);
            for dep in deps {
                let to = if let Some(&id) = index.get(&dep) {
                    id
                } else {
                    match missing {
                        MissingNodes::Reject => {
                            return Err(GraphError::UnknownDependency {
                                node: key.to_string(),
                                dependency: dep.to_string(),
                            });
                        }
                        MissingNodes::Append => {
                            debug!(node = %key, dependency = %dep, "appending undeclared dependency");
                            let id = graph.add_node(dep.clone());
                            index.insert(dep, id);
                            id
                        }
                    }
                };
                graph.push_edge(from, to);
            }
        }

        Ok(graph)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
