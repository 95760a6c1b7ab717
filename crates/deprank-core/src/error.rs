//! Errors raised while building a [`DependencyGraph`](crate::DependencyGraph).
//!
//! Ranking has no failure mode of its own. Everything here is an integration
//! error on the caller's side, reported before any ranking work starts.

/// Convenience alias for graph construction results.
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// A malformed graph description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge endpoint does not name a node of this graph.
    #[error("edge {from} -> {to} references a node outside the graph ({len} nodes)")]
    EdgeOutOfBounds {
        /// Source position of the rejected edge.
        from: usize,
        /// Target position of the rejected edge.
        to: usize,
        /// Number of nodes in the graph when the edge was added.
        len: usize,
    },

    /// The same key was declared twice in an adjacency description.
    #[error("node `{0}` is declared more than once")]
    DuplicateNode(String),

    /// A dependency names a key that was never declared.
    #[error("`{node}` depends on undeclared node `{dependency}`")]
    UnknownDependency {
        /// The declaring node.
        node: String,
        /// The missing dependency.
        dependency: String,
    },
}
