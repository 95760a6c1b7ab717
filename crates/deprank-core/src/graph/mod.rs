//! Dependency graph model for ranking.
//!
//! # Overview
//!
//! A [`DependencyGraph`] is an arena of nodes. Each node carries an opaque
//! payload and an ordered list of outgoing edges; an edge `A → B` means
//! "A depends on B". A node's [`NodeId`] is its insertion position, which is
//! the `original_index` every stability guarantee of the ranking refers to.
//!
//! ## Construction
//!
//! ```text
//! add_node / add_edge            (checked, fail fast on foreign ids)
//! from_adjacency(entries)        (keyed, rejects duplicates and unknown deps)
//! from_digraph(&petgraph graph)  (node order = petgraph index order)
//! ```
//!
//! The graph is never mutated by ranking; the per-call sorted adjacency lives
//! in [`adjacency`] and is discarded with the [`Ranking`](crate::Ranking).

pub(crate) mod adjacency;
mod convert;
pub mod model;

pub use model::{DependencyGraph, MissingNodes, Node, NodeId};
