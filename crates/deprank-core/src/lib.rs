#![forbid(unsafe_code)]
//! deprank-core library.
//!
//! Computes a stable dependency ranking over a directed graph: a total order
//! in which every node precedes the nodes it depends on (ties broken by input
//! order), plus a per-node level giving the longest dependency chain that
//! reaches it. Cycles are tolerated and reported, never rejected.
//!
//! # Conventions
//!
//! - **Errors**: Graph construction returns [`error::Result`]; ranking itself
//!   cannot fail on a well-formed graph.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! # Typical Usage
//!
//! ```rust
//! use deprank_core::DependencyGraph;
//!
//! let graph = DependencyGraph::from_adjacency([
//!     ("app", vec!["lib"]),
//!     ("lib", vec!["libc"]),
//!     ("libc", vec![]),
//! ])?;
//!
//! let ranking = graph.rank();
//! let ordered: Vec<(usize, &str)> = ranking.iter().map(|(lvl, name)| (lvl, *name)).collect();
//! assert_eq!(ordered, vec![(0, "app"), (1, "lib"), (2, "libc")]);
//! # Ok::<(), deprank_core::GraphError>(())
//! ```

pub mod error;
pub mod graph;
pub mod rank;

pub use error::{GraphError, Result};
pub use graph::{DependencyGraph, MissingNodes, Node, NodeId};
pub use rank::{Cycle, CycleReport, Layer, RankedNode, Ranking, rank};
