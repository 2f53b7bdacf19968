//! # commune
//!
//! Multilevel modularity optimization on weighted undirected graphs: Louvain
//! (local moving + aggregation) and Leiden (local moving + refinement +
//! aggregation).
//!
//! Everything is single-threaded and deterministic for a given seed. Progress
//! is reported through the [`log`] facade; install any logger to see it.
//!
//! ```rust
//! use commune::{run_louvain, Graph};
//!
//! let graph = Graph::from_edges([(0, 1, 1.0), (2, 3, 1.0)])?;
//! let detection = run_louvain(&graph)?;
//!
//! let p = detection.partition();
//! assert_eq!(p.get(0), p.get(1));
//! assert_ne!(p.get(0), p.get(2));
//! assert_eq!(detection.modularity_history(), &[0.5]);
//! # Ok::<(), commune::Error>(())
//! ```

pub mod community;
/// Error types used across `commune`.
pub mod error;
pub mod graph;
pub mod partition;

#[cfg(test)]
mod community_tests;

pub use community::{run_leiden, run_louvain, CommunityDetection, Detection, Leiden, Louvain};
pub use error::{Error, Result};
pub use graph::{Graph, NodeId};
pub use partition::{CommunityId, Partition};
