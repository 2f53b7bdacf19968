//! Community detection algorithms for graphs.
//!
//! Given a graph, find natural groupings where nodes within groups are
//! densely connected, and connections between groups are sparse.
//!
//! ## The Modularity Objective
//!
//! Both algorithms optimize **modularity** Q, which compares the weight of
//! edges inside communities to what a random graph with the same degree
//! sequence would put there:
//!
//! ```text
//! Q = Σ_c [ Σin(c)/m − (Σdeg(c)/2m)² ]
//! ```
//!
//! Where:
//! - m = total edge weight (sum of all edges)
//! - Σin(c) = weight of edges with both endpoints in community c
//! - Σdeg(c) = summed weighted degree of the nodes of c
//!
//! **Intuition**: a community scores when its internal weight exceeds the
//! share its degrees would attract by chance. A good partition has Q > 0.
//!
//! ## Algorithms
//!
//! Both are multilevel: optimize a partition on the working graph, collapse
//! each community into a super-node, repeat on the smaller graph. The result
//! is the best partition seen, mapped back to the input nodes, with the
//! modularity of every accepted level.
//!
//! ### Leiden
//!
//! The Leiden algorithm ([Traag et al. 2019](https://arxiv.org/abs/1810.08473))
//! adds a refinement step between local moving and aggregation.
//!
//! **Three phases**:
//! 1. **Local moving**: Greedily move nodes to improve modularity
//! 2. **Refinement**: Split communities whose nodes do not regroup on their own
//! 3. **Aggregation**: Contract graph, repeat
//!
//! ### Louvain
//!
//! The original fast modularity algorithm ([Blondel et al. 2008](https://arxiv.org/abs/0803.0476)).
//! Local moving and aggregation only.
//!
//! ## Usage
//!
//! ```rust
//! use commune::community::{CommunityDetection, Leiden};
//! use commune::Graph;
//!
//! // Two triangles with no edge between them
//! let graph = Graph::from_edges([
//!     (0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.0),
//!     (3, 4, 1.0), (4, 5, 1.0), (3, 5, 1.0),
//! ])?;
//!
//! let detection = Leiden::new().with_seed(7).detect(&graph)?;
//! assert_eq!(detection.community_count(), 2);
//! assert_eq!(detection.final_modularity(), Some(0.5));
//! # Ok::<(), commune::Error>(())
//! ```
//!
//! The phases are public too, for callers that want to drive their own loop:
//! [`local_moving`], [`refine`], [`aggregate`], plus [`modularity`] and
//! [`delta_modularity`].
//!
//! ## References
//!
//! - Traag, Waltman, van Eck (2019). "From Louvain to Leiden: guaranteeing
//!   well-connected communities." Scientific Reports 9, 5233.
//! - Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! - Newman & Girvan (2004). "Finding and evaluating community structure in networks."

mod aggregation;
mod leiden;
mod levels;
mod local_moving;
mod louvain;
pub(crate) mod modularity;
mod refinement;
mod traits;

pub use aggregation::aggregate;
pub use leiden::{run_leiden, Leiden};
pub use levels::Detection;
pub use local_moving::local_moving;
pub use louvain::{run_louvain, Louvain};
pub use modularity::{community_aggregate, delta_modularity, modularity, CommunityAggregate};
pub use refinement::refine;
pub use traits::CommunityDetection;
