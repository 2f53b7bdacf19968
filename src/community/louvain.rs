//! Louvain algorithm for community detection.
//!
//! Fast modularity optimization through local node moves and graph aggregation.
//!
//! ## The Algorithm (Blondel et al. 2008)
//!
//! Louvain is a multi-level, greedy modularity optimization algorithm:
//!
//! 1. **Phase 1 (Local Moving)**: Start with each node in its own community.
//!    Repeatedly move nodes to the neighboring community with the highest
//!    modularity gain until no move improves it.
//!
//! 2. **Phase 2 (Aggregation)**: Build a meta-graph where communities become
//!    single nodes. Edge weights are sums of edges between communities.
//!    Self-loops represent internal community edges.
//!
//! 3. **Iterate**: Repeat phases 1-2 on the meta-graph until modularity of the
//!    mapped-back partition stops improving.
//!
//! Louvain never re-examines a community once formed, so it can return
//! communities whose members have no path between them inside the community.
//! [`Leiden`](super::Leiden) adds a refinement phase for that.
//!
//! ## References
//!
//! Blondel et al. (2008). "Fast unfolding of communities in large networks."
//! Journal of Statistical Mechanics: Theory and Experiment, P10008.

use super::levels::{run_levels, Detection, Phases};
use super::traits::CommunityDetection;
use crate::error::Result;
use crate::graph::Graph;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Louvain community detection algorithm.
#[derive(Debug, Clone)]
pub struct Louvain {
    /// Seed for the node visiting order.
    seed: u64,
}

impl Louvain {
    /// Create a new Louvain detector with default settings.
    pub fn new() -> Self {
        Self { seed: 42 }
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for Louvain {
    fn default() -> Self {
        Self::new()
    }
}

impl CommunityDetection for Louvain {
    fn detect(&self, graph: &Graph) -> Result<Detection> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        run_levels(graph, Phases::Louvain, &mut rng)
    }
}

/// Run Louvain with default settings.
pub fn run_louvain(graph: &Graph) -> Result<Detection> {
    Louvain::new().detect(graph)
}
