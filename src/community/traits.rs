//! Community detection traits.

use super::levels::Detection;
use crate::error::Result;
use crate::graph::Graph;
use petgraph::graph::UnGraph;

/// Trait for community detection algorithms.
pub trait CommunityDetection {
    /// Detect communities in a graph.
    ///
    /// Returns the best partition over the graph's nodes together with the
    /// modularity of each accepted level.
    fn detect(&self, graph: &Graph) -> Result<Detection>;

    /// Detect communities in a petgraph `UnGraph`; node ids in the result are
    /// node indices.
    fn detect_ungraph<N>(&self, graph: &UnGraph<N, f64>) -> Result<Detection>
    where
        Self: Sized,
    {
        self.detect(&Graph::from_ungraph(graph)?)
    }
}
