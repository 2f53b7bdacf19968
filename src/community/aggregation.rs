//! Aggregation: collapse each community into one super-node.
//!
//! Edge weights between communities are summed; edges inside a community
//! accumulate onto a self-loop on its super-node. Total weight is preserved,
//! and with the self-loop convention of [`Graph`] so is modularity: a
//! partition of the coarse graph scores the same as the fine partition it
//! stands for.

use crate::error::Result;
use crate::graph::Graph;
use crate::partition::Partition;

/// Build the next-level graph from `graph` and a partition of its nodes.
///
/// Super-nodes are named by community id and appear in first-seen order over
/// `graph`'s nodes.
pub fn aggregate(graph: &Graph, partition: &Partition) -> Result<Graph> {
    let mut coarse = Graph::new();
    for node in graph.nodes() {
        coarse.add_node(partition.community_of(node)?);
    }
    for (u, v, w) in graph.edges() {
        let cu = partition.community_of(u)?;
        let cv = partition.community_of(v)?;
        coarse.accumulate_edge(cu, cv, w);
    }
    Ok(coarse)
}
