//! The multilevel loop shared by Louvain and Leiden.
//!
//! Each level starts from singletons on the working graph, runs local moving
//! (and refinement, for Leiden), maps the result back onto the original nodes
//! and scores it on the original graph. A level is kept only if it beats the
//! best score so far; a kept level is aggregated into the next working graph.
//! The loop ends when a level fails to improve or aggregation no longer
//! shrinks the graph.

use super::aggregation::aggregate;
use super::local_moving::local_moving;
use super::modularity::modularity;
use super::refinement::refine;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::partition::{CommunityId, Partition};
use log::info;
use rand::Rng;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Outcome of a detection run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detection {
    partition: Partition,
    modularity_history: Vec<f64>,
}

impl Detection {
    /// Best partition found, over the nodes of the input graph.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Modularity of each accepted level, strictly increasing.
    pub fn modularity_history(&self) -> &[f64] {
        &self.modularity_history
    }

    /// Modularity of the returned partition.
    pub fn final_modularity(&self) -> Option<f64> {
        self.modularity_history.last().copied()
    }

    /// Number of communities in the returned partition.
    pub fn community_count(&self) -> usize {
        self.partition.community_count()
    }

    /// Members of each community.
    pub fn communities(&self) -> BTreeMap<CommunityId, Vec<NodeId>> {
        self.partition.groups()
    }

    /// Split into partition and history.
    pub fn into_parts(self) -> (Partition, Vec<f64>) {
        (self.partition, self.modularity_history)
    }
}

/// Which phases run at each level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phases {
    /// Local moving, aggregation.
    Louvain,
    /// Local moving, refinement, aggregation.
    Leiden,
}

impl Phases {
    fn name(self) -> &'static str {
        match self {
            Phases::Louvain => "louvain",
            Phases::Leiden => "leiden",
        }
    }
}

pub(crate) fn run_levels<R>(graph: &Graph, phases: Phases, rng: &mut R) -> Result<Detection>
where
    R: Rng + ?Sized,
{
    if graph.node_count() == 0 {
        return Err(Error::EmptyInput);
    }

    let mut best_partition = Partition::singletons(graph.nodes());
    let mut best_modularity = -1.0;
    let mut history = Vec::new();
    // Original node -> id it plays in the working graph
    let mut level_mapping = best_partition.clone();
    let mut current: Cow<'_, Graph> = Cow::Borrowed(graph);

    for level in 0usize.. {
        info!(
            "{}: level {} on {} nodes, {} edges",
            phases.name(),
            level,
            current.node_count(),
            current.edge_count()
        );

        let start = Partition::singletons(current.nodes());
        let mut local = local_moving(&current, &current, &start, rng)?;
        if phases == Phases::Leiden {
            local = refine(&current, &local, rng)?;
        }

        let mapped = level_mapping.compose(&local)?;
        let q = modularity(graph, &mapped)?;
        info!(
            "{}: level {} modularity {:.6} with {} communities",
            phases.name(),
            level,
            q,
            local.community_count()
        );

        if q <= best_modularity {
            info!("{}: modularity did not improve, stopping", phases.name());
            break;
        }

        best_modularity = q;
        history.push(q);
        level_mapping = mapped.clone();
        best_partition = mapped;

        let coarse = aggregate(&current, &local)?;
        if coarse.node_count() == current.node_count() {
            info!("{}: aggregation no longer shrinks the graph, stopping", phases.name());
            break;
        }
        current = Cow::Owned(coarse);
    }

    Ok(Detection {
        partition: best_partition,
        modularity_history: history,
    })
}
