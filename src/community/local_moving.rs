//! Greedy local moving.
//!
//! Sweeps the nodes in random order, moving each to the neighboring community
//! with the largest positive modularity gain, until a full sweep moves
//! nothing. Moves apply immediately, so later nodes in a sweep see them.

use super::modularity::AggregateTable;
use crate::error::Result;
use crate::graph::Graph;
use crate::partition::{CommunityId, Partition};
use log::debug;
use rand::prelude::*;
use std::collections::HashSet;

/// Run local moving to a fixed point.
///
/// `adjacency` supplies the nodes to visit and, through their neighbors, the
/// candidate communities. `reference` is the graph gains are measured on; it
/// may be larger than `adjacency` (refinement passes an induced subgraph
/// here). `start` must assign every node of both graphs.
///
/// Ties between candidates go to the first one encountered. Returns a new
/// partition; `start` is left as is.
pub fn local_moving<R>(
    adjacency: &Graph,
    reference: &Graph,
    start: &Partition,
    rng: &mut R,
) -> Result<Partition>
where
    R: Rng + ?Sized,
{
    let mut partition = start.clone();
    let mut table = AggregateTable::build(reference, &partition)?;
    settle(adjacency, reference, &mut partition, &mut table, rng)?;
    Ok(partition)
}

/// Local moving on a caller-owned partition and the table tracking it.
///
/// `table` must describe `partition` on `reference` and is kept in step
/// with every move.
pub(crate) fn settle<R>(
    adjacency: &Graph,
    reference: &Graph,
    partition: &mut Partition,
    table: &mut AggregateTable,
    rng: &mut R,
) -> Result<()>
where
    R: Rng + ?Sized,
{
    let mut order: Vec<_> = adjacency.nodes().collect();
    let mut sweeps = 0usize;
    let mut moves = 0usize;

    loop {
        sweeps += 1;
        order.shuffle(rng);
        let mut improved = false;

        for &node in &order {
            let current = partition.community_of(node)?;

            // Distinct neighboring communities, in encounter order
            let mut seen: HashSet<CommunityId> = HashSet::new();
            let mut candidates: Vec<CommunityId> = Vec::new();
            for (neighbor, _) in adjacency.neighbors(node)? {
                let community = partition.community_of(neighbor)?;
                if community != current && seen.insert(community) {
                    candidates.push(community);
                }
            }

            let mut best_community = current;
            let mut best_gain = 0.0;
            for community in candidates {
                let gain = table.gain(reference, partition, node, community)?;
                if gain > best_gain {
                    best_gain = gain;
                    best_community = community;
                }
            }

            if best_gain > 0.0 {
                table.move_node(reference, partition, node, best_community)?;
                partition.assign(node, best_community);
                improved = true;
                moves += 1;
            }
        }

        if !improved {
            break;
        }
    }

    debug!(
        "local moving: {} nodes settled after {} sweeps, {} moves",
        order.len(),
        sweeps,
        moves
    );
    Ok(())
}
