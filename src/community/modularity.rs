//! Modularity and the marginal gain of single-node moves.
//!
//! For a partition into communities `c`:
//!
//! ```text
//! Q = Σ_c [ Σin(c)/m − (Σdeg(c)/2m)² ]
//! ```
//!
//! where `Σin` is the weight of edges with both endpoints in `c` (self-loops
//! once), `Σdeg` the summed weighted degree of its members and `m` the total
//! edge weight. A graph with no edge weight has `Q = 0`.
//!
//! The gain of moving one node only touches the two communities involved, so
//! it is computed from their aggregates before and after the move rather than
//! from two global evaluations. Both routes agree to rounding.

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::partition::{CommunityId, Partition};
use std::collections::{BTreeMap, HashMap};

/// Summary of one community, derived from `(graph, partition, community)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CommunityAggregate {
    /// Sum of the weighted degrees of the members.
    pub degree_sum: f64,
    /// Weight of edges with both endpoints inside, self-loops once.
    pub internal_weight: f64,
}

impl CommunityAggregate {
    /// This community's term of `Q` in a graph of total weight `m`.
    pub fn contribution(&self, m: f64) -> f64 {
        let share = self.degree_sum / (2.0 * m);
        self.internal_weight / m - share * share
    }
}

/// Modularity of `partition` on `graph`.
///
/// Every graph node must be assigned; extra partition entries are ignored.
pub fn modularity(graph: &Graph, partition: &Partition) -> Result<f64> {
    let aggregates = community_aggregates(graph, partition)?;
    let m = graph.total_weight();
    if m == 0.0 {
        return Ok(0.0);
    }
    Ok(aggregates.values().map(|agg| agg.contribution(m)).sum())
}

/// Aggregate of one community, rescanning the graph.
pub fn community_aggregate(
    graph: &Graph,
    partition: &Partition,
    community: CommunityId,
) -> Result<CommunityAggregate> {
    let mut agg = CommunityAggregate::default();
    for node in graph.nodes() {
        if partition.community_of(node)? == community {
            agg.degree_sum += graph.weighted_degree(node)?;
        }
    }
    for (u, v, w) in graph.edges() {
        if partition.community_of(u)? == community && partition.community_of(v)? == community {
            agg.internal_weight += w;
        }
    }
    Ok(agg)
}

/// Change in modularity from moving `node` into `target`, all else fixed.
///
/// `0.0` when `target` is the node's current community or the graph has no
/// edge weight. `target` may be a community with no members yet.
pub fn delta_modularity(
    graph: &Graph,
    partition: &Partition,
    node: NodeId,
    target: CommunityId,
) -> Result<f64> {
    let current = partition.community_of(node)?;
    let m = graph.total_weight();
    if current == target || m == 0.0 {
        return Ok(0.0);
    }
    let links = NodeLinks::gather(graph, partition, node, current, target)?;
    let before_current = community_aggregate(graph, partition, current)?;
    let before_target = community_aggregate(graph, partition, target)?;
    Ok(links.gain(m, before_current, before_target))
}

/// Aggregates for every community that has a member in `graph`.
fn community_aggregates(
    graph: &Graph,
    partition: &Partition,
) -> Result<BTreeMap<CommunityId, CommunityAggregate>> {
    let mut table: BTreeMap<CommunityId, CommunityAggregate> = BTreeMap::new();
    for node in graph.nodes() {
        let community = partition.community_of(node)?;
        table.entry(community).or_default().degree_sum += graph.weighted_degree(node)?;
    }
    for (u, v, w) in graph.edges() {
        let cu = partition.community_of(u)?;
        if cu == partition.community_of(v)? {
            table.entry(cu).or_default().internal_weight += w;
        }
    }
    Ok(table)
}

/// How one node attaches to the two communities of a move.
#[derive(Debug, Clone, Copy)]
struct NodeLinks {
    degree: f64,
    to_current: f64,
    to_target: f64,
    self_loop: f64,
}

impl NodeLinks {
    fn gather(
        graph: &Graph,
        partition: &Partition,
        node: NodeId,
        current: CommunityId,
        target: CommunityId,
    ) -> Result<Self> {
        let mut links = NodeLinks {
            degree: graph.weighted_degree(node)?,
            to_current: 0.0,
            to_target: 0.0,
            self_loop: 0.0,
        };
        for (neighbor, w) in graph.neighbors(node)? {
            if neighbor == node {
                links.self_loop += w;
                continue;
            }
            let community = partition.community_of(neighbor)?;
            if community == current {
                links.to_current += w;
            } else if community == target {
                links.to_target += w;
            }
        }
        Ok(links)
    }

    /// Aggregates of `(current, target)` once the node has moved.
    fn after_move(
        &self,
        current: CommunityAggregate,
        target: CommunityAggregate,
    ) -> (CommunityAggregate, CommunityAggregate) {
        (
            CommunityAggregate {
                degree_sum: current.degree_sum - self.degree,
                internal_weight: current.internal_weight - self.to_current - self.self_loop,
            },
            CommunityAggregate {
                degree_sum: target.degree_sum + self.degree,
                internal_weight: target.internal_weight + self.to_target + self.self_loop,
            },
        )
    }

    fn gain(&self, m: f64, current: CommunityAggregate, target: CommunityAggregate) -> f64 {
        let before = current.contribution(m) + target.contribution(m);
        let (current_after, target_after) = self.after_move(current, target);
        let after = current_after.contribution(m) + target_after.contribution(m);
        after - before
    }
}

/// Per-community aggregates kept in step with a partition under single-node
/// moves, so each gain costs O(degree) instead of a community rescan.
#[derive(Debug, Clone)]
pub(crate) struct AggregateTable {
    total_weight: f64,
    aggregates: HashMap<CommunityId, CommunityAggregate>,
}

impl AggregateTable {
    pub(crate) fn build(graph: &Graph, partition: &Partition) -> Result<Self> {
        Ok(Self {
            total_weight: graph.total_weight(),
            aggregates: community_aggregates(graph, partition)?.into_iter().collect(),
        })
    }

    pub(crate) fn get(&self, community: CommunityId) -> CommunityAggregate {
        self.aggregates
            .get(&community)
            .copied()
            .unwrap_or_default()
    }

    /// Overwrite the aggregate of `community`.
    pub(crate) fn insert(&mut self, community: CommunityId, aggregate: CommunityAggregate) {
        let _ = self.aggregates.insert(community, aggregate);
    }

    /// Drop `community` from the table.
    pub(crate) fn remove(&mut self, community: CommunityId) {
        let _ = self.aggregates.remove(&community);
    }

    /// Same value as [`delta_modularity`] for the partition this table tracks.
    pub(crate) fn gain(
        &self,
        graph: &Graph,
        partition: &Partition,
        node: NodeId,
        target: CommunityId,
    ) -> Result<f64> {
        let current = partition.community_of(node)?;
        if current == target || self.total_weight == 0.0 {
            return Ok(0.0);
        }
        let links = NodeLinks::gather(graph, partition, node, current, target)?;
        Ok(links.gain(self.total_weight, self.get(current), self.get(target)))
    }

    /// Record the move of `node` into `target`. Call before updating the
    /// partition itself.
    pub(crate) fn move_node(
        &mut self,
        graph: &Graph,
        partition: &Partition,
        node: NodeId,
        target: CommunityId,
    ) -> Result<()> {
        let current = partition.community_of(node)?;
        if current == target {
            return Ok(());
        }
        let links = NodeLinks::gather(graph, partition, node, current, target)?;
        let (current_after, target_after) = links.after_move(self.get(current), self.get(target));
        let _ = self.aggregates.insert(current, current_after);
        let _ = self.aggregates.insert(target, target_after);
        Ok(())
    }
}
