//! Refinement: the cohesion check that separates Leiden from Louvain.
//!
//! Each community found by local moving is dissolved into singletons and
//! re-merged with local moving restricted to the community's own induced
//! subgraph, while gains are still measured on the whole graph. If the
//! members come back together as one group the community stands; otherwise
//! it is split along the groups that formed.
//!
//! ```text
//! after local moving:        after refinement:
//!   [ A---B   C---D ]          [ A---B ] [ C---D ]
//!   one label, no path         two labels
//! ```
//!
//! Refinement only ever splits. Nodes from different input communities never
//! share an output community.

use super::local_moving::settle;
use super::modularity::AggregateTable;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::partition::{CommunityId, Partition};
use log::debug;
use rand::Rng;
use std::collections::{BTreeSet, HashMap};

/// Hands out community ids that are unused in the partition it was seeded
/// from, counting up from just above its largest id. Past `usize::MAX` the
/// count restarts at zero and skips ids already in use.
#[derive(Debug, Clone)]
struct IdAllocator {
    taken: BTreeSet<CommunityId>,
    next: CommunityId,
    wrapped: bool,
}

impl IdAllocator {
    fn above(partition: &Partition) -> Self {
        let (next, wrapped) = match partition.max_community_id() {
            None => (0, false),
            Some(max) => max.checked_add(1).map_or((0, true), |next| (next, false)),
        };
        Self {
            taken: partition.community_ids(),
            next,
            wrapped,
        }
    }

    fn next_id(&mut self) -> Result<CommunityId> {
        loop {
            let id = self.next;
            match id.checked_add(1) {
                Some(next) => self.next = next,
                None if self.wrapped => return Err(Error::CommunityIdsExhausted),
                None => {
                    self.next = 0;
                    self.wrapped = true;
                }
            }
            if self.taken.insert(id) {
                return Ok(id);
            }
        }
    }
}

/// Refine `partition` against `graph`.
///
/// `partition` must assign every node of `graph`. Communities are visited in
/// ascending id order; each is tested against the input partition, not
/// against splits made earlier in the same call.
pub fn refine<R>(graph: &Graph, partition: &Partition, rng: &mut R) -> Result<Partition>
where
    R: Rng + ?Sized,
{
    let mut refined = partition.clone();
    let mut fresh = IdAllocator::above(partition);

    // One working copy and one aggregate table serve every community. Each
    // community is dissolved in place and restored before the next one, so
    // the rest of the working copy always matches the input.
    let mut trial = partition.clone();
    let mut table = AggregateTable::build(graph, &trial)?;
    let mut temporary = IdAllocator::above(partition);

    for (community, members) in partition.groups() {
        if members.len() <= 1 {
            continue;
        }

        let subgraph = graph.induced_subgraph(members.iter().copied())?;

        // Temporary ids never collide with an input id, so a member's
        // singleton cannot alias a community outside this one.
        let saved = table.get(community);
        let mut singletons = Vec::with_capacity(members.len());
        for &node in &members {
            let id = temporary.next_id()?;
            table.move_node(graph, &trial, node, id)?;
            trial.assign(node, id);
            singletons.push(id);
        }

        settle(&subgraph, graph, &mut trial, &mut table, rng)?;

        let mut groups: HashMap<CommunityId, CommunityId> = HashMap::new();
        let mut labels = Vec::with_capacity(members.len());
        for &node in &members {
            let local = trial.community_of(node)?;
            let next = groups.len();
            labels.push(*groups.entry(local).or_insert(next));
        }

        for id in singletons {
            table.remove(id);
        }
        for &node in &members {
            trial.assign(node, community);
        }
        table.insert(community, saved);

        if groups.len() == 1 {
            continue;
        }

        debug!(
            "refinement: community {} ({} nodes) split into {}",
            community,
            members.len(),
            groups.len()
        );
        let ids = (0..groups.len())
            .map(|_| fresh.next_id())
            .collect::<Result<Vec<CommunityId>>>()?;
        for (&node, &label) in members.iter().zip(&labels) {
            refined.assign(node, ids[label]);
        }
    }

    Ok(refined)
}
