//! Node-to-community assignments.

use crate::error::{Error, Result};
use crate::graph::NodeId;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Community identifier.
///
/// Shares its type with [`NodeId`]: a community at one level becomes a node
/// of the next, coarser graph.
pub type CommunityId = usize;

/// Total mapping from nodes to community ids.
///
/// Ids are opaque and need not be contiguous. Phases never patch a partition
/// they were handed; they build and return a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partition {
    assignment: BTreeMap<NodeId, CommunityId>,
}

impl Partition {
    /// Every node in its own community, named after the node.
    pub fn singletons<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        nodes.into_iter().map(|n| (n, n)).collect()
    }

    /// Community of `node`.
    pub fn community_of(&self, node: NodeId) -> Result<CommunityId> {
        self.get(node).ok_or(Error::UnknownNode(node))
    }

    /// Community of `node`, if assigned.
    pub fn get(&self, node: NodeId) -> Option<CommunityId> {
        self.assignment.get(&node).copied()
    }

    /// Number of assigned nodes.
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Whether no node is assigned.
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// `(node, community)` pairs in ascending node order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, CommunityId)> + '_ {
        self.assignment.iter().map(|(&n, &c)| (n, c))
    }

    /// Distinct community ids.
    pub fn community_ids(&self) -> BTreeSet<CommunityId> {
        self.assignment.values().copied().collect()
    }

    /// Number of distinct communities.
    pub fn community_count(&self) -> usize {
        self.community_ids().len()
    }

    /// Largest community id in use.
    pub fn max_community_id(&self) -> Option<CommunityId> {
        self.assignment.values().copied().max()
    }

    /// Members of each community, ascending by id; members ascending too.
    pub fn groups(&self) -> BTreeMap<CommunityId, Vec<NodeId>> {
        let mut groups: BTreeMap<CommunityId, Vec<NodeId>> = BTreeMap::new();
        for (node, community) in self.iter() {
            groups.entry(community).or_default().push(node);
        }
        groups
    }

    /// Map every node through `level`: the result sends `n` to
    /// `level[self[n]]`.
    ///
    /// `self` tracks which id each node plays in a working graph and `level`
    /// partitions that graph. A node whose id `level` does not cover is a
    /// broken level chain, reported as [`Error::InvalidPartitionMapping`].
    pub fn compose(&self, level: &Partition) -> Result<Partition> {
        self.iter()
            .map(|(node, level_id)| {
                level
                    .get(level_id)
                    .map(|community| (node, community))
                    .ok_or(Error::InvalidPartitionMapping { node, level_id })
            })
            .collect()
    }

    /// Same grouping with ids renumbered `0..k` in order of first appearance
    /// over ascending nodes.
    pub fn renumbered(&self) -> Partition {
        let mut mapping: HashMap<CommunityId, CommunityId> = HashMap::new();
        self.iter()
            .map(|(node, community)| {
                let next = mapping.len();
                (node, *mapping.entry(community).or_insert(next))
            })
            .collect()
    }

    pub(crate) fn assign(&mut self, node: NodeId, community: CommunityId) {
        let _ = self.assignment.insert(node, community);
    }
}

impl FromIterator<(NodeId, CommunityId)> for Partition {
    fn from_iter<I: IntoIterator<Item = (NodeId, CommunityId)>>(iter: I) -> Self {
        Self {
            assignment: iter.into_iter().collect(),
        }
    }
}
