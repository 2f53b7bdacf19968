use core::fmt;

use crate::graph::NodeId;

/// Result alias for `commune`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by graph construction and community detection.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input graph has no nodes.
    EmptyInput,

    /// Node is not present in the graph or partition it was looked up in.
    UnknownNode(NodeId),

    /// Edge weight is not a finite positive number.
    InvalidWeight {
        /// First endpoint.
        source: NodeId,
        /// Second endpoint.
        target: NodeId,
        /// Offending weight.
        weight: f64,
    },

    /// Edge was added twice.
    DuplicateEdge {
        /// First endpoint.
        source: NodeId,
        /// Second endpoint.
        target: NodeId,
    },

    /// A tracked level id has no entry in the partition it is mapped through.
    InvalidPartitionMapping {
        /// Original node being mapped.
        node: NodeId,
        /// Id the node plays in the working graph.
        level_id: NodeId,
    },

    /// Every `usize` is already in use as a community id.
    CommunityIdsExhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::UnknownNode(node) => write!(f, "unknown node {node}"),
            Error::InvalidWeight {
                source,
                target,
                weight,
            } => {
                write!(
                    f,
                    "invalid weight {weight} on edge ({source}, {target}): must be finite and positive"
                )
            }
            Error::DuplicateEdge { source, target } => {
                write!(f, "duplicate edge ({source}, {target})")
            }
            Error::InvalidPartitionMapping { node, level_id } => {
                write!(
                    f,
                    "node {node} maps to level id {level_id}, which the partition does not cover"
                )
            }
            Error::CommunityIdsExhausted => write!(f, "no unused community id left"),
        }
    }
}

impl std::error::Error for Error {}
