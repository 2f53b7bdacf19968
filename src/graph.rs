//! Weighted undirected graphs.
//!
//! [`Graph`] is the view every phase works against: neighbor iteration,
//! weighted degree, total weight and induced subgraphs. Node identifiers are
//! arbitrary `usize` values, not necessarily contiguous, because coarsened
//! graphs name each super-node after the community it stands for.
//!
//! ## Self-loops
//!
//! Aggregation turns intra-community edges into self-loops, so the convention
//! matters:
//!
//! - a self-loop is stored once, with its full weight
//! - [`Graph::total_weight`] counts it once
//! - [`Graph::weighted_degree`] counts it twice
//!
//! With this convention a super-node's degree equals the summed degree of the
//! nodes it replaced, and modularity is preserved across levels.

use crate::error::{Error, Result};
use petgraph::graph::UnGraph;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::EdgeRef;

/// Node identifier.
pub type NodeId = usize;

/// Weighted undirected graph.
///
/// Node iteration follows insertion order, which keeps seeded runs
/// reproducible.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    inner: UnGraphMap<NodeId, f64>,
    total_weight: f64,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with the given nodes and no edges.
    pub fn with_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        graph
    }

    /// Build a graph from `(u, v, weight)` triples.
    ///
    /// Endpoints are added as nodes on first sight.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, f64)>,
    {
        let mut graph = Self::new();
        for (u, v, w) in edges {
            graph.add_edge(u, v, w)?;
        }
        Ok(graph)
    }

    /// Convert a petgraph `UnGraph` with `f64` edge weights.
    ///
    /// Node ids are the petgraph node indices. Parallel edges are summed.
    pub fn from_ungraph<N>(graph: &UnGraph<N, f64>) -> Result<Self> {
        let mut out = Self::with_nodes(graph.node_indices().map(|n| n.index()));
        for edge in graph.edge_references() {
            let (u, v, w) = (edge.source().index(), edge.target().index(), *edge.weight());
            check_weight(u, v, w)?;
            out.accumulate_edge(u, v, w);
        }
        Ok(out)
    }

    /// Add a node. Adding an existing node is a no-op.
    pub fn add_node(&mut self, node: NodeId) {
        let _ = self.inner.add_node(node);
    }

    /// Add an undirected edge.
    ///
    /// Fails if the weight is not finite and positive, or if the edge already
    /// exists.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: f64) -> Result<()> {
        check_weight(u, v, weight)?;
        if self.inner.contains_edge(u, v) {
            return Err(Error::DuplicateEdge {
                source: u,
                target: v,
            });
        }
        self.accumulate_edge(u, v, weight);
        Ok(())
    }

    /// Add `weight` onto the edge `(u, v)`, creating it if absent.
    pub(crate) fn accumulate_edge(&mut self, u: NodeId, v: NodeId, weight: f64) {
        match self.inner.edge_weight_mut(u, v) {
            Some(w) => *w += weight,
            None => {
                let _ = self.inner.add_edge(u, v, weight);
            }
        }
        self.total_weight += weight;
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges, self-loops included.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Whether `node` is in the graph.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.inner.contains_node(node)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.nodes()
    }

    /// Every edge once, as `(u, v, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.inner.all_edges().map(|(u, v, &w)| (u, v, w))
    }

    /// Neighbors of `node` with edge weights.
    ///
    /// A self-loop yields `node` itself once.
    pub fn neighbors(&self, node: NodeId) -> Result<impl Iterator<Item = (NodeId, f64)> + '_> {
        self.check_node(node)?;
        Ok(self.inner.edges(node).map(|(_, v, &w)| (v, w)))
    }

    /// Sum of incident edge weights; a self-loop counts twice.
    pub fn weighted_degree(&self, node: NodeId) -> Result<f64> {
        Ok(self
            .neighbors(node)?
            .map(|(v, w)| if v == node { 2.0 * w } else { w })
            .sum())
    }

    /// Weight of the self-loop on `node`, `0.0` when there is none.
    pub fn self_loop_weight(&self, node: NodeId) -> Result<f64> {
        self.check_node(node)?;
        Ok(self.inner.edge_weight(node, node).copied().unwrap_or(0.0))
    }

    /// Sum of all edge weights, self-loops counted once (`m`).
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Subgraph on `nodes` with exactly the edges whose endpoints are both in
    /// the set. Nodes keep their ids; isolated members are kept.
    pub fn induced_subgraph<I>(&self, nodes: I) -> Result<Graph>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut sub = Graph::new();
        let mut members = Vec::new();
        for node in nodes {
            self.check_node(node)?;
            if !sub.contains_node(node) {
                sub.add_node(node);
                members.push(node);
            }
        }
        // Each edge is seen from both ends; keep it once. Self-loops show up
        // once.
        for u in members {
            for (v, w) in self.neighbors(u)? {
                if u <= v && sub.contains_node(v) {
                    sub.accumulate_edge(u, v, w);
                }
            }
        }
        Ok(sub)
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(Error::UnknownNode(node))
        }
    }
}

fn check_weight(source: NodeId, target: NodeId, weight: f64) -> Result<()> {
    if weight.is_finite() && weight > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidWeight {
            source,
            target,
            weight,
        })
    }
}
