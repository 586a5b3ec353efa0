//! Index-based adjacency-list graphs.
//!
//! An [`AdjacencyGraph`] owns two dense arrays: one of node records and one
//! of edge records. Nodes and edges are handed out as dense, zero-based
//! indices assigned in insertion order; there is no deletion, so an index
//! never moves and is never reused. Node and edge payloads are ordinary type
//! parameters; use `()` for a payload-free graph and the slot costs nothing.
//!
//! The structural mode (out-edges only, or out- and in-edges) is picked at
//! the type level via [`direction::Direction`]; see that module for the
//! trade-off.

use std::ops::{Index, IndexMut};

use thiserror::Error;

use self::direction::{Bidirectional, Directed, Direction, InEdgeStore};
use self::view::{Edges, InEdges, Nodes, OutEdges};

pub mod direction;
pub mod view;

crate::define_indexed_vec!(
    /// Dense, zero-based identifier of a node, assigned at insertion.
    pub struct NodeIndex;

    /// Vector indexable only by [`NodeIndex`].
    pub struct NodeVec;
);

crate::define_indexed_vec!(
    /// Dense, zero-based identifier of a stored edge, assigned at insertion.
    /// Distinct from the edge's position in any adjacency list.
    pub struct EdgeIndex;

    /// Vector indexable only by [`EdgeIndex`].
    pub struct EdgeVec;
);

/// Public descriptor of an edge: its endpoints together with its stored
/// index, so consumers never need a separate lookup to recover either.
///
/// Equality, ordering, and hashing use only the stored index; the endpoints
/// are redundant within a single graph.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeId {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub index: EdgeIndex,
}

impl PartialEq for EdgeId {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for EdgeId {}

impl PartialOrd for EdgeId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl std::hash::Hash for EdgeId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} (#{})", self.source, self.target, self.index)
    }
}

impl From<EdgeId> for EdgeIndex {
    fn from(edge: EdgeId) -> Self {
        edge.index
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjacencyError {
    #[error("node index {node} out of range for graph with {nodes} nodes")]
    NodeOutOfRange { node: NodeIndex, nodes: usize },
    #[error("edge index {edge} out of range for graph with {edges} edges")]
    EdgeOutOfRange { edge: EdgeIndex, edges: usize },
}

#[derive(Clone, Debug, Default)]
pub(crate) struct StoredNode<V, D: Direction> {
    pub(crate) out: Vec<EdgeIndex>,
    pub(crate) incoming: D::InEdges,
    pub(crate) data: V,
}

impl<V, D: Direction> StoredNode<V, D> {
    fn with_data(data: V) -> Self {
        StoredNode {
            out: Vec::new(),
            incoming: D::InEdges::default(),
            data,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct StoredEdge<E> {
    pub(crate) source: NodeIndex,
    pub(crate) target: NodeIndex,
    pub(crate) data: E,
}

/// An append-only adjacency-list graph with node payloads `V`, edge payloads
/// `E`, and type-level structural mode `D`.
///
/// Cloning performs a full deep copy of both arrays; no record is shared
/// across graph instances.
#[derive(Clone, Debug)]
pub struct AdjacencyGraph<V = (), E = (), D: Direction = Directed> {
    nodes: NodeVec<StoredNode<V, D>>,
    edges: EdgeVec<StoredEdge<E>>,
}

/// Graph with out-edge adjacency only.
pub type DiGraph<V = (), E = ()> = AdjacencyGraph<V, E, Directed>;

/// Graph with both out- and in-edge adjacency.
pub type BiGraph<V = (), E = ()> = AdjacencyGraph<V, E, Bidirectional>;

impl<V, E, D: Direction> Default for AdjacencyGraph<V, E, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E, D: Direction> AdjacencyGraph<V, E, D> {
    pub fn new() -> Self {
        AdjacencyGraph {
            nodes: NodeVec::new(),
            edges: EdgeVec::new(),
        }
    }

    pub fn with_node_capacity(nodes: usize) -> Self {
        AdjacencyGraph {
            nodes: NodeVec::with_capacity(nodes),
            edges: EdgeVec::new(),
        }
    }

    /// A graph that starts out with `n` payload-default nodes and no edges.
    pub fn with_nodes(n: usize) -> Self
    where
        V: Default,
    {
        let mut graph = Self::with_node_capacity(n);
        for _ in 0..n {
            graph.add_default_node();
        }
        graph
    }

    /// Appends a node with empty adjacency, returning its index
    /// (= the previous node count).
    pub fn add_node(&mut self, data: V) -> NodeIndex {
        self.nodes.push(StoredNode::with_data(data))
    }

    /// [`add_node`](Self::add_node) with a defaulted payload.
    pub fn add_default_node(&mut self) -> NodeIndex
    where
        V: Default,
    {
        self.add_node(V::default())
    }

    /// Appends the edge `source -> target`, wiring it into `source`'s
    /// out-edge list and, on bidirectional graphs, into `target`'s in-edge
    /// list. Self-loops and parallel edges are permitted.
    ///
    /// Fails with [`AdjacencyError::NodeOutOfRange`] if either endpoint was
    /// not previously returned by [`add_node`](Self::add_node).
    pub fn add_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
        data: E,
    ) -> Result<EdgeId, AdjacencyError> {
        self.check_node(source)?;
        self.check_node(target)?;
        let index = self.edges.push(StoredEdge {
            source,
            target,
            data,
        });
        self.nodes[source].out.push(index);
        self.nodes[target].incoming.record(index);
        Ok(EdgeId {
            source,
            target,
            index,
        })
    }

    /// [`add_edge`](Self::add_edge) with a defaulted payload.
    pub fn add_default_edge(
        &mut self,
        source: NodeIndex,
        target: NodeIndex,
    ) -> Result<EdgeId, AdjacencyError>
    where
        E: Default,
    {
        self.add_edge(source, target, E::default())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> Nodes {
        Nodes::over(self.node_count())
    }

    /// All edges, in insertion order.
    pub fn edges(&self) -> Edges<'_, E> {
        Edges::over(&self.edges)
    }

    /// Edges leaving `node`, in the order they were inserted at `node`.
    ///
    /// Panics if `node` is out of range.
    pub fn out_edges(&self, node: NodeIndex) -> OutEdges<'_, E> {
        OutEdges::over(&self.nodes[node].out, &self.edges)
    }

    /// Panics if `node` is out of range.
    pub fn out_degree(&self, node: NodeIndex) -> usize {
        self.nodes[node].out.len()
    }

    /// Checked payload access; [`Index`] by [`NodeIndex`] is the panicking
    /// equivalent.
    pub fn node_data(&self, node: NodeIndex) -> Result<&V, AdjacencyError> {
        let nodes = self.node_count();
        self.nodes
            .get(node)
            .map(|stored| &stored.data)
            .ok_or(AdjacencyError::NodeOutOfRange { node, nodes })
    }

    pub fn node_data_mut(&mut self, node: NodeIndex) -> Result<&mut V, AdjacencyError> {
        let nodes = self.node_count();
        self.nodes
            .get_mut(node)
            .map(|stored| &mut stored.data)
            .ok_or(AdjacencyError::NodeOutOfRange { node, nodes })
    }

    /// Checked payload access; [`Index`] by [`EdgeIndex`] or [`EdgeId`] is
    /// the panicking equivalent.
    pub fn edge_data(&self, edge: impl Into<EdgeIndex>) -> Result<&E, AdjacencyError> {
        let edge = edge.into();
        let edges = self.edge_count();
        self.edges
            .get(edge)
            .map(|stored| &stored.data)
            .ok_or(AdjacencyError::EdgeOutOfRange { edge, edges })
    }

    pub fn edge_data_mut(&mut self, edge: impl Into<EdgeIndex>) -> Result<&mut E, AdjacencyError> {
        let edge = edge.into();
        let edges = self.edge_count();
        self.edges
            .get_mut(edge)
            .map(|stored| &mut stored.data)
            .ok_or(AdjacencyError::EdgeOutOfRange { edge, edges })
    }

    /// Rebuilds the full descriptor of a stored edge.
    pub fn edge_id(&self, edge: EdgeIndex) -> Result<EdgeId, AdjacencyError> {
        let edges = self.edge_count();
        self.edges
            .get(edge)
            .map(|stored| EdgeId {
                source: stored.source,
                target: stored.target,
                index: edge,
            })
            .ok_or(AdjacencyError::EdgeOutOfRange { edge, edges })
    }

    fn check_node(&self, node: NodeIndex) -> Result<(), AdjacencyError> {
        let nodes = self.node_count();
        if node.0 < nodes {
            Ok(())
        } else {
            Err(AdjacencyError::NodeOutOfRange { node, nodes })
        }
    }
}

impl<V, E> AdjacencyGraph<V, E, Bidirectional> {
    /// Edges targeting `node`, in the order they were inserted at `node`.
    /// Only bidirectional graphs keep this adjacency.
    ///
    /// Panics if `node` is out of range.
    pub fn in_edges(&self, node: NodeIndex) -> InEdges<'_, E> {
        InEdges::over(&self.nodes[node].incoming, &self.edges)
    }

    /// Panics if `node` is out of range.
    pub fn in_degree(&self, node: NodeIndex) -> usize {
        self.nodes[node].incoming.len()
    }
}

impl<V, E, D: Direction> Index<NodeIndex> for AdjacencyGraph<V, E, D> {
    type Output = V;
    fn index(&self, node: NodeIndex) -> &V {
        &self.nodes[node].data
    }
}

impl<V, E, D: Direction> IndexMut<NodeIndex> for AdjacencyGraph<V, E, D> {
    fn index_mut(&mut self, node: NodeIndex) -> &mut V {
        &mut self.nodes[node].data
    }
}

impl<V, E, D: Direction> Index<EdgeIndex> for AdjacencyGraph<V, E, D> {
    type Output = E;
    fn index(&self, edge: EdgeIndex) -> &E {
        &self.edges[edge].data
    }
}

impl<V, E, D: Direction> IndexMut<EdgeIndex> for AdjacencyGraph<V, E, D> {
    fn index_mut(&mut self, edge: EdgeIndex) -> &mut E {
        &mut self.edges[edge].data
    }
}

impl<V, E, D: Direction> Index<EdgeId> for AdjacencyGraph<V, E, D> {
    type Output = E;
    fn index(&self, edge: EdgeId) -> &E {
        &self.edges[edge.index].data
    }
}

impl<V, E, D: Direction> IndexMut<EdgeId> for AdjacencyGraph<V, E, D> {
    fn index_mut(&mut self, edge: EdgeId) -> &mut E {
        &mut self.edges[edge.index].data
    }
}
