//! Read-only views over an [`AdjacencyGraph`](super::AdjacencyGraph).
//!
//! Every view is a lazy, restartable (`Clone`) iterator translating storage
//! positions into public descriptors; none of them materializes the
//! underlying set. [`GraphView`] captures the exact contract the algorithm
//! layer consumes, so a traversal is written once and runs over either
//! structural variant, or over any future storage backend implementing the
//! same operations.

use std::iter::FusedIterator;
use std::ops::Range;

use super::direction::Direction;
use super::{AdjacencyGraph, EdgeId, EdgeIndex, EdgeVec, NodeIndex, StoredEdge};

/// All node indices of a graph, in insertion order.
#[derive(Clone, Debug)]
pub struct Nodes {
    range: Range<usize>,
}

impl Nodes {
    pub(crate) fn over(count: usize) -> Self {
        Nodes { range: 0..count }
    }
}

impl Iterator for Nodes {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        self.range.next().map(NodeIndex)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for Nodes {
    fn next_back(&mut self) -> Option<NodeIndex> {
        self.range.next_back().map(NodeIndex)
    }
}

impl ExactSizeIterator for Nodes {}
impl FusedIterator for Nodes {}

/// All edge descriptors of a graph, in insertion order, rebuilt from the
/// stored records plus their array position.
#[derive(Debug)]
pub struct Edges<'a, E> {
    inner: std::iter::Enumerate<std::slice::Iter<'a, StoredEdge<E>>>,
}

// Derived `Clone` would demand `E: Clone`, which the [`GraphView`] impl
// cannot promise; only the borrowing iterator is cloned.
impl<E> Clone for Edges<'_, E> {
    fn clone(&self) -> Self {
        Edges {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, E> Edges<'a, E> {
    pub(crate) fn over(edges: &'a EdgeVec<StoredEdge<E>>) -> Self {
        Edges {
            inner: edges.raw().iter().enumerate(),
        }
    }
}

fn descriptor<E>((position, stored): (usize, &StoredEdge<E>)) -> EdgeId {
    EdgeId {
        source: stored.source,
        target: stored.target,
        index: EdgeIndex(position),
    }
}

impl<E> Iterator for Edges<'_, E> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        self.inner.next().map(descriptor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> DoubleEndedIterator for Edges<'_, E> {
    fn next_back(&mut self) -> Option<EdgeId> {
        self.inner.next_back().map(descriptor)
    }
}

impl<E> ExactSizeIterator for Edges<'_, E> {}
impl<E> FusedIterator for Edges<'_, E> {}

/// Descriptors of the edges leaving one node, in per-node insertion order.
#[derive(Debug)]
pub struct OutEdges<'a, E> {
    slots: std::slice::Iter<'a, EdgeIndex>,
    edges: &'a EdgeVec<StoredEdge<E>>,
}

impl<E> Clone for OutEdges<'_, E> {
    fn clone(&self) -> Self {
        OutEdges {
            slots: self.slots.clone(),
            edges: self.edges,
        }
    }
}

impl<'a, E> OutEdges<'a, E> {
    pub(crate) fn over(slots: &'a [EdgeIndex], edges: &'a EdgeVec<StoredEdge<E>>) -> Self {
        OutEdges {
            slots: slots.iter(),
            edges,
        }
    }
}

fn resolve<E>(index: EdgeIndex, edges: &EdgeVec<StoredEdge<E>>) -> EdgeId {
    let stored = &edges[index];
    EdgeId {
        source: stored.source,
        target: stored.target,
        index,
    }
}

impl<E> Iterator for OutEdges<'_, E> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        self.slots.next().map(|&index| resolve(index, self.edges))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<E> DoubleEndedIterator for OutEdges<'_, E> {
    fn next_back(&mut self) -> Option<EdgeId> {
        self.slots
            .next_back()
            .map(|&index| resolve(index, self.edges))
    }
}

impl<E> ExactSizeIterator for OutEdges<'_, E> {}
impl<E> FusedIterator for OutEdges<'_, E> {}

/// Descriptors of the edges targeting one node, in per-node insertion
/// order. Only constructible on bidirectional graphs.
#[derive(Debug)]
pub struct InEdges<'a, E> {
    slots: std::slice::Iter<'a, EdgeIndex>,
    edges: &'a EdgeVec<StoredEdge<E>>,
}

impl<E> Clone for InEdges<'_, E> {
    fn clone(&self) -> Self {
        InEdges {
            slots: self.slots.clone(),
            edges: self.edges,
        }
    }
}

impl<'a, E> InEdges<'a, E> {
    pub(crate) fn over(slots: &'a [EdgeIndex], edges: &'a EdgeVec<StoredEdge<E>>) -> Self {
        InEdges {
            slots: slots.iter(),
            edges,
        }
    }
}

impl<E> Iterator for InEdges<'_, E> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        self.slots.next().map(|&index| resolve(index, self.edges))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<E> DoubleEndedIterator for InEdges<'_, E> {
    fn next_back(&mut self) -> Option<EdgeId> {
        self.slots
            .next_back()
            .map(|&index| resolve(index, self.edges))
    }
}

impl<E> ExactSizeIterator for InEdges<'_, E> {}
impl<E> FusedIterator for InEdges<'_, E> {}

/// The read contract the algorithm layer consumes: counts plus restartable
/// node, edge, and out-edge sequences.
///
/// [`AdjacencyGraph`] is the canonical implementation; an alternative
/// storage backend (a dense matrix, say) plugs into the same algorithms by
/// implementing these operations.
pub trait GraphView {
    type Nodes<'a>: Iterator<Item = NodeIndex> + Clone
    where
        Self: 'a;
    type Edges<'a>: Iterator<Item = EdgeId> + Clone
    where
        Self: 'a;
    type OutEdges<'a>: Iterator<Item = EdgeId> + Clone
    where
        Self: 'a;

    fn node_count(&self) -> usize;
    fn edge_count(&self) -> usize;

    /// All nodes, in insertion order.
    fn nodes(&self) -> Self::Nodes<'_>;

    /// All edge descriptors, in insertion order.
    fn edges(&self) -> Self::Edges<'_>;

    /// Edges leaving `node`, in per-node insertion order.
    fn out_edges(&self, node: NodeIndex) -> Self::OutEdges<'_>;

    fn out_degree(&self, node: NodeIndex) -> usize {
        self.out_edges(node).count()
    }
}

impl<V, E, D: Direction> GraphView for AdjacencyGraph<V, E, D> {
    type Nodes<'a>
        = Nodes
    where
        Self: 'a;
    type Edges<'a>
        = Edges<'a, E>
    where
        Self: 'a;
    type OutEdges<'a>
        = OutEdges<'a, E>
    where
        Self: 'a;

    fn node_count(&self) -> usize {
        AdjacencyGraph::node_count(self)
    }

    fn edge_count(&self) -> usize {
        AdjacencyGraph::edge_count(self)
    }

    fn nodes(&self) -> Nodes {
        AdjacencyGraph::nodes(self)
    }

    fn edges(&self) -> Edges<'_, E> {
        AdjacencyGraph::edges(self)
    }

    fn out_edges(&self, node: NodeIndex) -> OutEdges<'_, E> {
        AdjacencyGraph::out_edges(self, node)
    }

    fn out_degree(&self, node: NodeIndex) -> usize {
        AdjacencyGraph::out_degree(self, node)
    }
}
