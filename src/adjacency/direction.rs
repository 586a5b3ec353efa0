//! Type-level structural mode of an [`AdjacencyGraph`](super::AdjacencyGraph).
//!
//! Whether a graph keeps per-node in-edge lists is decided by the `D`
//! parameter at construction, not by a runtime flag: [`Directed`] stores
//! nothing for incoming edges, [`Bidirectional`] stores a `Vec<EdgeIndex>`
//! per node. The in-edge accessors only exist on the bidirectional
//! instantiation, so asking a directed graph for its in-edges is a compile
//! error.

use std::fmt::Debug;

use super::EdgeIndex;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Directed {}
    impl Sealed for super::Bidirectional {}
}

/// Per-node storage for references to incoming edges.
pub trait InEdgeStore: Default + Clone + Debug {
    /// Records that `edge` now targets the owning node.
    fn record(&mut self, edge: EdgeIndex);
}

/// Zero-sized stand-in used by [`Directed`] graphs, which carry no in-edge
/// bookkeeping at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoInEdges;

impl InEdgeStore for NoInEdges {
    #[inline]
    fn record(&mut self, _edge: EdgeIndex) {}
}

impl InEdgeStore for Vec<EdgeIndex> {
    #[inline]
    fn record(&mut self, edge: EdgeIndex) {
        self.push(edge);
    }
}

/// Structural mode of a graph. Sealed: the only implementations are
/// [`Directed`] and [`Bidirectional`].
pub trait Direction: sealed::Sealed + Copy + Debug + 'static {
    /// What each node stores about its incoming edges.
    type InEdges: InEdgeStore;
}

/// Out-edge adjacency only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Directed;

impl Direction for Directed {
    type InEdges = NoInEdges;
}

/// Out-edge and in-edge adjacency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bidirectional;

impl Direction for Bidirectional {
    type InEdges = Vec<EdgeIndex>;
}
