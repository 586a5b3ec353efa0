//! Topological ordering as a DFS specialization.
//!
//! A node is appended to the output when it finishes, so the raw DFS output
//! is the reverse of a topological order. [`topo_sort`] wraps this up,
//! reverses the sequence, and rejects cyclic input; [`topo_sort_into`]
//! exposes the raw reverse-order protocol for callers that bring their own
//! sink.

use std::convert::Infallible;

use thiserror::Error;

use super::dfs::{dfs, DfsVisitor};
use crate::adjacency::view::GraphView;
use crate::adjacency::{EdgeId, NodeIndex};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopoError {
    #[error("not a DAG: back edge {edge} closes a cycle")]
    NotDag { edge: EdgeId },
}

/// Appends every finishing node to a caller-supplied sink.
///
/// The sink receives nodes in reverse topological order (for acyclic input);
/// it is any append-only consumer, keeping the algorithm decoupled from a
/// concrete output container. Cycles are not detected here: pair it with a
/// visitor watching `back_edge` if that matters.
pub struct TopoVisitor<'s, S: Extend<NodeIndex>> {
    sink: &'s mut S,
}

impl<'s, S: Extend<NodeIndex>> TopoVisitor<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        TopoVisitor { sink }
    }
}

impl<G: GraphView, S: Extend<NodeIndex>> DfsVisitor<G> for TopoVisitor<'_, S> {
    type Error = Infallible;

    fn finish_vertex(&mut self, node: NodeIndex, _graph: &G) -> Result<(), Infallible> {
        self.sink.extend(std::iter::once(node));
        Ok(())
    }
}

/// Runs DFS with a [`TopoVisitor`], filling `sink` with the reverse of a
/// topological order. The caller reverses (and checks for cycles, if
/// needed).
pub fn topo_sort_into<G, S>(graph: &G, sink: &mut S)
where
    G: GraphView,
    S: Extend<NodeIndex>,
{
    match dfs(graph, &mut TopoVisitor::new(sink)) {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Finish-order recorder that refuses to continue past a back edge.
struct CycleGuardedTopo {
    order: Vec<NodeIndex>,
}

impl<G: GraphView> DfsVisitor<G> for CycleGuardedTopo {
    type Error = TopoError;

    fn finish_vertex(&mut self, node: NodeIndex, _graph: &G) -> Result<(), TopoError> {
        self.order.push(node);
        Ok(())
    }

    fn back_edge(&mut self, edge: EdgeId, _graph: &G) -> Result<(), TopoError> {
        Err(TopoError::NotDag { edge })
    }
}

/// A topological order of the whole graph: for every edge `(u, v)`, `u`
/// precedes `v` in the result.
///
/// Fails with [`TopoError::NotDag`] on the first back edge, naming the edge
/// that closes a cycle; the traversal is abandoned at that point.
pub fn topo_sort<G: GraphView>(graph: &G) -> Result<Vec<NodeIndex>, TopoError> {
    let mut visitor = CycleGuardedTopo {
        order: Vec::with_capacity(graph.node_count()),
    };
    dfs(graph, &mut visitor)?;
    visitor.order.reverse();
    Ok(visitor.order)
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use proptest::prelude::*;
    use similar_asserts::assert_eq;

    use super::{topo_sort, topo_sort_into, TopoError};
    use crate::adjacency::{DiGraph, NodeIndex};

    fn graph_from(nodes: usize, edges: &[(usize, usize)]) -> DiGraph {
        let mut g = DiGraph::with_nodes(nodes);
        for (s, t) in edges {
            g.add_edge(NodeIndex(*s), NodeIndex(*t), ()).unwrap();
        }
        g
    }

    /// Position of every node in an ordering.
    fn positions(order: &[NodeIndex]) -> Vec<usize> {
        let mut pos = vec![usize::MAX; order.len()];
        for (i, v) in order.iter().enumerate() {
            pos[v.0] = i;
        }
        pos
    }

    fn assert_topological(g: &DiGraph, order: &[NodeIndex]) {
        assert_eq!(order.len(), g.node_count());
        let pos = positions(order);
        for e in g.edges() {
            assert!(
                pos[e.source.0] < pos[e.target.0],
                "edge {e} violates the ordering {order:?}"
            );
        }
    }

    #[test]
    fn two_disjoint_chains_keep_their_internal_order() {
        let g = graph_from(8, &[(0, 3), (3, 5), (5, 7), (2, 4), (4, 6), (6, 7)]);
        let order = topo_sort(&g).unwrap();
        assert_topological(&g, &order);

        let pos = positions(&order);
        assert!(pos[0] < pos[3] && pos[3] < pos[5] && pos[5] < pos[7]);
        assert!(pos[2] < pos[4] && pos[4] < pos[6] && pos[6] < pos[7]);
    }

    #[test]
    fn diamond_with_two_sources() {
        let g = graph_from(
            8,
            &[
                (0, 2),
                (1, 2),
                (1, 3),
                (1, 6),
                (2, 4),
                (2, 5),
                (3, 7),
                (4, 7),
            ],
        );
        assert_topological(&g, &topo_sort(&g).unwrap());
    }

    #[test]
    fn isolated_nodes_appear_exactly_once() {
        let g = graph_from(8, &[(0, 3), (1, 2), (1, 6), (5, 6)]);
        let order = topo_sort(&g).unwrap();
        assert_topological(&g, &order);
        assert_eq!(
            order.iter().copied().sorted().collect_vec(),
            (0..8).map(NodeIndex).collect_vec()
        );
    }

    #[test]
    fn raw_sink_receives_reverse_order() {
        let g = graph_from(5, &[(0, 1), (1, 2), (0, 3), (3, 4)]);
        let mut reverse: Vec<NodeIndex> = Vec::new();
        topo_sort_into(&g, &mut reverse);

        let mut forward = reverse.clone();
        forward.reverse();
        assert_eq!(forward, topo_sort(&g).unwrap());
    }

    #[test]
    fn cycle_is_reported_with_its_closing_edge() {
        let mut g = graph_from(4, &[(0, 1), (1, 2)]);
        let back = g.add_edge(NodeIndex(2), NodeIndex(0), ()).unwrap();
        g.add_edge(NodeIndex(2), NodeIndex(3), ()).unwrap();

        let err = topo_sort(&g).unwrap_err();
        assert_eq!(err, TopoError::NotDag { edge: back });
        assert_eq!(
            err.to_string(),
            "not a DAG: back edge 2 -> 0 (#2) closes a cycle"
        );
    }

    #[test]
    fn cyclic_input_does_not_panic_the_raw_protocol() {
        // topo_sort_into runs to completion even on cycles; the output is
        // simply not a valid ordering, mirroring the visitor contract
        let g = graph_from(3, &[(0, 1), (1, 2), (2, 0)]);
        let mut out: Vec<NodeIndex> = Vec::new();
        topo_sort_into(&g, &mut out);
        assert_eq!(out.len(), 3);
    }

    proptest! {
        /// Edges drawn only from lower to higher node index, so the input
        /// is acyclic by construction.
        #[test]
        fn any_forward_dag_sorts_validly(
            nodes in 2usize..32,
            picks in prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>()), 0..96),
        ) {
            let mut g: DiGraph = DiGraph::with_nodes(nodes);
            for (a, b) in picks {
                let (a, b) = (a.index(nodes), b.index(nodes));
                if a < b {
                    g.add_edge(NodeIndex(a), NodeIndex(b), ()).unwrap();
                }
            }
            let order = topo_sort(&g).unwrap();
            prop_assert_eq!(order.len(), g.node_count());
            let pos = positions(&order);
            for e in g.edges() {
                prop_assert!(pos[e.source.0] < pos[e.target.0]);
            }
        }
    }
}
