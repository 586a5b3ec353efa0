//! Depth-first traversal with a pluggable visitor.
//!
//! The engine follows the classic formulation from Introduction to
//! Algorithms: every node moves `White -> Grey -> Black`, every edge is
//! classified exactly once by the colour of its target at examination time,
//! and the whole node sequence is covered, so the result is a full forest
//! even on disconnected or cyclic input. The recursion of the textbook
//! version is replaced by an explicit frame stack, which leaves the visit
//! and finish order unchanged but keeps deep chains off the host stack.

use std::convert::Infallible;

use crate::adjacency::view::GraphView;
use crate::adjacency::{EdgeId, NodeIndex, NodeVec};

/// Visitation state of a node during a traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Colour {
    /// Not yet discovered.
    White,
    /// Discovered, some out-edges still unprocessed.
    Grey,
    /// All out-edges processed.
    Black,
}

/// Hooks invoked by [`dfs`] at each structural event.
///
/// Every hook defaults to `Ok(())`, so a visitor overrides only what it
/// observes. The engine performs no recovery: the first `Err` aborts the
/// traversal and propagates to the caller of [`dfs`].
pub trait DfsVisitor<G: GraphView> {
    type Error;

    /// Every node, before any visit begins, in node order.
    fn init_vertex(&mut self, _node: NodeIndex, _graph: &G) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A still-white node about to become the root of a new tree.
    fn start_vertex(&mut self, _node: NodeIndex, _graph: &G) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A node turning grey.
    fn discover_vertex(&mut self, _node: NodeIndex, _graph: &G) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A node turning black, after all of its out-edges are processed.
    fn finish_vertex(&mut self, _node: NodeIndex, _graph: &G) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Every out-edge of a discovered node, before classification.
    fn examine_edge(&mut self, _edge: EdgeId, _graph: &G) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Edge to a white target; the target is visited next.
    fn tree_edge(&mut self, _edge: EdgeId, _graph: &G) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Edge to a grey target: a cycle through the current path.
    fn back_edge(&mut self, _edge: EdgeId, _graph: &G) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Edge to a black target.
    fn forward_or_cross_edge(&mut self, _edge: EdgeId, _graph: &G) -> Result<(), Self::Error> {
        Ok(())
    }

    /// After an edge is fully processed; for a tree edge that is after the
    /// target's subtree finished.
    fn finish_edge(&mut self, _edge: EdgeId, _graph: &G) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// The no-op base case.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullVisitor;

impl<G: GraphView> DfsVisitor<G> for NullVisitor {
    type Error = Infallible;
}

struct Frame<'g, G: GraphView + 'g> {
    node: NodeIndex,
    out: G::OutEdges<'g>,
    /// Tree edge that reached `node`; finished once the subtree is done.
    via: Option<EdgeId>,
}

/// Depth-first search over the whole graph.
///
/// Initializes every node to [`Colour::White`] (invoking `init_vertex` in
/// node order), then grows a tree from every node that is still white when
/// reached in node order, invoking `start_vertex` for each root.
/// Deterministic for a fixed insertion order.
pub fn dfs<G, Vis>(graph: &G, visitor: &mut Vis) -> Result<(), Vis::Error>
where
    G: GraphView,
    Vis: DfsVisitor<G>,
{
    let mut colour: NodeVec<Colour> = vec![Colour::White; graph.node_count()].into();
    for node in graph.nodes() {
        visitor.init_vertex(node, graph)?;
    }
    for root in graph.nodes() {
        if colour[root] == Colour::White {
            visitor.start_vertex(root, graph)?;
            visit(graph, visitor, root, &mut colour)?;
        }
    }
    Ok(())
}

/// One tree of the forest, rooted at `root`.
fn visit<'g, G, Vis>(
    graph: &'g G,
    visitor: &mut Vis,
    root: NodeIndex,
    colour: &mut NodeVec<Colour>,
) -> Result<(), Vis::Error>
where
    G: GraphView,
    Vis: DfsVisitor<G>,
{
    visitor.discover_vertex(root, graph)?;
    colour[root] = Colour::Grey;
    let mut stack: Vec<Frame<'g, G>> = vec![Frame {
        node: root,
        out: graph.out_edges(root),
        via: None,
    }];

    while let Some(frame) = stack.last_mut() {
        match frame.out.next() {
            Some(edge) => {
                visitor.examine_edge(edge, graph)?;
                match colour[edge.target] {
                    Colour::White => {
                        visitor.tree_edge(edge, graph)?;
                        visitor.discover_vertex(edge.target, graph)?;
                        colour[edge.target] = Colour::Grey;
                        stack.push(Frame {
                            node: edge.target,
                            out: graph.out_edges(edge.target),
                            via: Some(edge),
                        });
                    }
                    Colour::Grey => {
                        visitor.back_edge(edge, graph)?;
                        visitor.finish_edge(edge, graph)?;
                    }
                    Colour::Black => {
                        visitor.forward_or_cross_edge(edge, graph)?;
                        visitor.finish_edge(edge, graph)?;
                    }
                }
            }
            None => {
                let node = frame.node;
                let via = frame.via;
                colour[node] = Colour::Black;
                visitor.finish_vertex(node, graph)?;
                stack.pop();
                if let Some(edge) = via {
                    visitor.finish_edge(edge, graph)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use std::convert::Infallible;

    use similar_asserts::assert_eq;

    use super::{dfs, DfsVisitor, NullVisitor};
    use crate::adjacency::view::GraphView;
    use crate::adjacency::{DiGraph, EdgeId, NodeIndex};

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Event {
        Init(usize),
        Start(usize),
        Discover(usize),
        Finish(usize),
        Examine(usize),
        Tree(usize),
        Back(usize),
        ForwardOrCross(usize),
        FinishEdge(usize),
    }

    /// Records the full event trace.
    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl<G: GraphView> DfsVisitor<G> for Recorder {
        type Error = Infallible;

        fn init_vertex(&mut self, node: NodeIndex, _: &G) -> Result<(), Infallible> {
            self.events.push(Event::Init(node.0));
            Ok(())
        }
        fn start_vertex(&mut self, node: NodeIndex, _: &G) -> Result<(), Infallible> {
            self.events.push(Event::Start(node.0));
            Ok(())
        }
        fn discover_vertex(&mut self, node: NodeIndex, _: &G) -> Result<(), Infallible> {
            self.events.push(Event::Discover(node.0));
            Ok(())
        }
        fn finish_vertex(&mut self, node: NodeIndex, _: &G) -> Result<(), Infallible> {
            self.events.push(Event::Finish(node.0));
            Ok(())
        }
        fn examine_edge(&mut self, edge: EdgeId, _: &G) -> Result<(), Infallible> {
            self.events.push(Event::Examine(edge.index.0));
            Ok(())
        }
        fn tree_edge(&mut self, edge: EdgeId, _: &G) -> Result<(), Infallible> {
            self.events.push(Event::Tree(edge.index.0));
            Ok(())
        }
        fn back_edge(&mut self, edge: EdgeId, _: &G) -> Result<(), Infallible> {
            self.events.push(Event::Back(edge.index.0));
            Ok(())
        }
        fn forward_or_cross_edge(&mut self, edge: EdgeId, _: &G) -> Result<(), Infallible> {
            self.events.push(Event::ForwardOrCross(edge.index.0));
            Ok(())
        }
        fn finish_edge(&mut self, edge: EdgeId, _: &G) -> Result<(), Infallible> {
            self.events.push(Event::FinishEdge(edge.index.0));
            Ok(())
        }
    }

    fn run(graph: &DiGraph) -> Vec<Event> {
        let mut recorder = Recorder::default();
        dfs(graph, &mut recorder).unwrap();
        recorder.events
    }

    #[test]
    fn event_trace_matches_recursive_formulation() {
        // 0 -> 1 -> 2, 0 -> 2, 3 -> 1
        let mut g = DiGraph::with_nodes(4);
        g.add_edge(NodeIndex(0), NodeIndex(1), ()).unwrap(); // e0
        g.add_edge(NodeIndex(0), NodeIndex(2), ()).unwrap(); // e1
        g.add_edge(NodeIndex(1), NodeIndex(2), ()).unwrap(); // e2
        g.add_edge(NodeIndex(3), NodeIndex(1), ()).unwrap(); // e3

        use Event::*;
        assert_eq!(
            run(&g),
            vec![
                Init(0),
                Init(1),
                Init(2),
                Init(3),
                Start(0),
                Discover(0),
                Examine(0),
                Tree(0),
                Discover(1),
                Examine(2),
                Tree(2),
                Discover(2),
                Finish(2),
                FinishEdge(2),
                Finish(1),
                FinishEdge(0),
                Examine(1),
                ForwardOrCross(1),
                FinishEdge(1),
                Finish(0),
                Start(3),
                Discover(3),
                Examine(3),
                ForwardOrCross(3),
                FinishEdge(3),
                Finish(3),
            ]
        );
    }

    #[test]
    fn back_edge_fires_inside_a_cycle() {
        let mut g = DiGraph::with_nodes(3);
        g.add_edge(NodeIndex(0), NodeIndex(1), ()).unwrap();
        g.add_edge(NodeIndex(1), NodeIndex(2), ()).unwrap();
        g.add_edge(NodeIndex(2), NodeIndex(0), ()).unwrap(); // closes the cycle

        let events = run(&g);
        assert!(events.contains(&Event::Back(2)));
    }

    #[test]
    fn self_loop_is_a_back_edge() {
        let mut g = DiGraph::with_nodes(1);
        g.add_edge(NodeIndex(0), NodeIndex(0), ()).unwrap();
        assert!(run(&g).contains(&Event::Back(0)));
    }

    #[test]
    fn every_node_discovered_and_finished_exactly_once() {
        // two components, one of them cyclic
        let mut g = DiGraph::with_nodes(6);
        for (s, t) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 3), (1, 1)] {
            g.add_edge(NodeIndex(s), NodeIndex(t), ()).unwrap();
        }

        let events = run(&g);
        for v in 0..6 {
            let discovered = events
                .iter()
                .filter(|e| **e == Event::Discover(v))
                .count();
            let finished = events.iter().filter(|e| **e == Event::Finish(v)).count();
            assert_eq!((discovered, finished), (1, 1), "node {v}");
        }
        // every edge classified exactly once
        let classified = events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    Event::Tree(_) | Event::Back(_) | Event::ForwardOrCross(_)
                )
            })
            .count();
        assert_eq!(classified, g.edge_count());
    }

    #[test]
    fn hook_error_aborts_traversal() {
        struct Bomb {
            seen: usize,
        }
        impl<G: GraphView> DfsVisitor<G> for Bomb {
            type Error = String;
            fn discover_vertex(&mut self, node: NodeIndex, _: &G) -> Result<(), String> {
                self.seen += 1;
                if node == NodeIndex(1) {
                    Err(format!("boom at {node}"))
                } else {
                    Ok(())
                }
            }
        }

        let mut g: DiGraph = DiGraph::with_nodes(3);
        g.add_edge(NodeIndex(0), NodeIndex(1), ()).unwrap();
        g.add_edge(NodeIndex(1), NodeIndex(2), ()).unwrap();

        let mut bomb = Bomb { seen: 0 };
        assert_eq!(dfs(&g, &mut bomb), Err("boom at 1".to_string()));
        // node 2 was never reached
        assert_eq!(bomb.seen, 2);
    }

    #[test]
    fn deep_chain_does_not_exhaust_the_host_stack() {
        let n = 200_000;
        let mut g: DiGraph = DiGraph::with_nodes(n);
        for k in 0..n - 1 {
            g.add_edge(NodeIndex(k), NodeIndex(k + 1), ()).unwrap();
        }
        dfs(&g, &mut NullVisitor).unwrap();
    }

    #[test]
    fn classification_covers_forward_and_cross_cases() {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3: the second edge into 3 sees black
        let mut g = DiGraph::with_nodes(4);
        g.add_edge(NodeIndex(0), NodeIndex(1), ()).unwrap();
        g.add_edge(NodeIndex(0), NodeIndex(2), ()).unwrap();
        g.add_edge(NodeIndex(1), NodeIndex(3), ()).unwrap();
        let cross = g.add_edge(NodeIndex(2), NodeIndex(3), ()).unwrap();

        let events = run(&g);
        assert!(events.contains(&Event::ForwardOrCross(cross.index.0)));
        assert!(!events.contains(&Event::Back(cross.index.0)));
    }
}
