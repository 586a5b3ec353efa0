//! # Siskin
//!
//! Siskin is a Rust library dedicated to in-memory directed graphs and the
//! traversals built on top of them. Its adjacency-list storage hands out
//! dense, stable integer descriptors for nodes and edges, supports optional
//! node and edge payloads, and comes in two type-level structural variants
//! (out-edges only, or out- and in-edges).
//!
//! The algorithms (depth-first search with a pluggable visitor protocol,
//! and topological sorting derived from it) consume the storage exclusively
//! through its lazy view layer, so they run unmodified over either variant.
//!
//! ```
//! use siskin::adjacency::DiGraph;
//! use siskin::algorithms::topological_order::topo_sort;
//!
//! let mut g: DiGraph = DiGraph::new();
//! let a = g.add_node(());
//! let b = g.add_node(());
//! let c = g.add_node(());
//! g.add_edge(a, b, ()).unwrap();
//! g.add_edge(b, c, ()).unwrap();
//!
//! assert_eq!(topo_sort(&g).unwrap(), vec![a, b, c]);
//! ```

pub mod adjacency;
pub mod algorithms;
mod indexed_vec;
