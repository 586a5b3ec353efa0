//! Graph algorithms, written against the read-only
//! [`GraphView`](crate::adjacency::view::GraphView) contract rather than any
//! concrete storage.

pub mod dfs;
pub mod topological_order;
