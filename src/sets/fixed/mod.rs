//! Frozen adjacency storage for route graph vertices.

mod edge_set;

pub use edge_set::*;
