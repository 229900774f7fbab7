use std::fmt::Debug;

use crate::{search::Poi, sets::fixed::FixedEdgeSet};

/// Position of a vertex in the route graph arena.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Debug)]
pub struct VertexId {
    pub internal: usize,
}

/// A directed adjacency entry. The reverse entry lives on the target vertex.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Edge {
    pub weight: f64,
    pub target: VertexId,
}

/// One POI of the route graph and its outgoing edges.
///
/// Vertices carry no search state; distances and predecessors live in the
/// per-search scratch of the shortest-path engine.
pub struct Vertex {
    pub poi: Poi,
    pub edges: FixedEdgeSet,
}

impl Debug for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vertex")
            .field("puid", &self.poi.puid)
            .field("edges", &self.edges)
            .finish()
    }
}
