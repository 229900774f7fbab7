use std::fmt::Debug;

use crate::search::Edge;

/// The frozen outgoing edges of one route graph vertex.
///
/// Edges are collected in a growable list while the graph is being built and
/// frozen into a boxed slice once every connection has been inserted. Order is
/// insertion order, which keeps relaxation order (and hence the choice among
/// equal-length paths) reproducible.
pub struct FixedEdgeSet {
    edges: Box<[Edge]>,
}

impl FixedEdgeSet {
    /// Creates a new fixed set from the edges collected during the build.
    pub fn new(edges: Vec<Edge>) -> Self {
        FixedEdgeSet {
            edges: edges.into_boxed_slice(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl Debug for FixedEdgeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedEdgeSet")
            .field("edges", &self.edges)
            .finish()
    }
}
