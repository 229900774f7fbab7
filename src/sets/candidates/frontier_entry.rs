use crate::{search::VertexId, sets::candidates::TotalF64};

/// A vertex waiting in the Dijkstra frontier, tagged with the tentative
/// distance it was enqueued with.
///
/// A vertex may sit in the frontier several times with different distances;
/// only the first pop is authoritative. Ordering is by distance, then by vertex
/// id so that heap order is reproducible across runs.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
pub struct FrontierEntry {
    /// Tentative distance from the source at the time of enqueueing.
    pub distance: TotalF64,

    /// Vertex in the route graph arena.
    pub vertex: VertexId,
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}
