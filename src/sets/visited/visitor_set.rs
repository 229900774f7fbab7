use crate::search::VertexId;

/// Tracks which vertices a search has already settled.
pub trait VisitorSet {
    fn contains(&self, vertex: VertexId) -> bool;

    /// Marks `vertex` as settled.
    ///
    /// # Returns
    /// `true` if the vertex was not settled before
    fn insert(&mut self, vertex: VertexId) -> bool;
}
