use crate::{search::VertexId, sets::visited::VisitorSet};

/// A fixed-capacity set of vertex ids packed one bit per vertex.
///
/// Sized once for a given route graph; every search allocates its own, so no
/// visited state survives from one search to the next.
///
/// # Examples
///
/// ```
/// use floorpath::search::VertexId;
/// use floorpath::sets::visited::{VisitedBitset, VisitorSet};
///
/// let mut visited = VisitedBitset::new(10);
/// assert!(!visited.contains(VertexId { internal: 3 }));
///
/// visited.insert(VertexId { internal: 3 });
/// assert!(visited.contains(VertexId { internal: 3 }));
/// ```
pub struct VisitedBitset {
    buffer: Box<[u8]>,
    capacity: usize,
}

impl VisitedBitset {
    /// Constructs an empty set with room for vertex ids `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        let bytes_needed: usize = capacity.div_ceil(8);
        VisitedBitset {
            buffer: vec![0u8; bytes_needed].into_boxed_slice(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn locate(&self, vertex: VertexId) -> (usize, u8) {
        let index = vertex.internal;
        assert!(index < self.capacity);
        (index / 8, 1u8 << (index % 8))
    }
}

impl VisitorSet for VisitedBitset {
    /// # Panics
    ///
    /// Panics if `vertex.internal >= capacity`.
    fn contains(&self, vertex: VertexId) -> bool {
        let (byte_index, mask) = self.locate(vertex);
        self.buffer[byte_index] & mask != 0
    }

    /// # Panics
    ///
    /// Panics if `vertex.internal >= capacity`.
    fn insert(&mut self, vertex: VertexId) -> bool {
        let (byte_index, mask) = self.locate(vertex);
        let fresh = self.buffer[byte_index] & mask == 0;
        self.buffer[byte_index] |= mask;
        fresh
    }
}
