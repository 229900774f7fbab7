use std::vec::IntoIter;

use crate::sets::candidates::ScoredBucket;

/// A bounded list that keeps the k most similar scan buckets seen so far.
///
/// Members are kept in ascending similarity order (best first). Unlike a
/// nearest-neighbour candidate set there is no deduplication: two buckets with
/// the same score are distinct measurements and both take a slot.
///
/// # Insertion Semantics
/// - The new entry goes before the first member whose similarity is strictly greater,
///   so entries with equal scores keep their arrival order
/// - If that insertion pushes the length past capacity, the worst (last) member is dropped
/// - If no member is greater and the list is not full, the entry is appended
/// - If no member is greater and the list is full, the entry is ignored
pub struct SmallestKBuckets {
    sorted_members: Vec<ScoredBucket>,
    capacity: usize,
}

impl SmallestKBuckets {
    /// Creates a new empty `SmallestKBuckets` with the specified capacity.
    ///
    /// # Panics
    /// Panics if `capacity == 0`
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0);
        SmallestKBuckets {
            sorted_members: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Offers one scored bucket to the list.
    ///
    /// # Returns
    /// `true` if the bucket was retained
    pub fn insert(&mut self, item: ScoredBucket) -> bool {
        // first member that is strictly worse than the new one
        let idx = self.sorted_members.partition_point(|m| *m <= item);

        if idx >= self.capacity {
            return false;
        }

        self.sorted_members.insert(idx, item);
        if self.sorted_members.len() > self.capacity {
            self.sorted_members.pop();
        }
        true
    }

    pub fn len(&self) -> usize {
        self.sorted_members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns an iterator over the retained buckets, most similar first.
    pub fn iter(&self) -> std::slice::Iter<'_, ScoredBucket> {
        self.sorted_members.iter()
    }
}

impl IntoIterator for SmallestKBuckets {
    type Item = ScoredBucket;
    type IntoIter = IntoIter<ScoredBucket>;

    fn into_iter(self) -> IntoIter<ScoredBucket> {
        self.sorted_members.into_iter()
    }
}
