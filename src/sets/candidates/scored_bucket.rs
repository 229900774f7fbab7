use crate::{classify::FloorLabel, sets::candidates::TotalF64};

/// One historical scan bucket after it has been compared with the live
/// fingerprint.
///
/// Entries are ordered by similarity only (ascending, lower is more similar);
/// two buckets from different floors with the same score compare equal.
#[derive(Clone, Debug)]
pub struct ScoredBucket {
    /// Similarity score of the bucket against the fingerprint. May be negative.
    pub similarity: TotalF64,

    /// Floor the bucket was recorded on.
    pub floor: FloorLabel,
}

impl ScoredBucket {
    pub fn new(similarity: f64, floor: FloorLabel) -> Self {
        ScoredBucket {
            similarity: similarity.into(),
            floor,
        }
    }
}

impl PartialEq for ScoredBucket {
    fn eq(&self, other: &Self) -> bool {
        self.similarity == other.similarity
    }
}

impl Eq for ScoredBucket {}

impl PartialOrd for ScoredBucket {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredBucket {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.similarity.cmp(&other.similarity)
    }
}
