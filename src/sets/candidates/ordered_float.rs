use std::{cmp::Ordering, hash::Hash, hash::Hasher};

/// A wrapper around f64 that provides total ordering and proper equality semantics.
///
/// Similarity scores and path distances are plain f64 values, which cannot be
/// used directly as keys of sorted containers or a `BinaryHeap`. This wrapper
/// compares with `f64::total_cmp`, so `+∞` sorts after every finite distance
/// and NaN sorts last.
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct TotalF64(pub f64);

impl TotalF64 {
    pub const INFINITY: TotalF64 = TotalF64(f64::INFINITY);

    pub fn is_infinite(self) -> bool {
        self.0.is_infinite()
    }
}

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for TotalF64 {
    fn from(x: f64) -> Self {
        TotalF64(x)
    }
}

impl Hash for TotalF64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality() {
        assert_eq!(TotalF64(1.0), TotalF64(1.0));
        assert_ne!(TotalF64(1.0), TotalF64(2.0));
    }

    #[test]
    fn test_ordering_with_negative_scores() {
        // similarity scores go negative once enough MACs match
        let neg = TotalF64(-17.2);
        let zero = TotalF64(0.0);
        let pos = TotalF64(4.5);

        assert!(neg < zero);
        assert!(zero < pos);
        assert!(neg < pos);
    }

    #[test]
    fn test_infinity_sorts_after_distances() {
        let far = TotalF64(1e300);
        assert!(far < TotalF64::INFINITY);
        assert!(TotalF64::INFINITY.is_infinite());
        assert!(!far.is_infinite());
    }

    #[test]
    fn test_nan_sorts_last() {
        let nan = TotalF64(f64::NAN);
        assert!(nan > TotalF64::INFINITY);
        assert_eq!(nan, TotalF64(f64::NAN));
    }

    #[test]
    fn test_sort() {
        let mut values = [
            TotalF64(3.0),
            TotalF64(f64::INFINITY),
            TotalF64(-1.0),
            TotalF64(0.0),
        ];
        values.sort();
        assert_eq!(
            values.map(|v| v.0),
            [-1.0, 0.0, 3.0, f64::INFINITY]
        );
    }
}
