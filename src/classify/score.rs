use crate::classify::{Fingerprint, ScanBucket};

/// Tunable terms of the bucket/fingerprint similarity score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimilarityWeights {
    /// Subtracted once per bucket reading whose MAC is also in the fingerprint (`a`).
    pub matched_reward: f64,
    /// Added once per bucket reading whose MAC is absent from the fingerprint (`b`).
    pub unmatched_penalty: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        SimilarityWeights {
            matched_reward: 10.0,
            unmatched_penalty: 10.0,
        }
    }
}

/// Scores how closely a historical bucket resembles the live fingerprint.
///
/// ```text
/// score = sqrt(Σ_{matched} (bucket_rss - live_rss)^2) - a * matched + b * unmatched
/// ```
///
/// Lower is more similar. This is not a normalized distance: a bucket that
/// shares many MACs with the fingerprint scores below zero. MACs present in the
/// fingerprint but not in the bucket do not contribute.
pub fn similarity(bucket: &ScanBucket, fingerprint: &Fingerprint, weights: SimilarityWeights) -> f64 {
    let mut squared_sum: i64 = 0;
    let mut matched: u32 = 0;
    let mut unmatched: u32 = 0;

    for reading in &bucket.readings {
        match fingerprint.get(&reading.mac) {
            Some(live_rss) => {
                let diff = i64::from(reading.rss) - i64::from(live_rss);
                squared_sum += diff * diff;
                matched += 1;
            }
            None => unmatched += 1,
        }
    }

    (squared_sum as f64).sqrt() - weights.matched_reward * f64::from(matched)
        + weights.unmatched_penalty * f64::from(unmatched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live() -> Fingerprint {
        Fingerprint::from_readings([("m1", -40), ("m2", -60)]).unwrap()
    }

    #[test]
    fn test_exact_formula() {
        // diffs: -2 and +2 -> sqrt(8); two matches
        let bucket = ScanBucket::new("1", "1", &[("m1", -42), ("m2", -58)]);
        let score = similarity(&bucket, &live(), SimilarityWeights::default());
        assert!((score - (8f64.sqrt() - 20.0)).abs() < 1e-12);
    }

    #[test]
    fn test_unmatched_only() {
        let bucket = ScanBucket::new("1", "2", &[("m3", -70)]);
        let score = similarity(&bucket, &live(), SimilarityWeights::default());
        assert_eq!(score, 10.0);
    }

    #[test]
    fn test_empty_bucket_scores_zero() {
        let bucket = ScanBucket::new("1", "2", &[]);
        assert_eq!(similarity(&bucket, &live(), SimilarityWeights::default()), 0.0);
    }

    #[test]
    fn test_custom_weights() {
        let weights = SimilarityWeights {
            matched_reward: 1.0,
            unmatched_penalty: 100.0,
        };
        let bucket = ScanBucket::new("1", "0", &[("m1", -43), ("zz", -90)]);
        // sqrt(9) - 1 + 100
        assert_eq!(similarity(&bucket, &live(), weights), 102.0);
    }

    #[test]
    fn test_more_matches_never_score_worse_at_equal_deltas() {
        let fp = Fingerprint::from_readings([("m1", -40), ("m2", -50), ("m3", -60)]).unwrap();
        let weights = SimilarityWeights::default();

        // every bucket has three readings and identical zero RSS deltas on their matches
        let three_matched = ScanBucket::new("1", "0", &[("m1", -40), ("m2", -50), ("m3", -60)]);
        let two_matched = ScanBucket::new("2", "0", &[("m1", -40), ("m2", -50), ("x", -60)]);
        let one_matched = ScanBucket::new("3", "0", &[("m1", -40), ("y", -50), ("x", -60)]);

        let s3 = similarity(&three_matched, &fp, weights);
        let s2 = similarity(&two_matched, &fp, weights);
        let s1 = similarity(&one_matched, &fp, weights);
        assert!(s3 <= s2 && s2 <= s1);
        assert_eq!(s3, -30.0);
    }
}
