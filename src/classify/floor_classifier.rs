use hashbrown::HashMap;
use tracing::debug;

use crate::{
    classify::{Fingerprint, FloorLabel, RadioRecord, ScanBucket, ScanBuckets, SimilarityWeights, similarity},
    config::ClassifierConfig,
    error::Result,
    sets::candidates::{ScoredBucket, SmallestKBuckets},
    statistics::Stats,
};

/// Outcome of one floor classification.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    /// The voted floor. `"0"` when no bucket was scored.
    pub floor: FloorLabel,
    /// Whether more than `min_readings` stored readings were examined.
    /// Callers should not trust `floor` when this is false.
    pub confident: bool,
    /// Number of stored readings that went through scoring.
    pub readings_examined: usize,
    /// Number of buckets that were scored.
    pub buckets_scored: usize,
    /// Vote count per floor among the retained buckets, winner first.
    pub votes: Vec<(FloorLabel, usize)>,
}

/// Streaming k-nearest-bucket floor classifier.
///
/// Buckets are scored against the live fingerprint as they arrive and only the
/// `top_k` most similar are retained; nothing else is buffered. Several
/// independent record streams (one per queried MAC) may be fed into the same
/// classifier, and they all compete for the same top-k slots.
pub struct FloorClassifier<'a> {
    fingerprint: &'a Fingerprint,
    weights: SimilarityWeights,
    min_readings: usize,
    retained: SmallestKBuckets,
    readings_examined: usize,
    buckets_scored: usize,
}

impl<'a> FloorClassifier<'a> {
    /// # Errors
    /// [`NavError::InvalidConfig`](crate::error::NavError::InvalidConfig) if
    /// `config` does not pass [`ClassifierConfig::validate`].
    pub fn new(fingerprint: &'a Fingerprint, config: &ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(FloorClassifier {
            fingerprint,
            weights: config.weights(),
            min_readings: config.min_readings,
            retained: SmallestKBuckets::new(config.top_k),
            readings_examined: 0,
            buckets_scored: 0,
        })
    }

    /// Scores one complete bucket and offers it to the top-k list.
    pub fn process(&mut self, bucket: &ScanBucket) {
        let score = similarity(bucket, self.fingerprint, self.weights);
        self.readings_examined += bucket.readings.len();
        self.buckets_scored += 1;
        self.retained
            .insert(ScoredBucket::new(score, bucket.floor.clone()));
    }

    /// Feeds one timestamp-ordered record stream.
    ///
    /// Records are grouped into buckets by contiguous timestamp; the last
    /// pending bucket is flushed when the stream ends, so a following stream
    /// never extends it.
    pub fn consume<I: IntoIterator<Item = RadioRecord>>(&mut self, records: I) {
        for bucket in ScanBuckets::new(records) {
            self.process(&bucket);
        }
    }

    /// The retained buckets, most similar first.
    pub fn retained(&self) -> std::slice::Iter<'_, ScoredBucket> {
        self.retained.iter()
    }

    /// Votes the floor among the retained buckets.
    ///
    /// The floor with most retained buckets wins. On a tie, the floor whose
    /// best bucket ranks highest in the retained list wins, i.e. the floor of
    /// the single most similar bucket among the tied floors.
    ///
    /// The work done is added to `stats`.
    pub fn finish(self, stats: &mut Stats) -> Classification {
        let votes = tally(&self.retained);
        let floor = votes
            .first()
            .map(|(floor, _)| floor.clone())
            .unwrap_or_else(FloorLabel::ground);
        let confident = self.readings_examined > self.min_readings;
        stats.bump_classification(self.buckets_scored, self.readings_examined);

        debug!(
            floor = %floor,
            confident,
            readings = self.readings_examined,
            buckets = self.buckets_scored,
            "floor classified"
        );

        Classification {
            floor,
            confident,
            readings_examined: self.readings_examined,
            buckets_scored: self.buckets_scored,
            votes,
        }
    }
}

/// Counts retained buckets per floor, ordered by (count desc, best rank asc).
fn tally(retained: &SmallestKBuckets) -> Vec<(FloorLabel, usize)> {
    // floor -> (count, rank of its best bucket)
    let mut counts: HashMap<&FloorLabel, (usize, usize)> = HashMap::new();
    for (rank, scored) in retained.iter().enumerate() {
        counts
            .entry(&scored.floor)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, rank));
    }

    let mut ranked: Vec<(&FloorLabel, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, rank_a)), (_, (count_b, rank_b))| {
        count_b.cmp(count_a).then_with(|| rank_a.cmp(rank_b))
    });
    ranked
        .into_iter()
        .map(|(floor, (count, _))| (floor.clone(), count))
        .collect()
}

/// Classifies a single timestamp-ordered record stream.
pub fn classify<I: IntoIterator<Item = RadioRecord>>(
    fingerprint: &Fingerprint,
    records: I,
    config: &ClassifierConfig,
    stats: &mut Stats,
) -> Result<Classification> {
    let mut classifier = FloorClassifier::new(fingerprint, config)?;
    classifier.consume(records);
    Ok(classifier.finish(stats))
}
