use hashbrown::HashSet;
use serde::Deserialize;

use crate::{
    classify::{FloorLabel, RadioRecord, int_or_numeric_string},
    error::Result,
};

/// A latitude/longitude rectangle handed to the fingerprint store to restrict
/// which radio-map samples are considered.
///
/// How the box is derived from a device position is the caller's business;
/// this type only carries the corners.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        BoundingBox {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Inclusive containment on both axes.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

/// Source of historical radio-map readings for floor classification.
pub trait FingerprintStore {
    /// Returns every reading of each historical scan, recorded inside `bbox`,
    /// in which `mac` was heard.
    ///
    /// Records must be ordered so that readings sharing a timestamp are
    /// contiguous; the classifier groups buckets by position.
    fn records_near(&self, mac: &str, bbox: &BoundingBox) -> Result<Vec<RadioRecord>>;
}

/// A radio-map reading together with where it was recorded.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LocatedRecord {
    pub lat: f64,
    pub lon: f64,
    pub timestamp: String,
    pub floor: FloorLabel,
    #[serde(rename = "MAC")]
    pub mac: String,
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub rss: i32,
}

impl LocatedRecord {
    pub fn to_record(&self) -> RadioRecord {
        RadioRecord {
            timestamp: self.timestamp.clone(),
            floor: self.floor.clone(),
            mac: self.mac.clone(),
            rss: self.rss,
        }
    }
}

/// In-memory radio map.
///
/// Results are sorted by timestamp (string order, stable), which keeps the
/// readings of one scan contiguous.
#[derive(Clone, Debug, Default)]
pub struct MemoryFingerprintStore {
    samples: Vec<LocatedRecord>,
}

impl MemoryFingerprintStore {
    pub fn new(samples: Vec<LocatedRecord>) -> Self {
        MemoryFingerprintStore { samples }
    }

    pub fn push(&mut self, sample: LocatedRecord) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl FingerprintStore for MemoryFingerprintStore {
    fn records_near(&self, mac: &str, bbox: &BoundingBox) -> Result<Vec<RadioRecord>> {
        let in_box = || self.samples.iter().filter(|s| bbox.contains(s.lat, s.lon));

        let scans_hearing_mac: HashSet<&str> = in_box()
            .filter(|s| s.mac == mac)
            .map(|s| s.timestamp.as_str())
            .collect();

        let mut records: Vec<RadioRecord> = in_box()
            .filter(|s| scans_hearing_mac.contains(s.timestamp.as_str()))
            .map(LocatedRecord::to_record)
            .collect();
        records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(records)
    }
}
