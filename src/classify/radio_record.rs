use std::iter::Peekable;

use serde::{Deserialize, Deserializer, de};

use crate::classify::FloorLabel;

/// One stored radio-map reading: a single MAC heard at a given timestamp on a
/// given floor.
///
/// This is the unit the fingerprint store streams back. Readings taken at the
/// same timestamp belong to the same historical scan and are expected to
/// arrive next to each other.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RadioRecord {
    pub timestamp: String,
    pub floor: FloorLabel,
    #[serde(rename = "MAC")]
    pub mac: String,
    #[serde(deserialize_with = "int_or_numeric_string")]
    pub rss: i32,
}

impl RadioRecord {
    pub fn new(timestamp: &str, floor: &str, mac: &str, rss: i32) -> Self {
        RadioRecord {
            timestamp: timestamp.to_string(),
            floor: floor.into(),
            mac: mac.to_string(),
            rss,
        }
    }
}

/// A single MAC/RSS pair inside a [`ScanBucket`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reading {
    pub mac: String,
    pub rss: i32,
}

/// One historical scan: every reading recorded at one timestamp, tagged with
/// the floor of the first record of the group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanBucket {
    pub timestamp: String,
    pub floor: FloorLabel,
    pub readings: Vec<Reading>,
}

impl ScanBucket {
    pub fn new(timestamp: &str, floor: &str, readings: &[(&str, i32)]) -> Self {
        ScanBucket {
            timestamp: timestamp.to_string(),
            floor: floor.into(),
            readings: readings
                .iter()
                .map(|&(mac, rss)| Reading {
                    mac: mac.to_string(),
                    rss,
                })
                .collect(),
        }
    }
}

/// Groups a timestamp-ordered stream of [`RadioRecord`]s into [`ScanBucket`]s.
///
/// A new bucket starts whenever the timestamp differs from the previous
/// record's. Grouping is purely positional: two runs of the same timestamp
/// separated by another timestamp produce two buckets. The last pending bucket
/// is yielded when the underlying stream ends.
pub struct ScanBuckets<I: Iterator<Item = RadioRecord>> {
    records: Peekable<I>,
}

impl<I: Iterator<Item = RadioRecord>> ScanBuckets<I> {
    pub fn new<T: IntoIterator<IntoIter = I>>(records: T) -> Self {
        ScanBuckets {
            records: records.into_iter().peekable(),
        }
    }
}

impl<I: Iterator<Item = RadioRecord>> Iterator for ScanBuckets<I> {
    type Item = ScanBucket;

    fn next(&mut self) -> Option<ScanBucket> {
        let first = self.records.next()?;
        let mut bucket = ScanBucket {
            timestamp: first.timestamp,
            floor: first.floor,
            readings: vec![Reading {
                mac: first.mac,
                rss: first.rss,
            }],
        };

        while let Some(record) = self.records.next_if(|r| r.timestamp == bucket.timestamp) {
            bucket.readings.push(Reading {
                mac: record.mac,
                rss: record.rss,
            });
        }

        Some(bucket)
    }
}

/// Stored radio maps keep `rss` as text; accept both forms.
pub(crate) fn int_or_numeric_string<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i32),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(v) => Ok(v),
        IntOrString::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("rss is not an integer: {s:?}"))),
    }
}
