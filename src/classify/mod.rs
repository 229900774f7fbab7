//! WiFi fingerprint floor classification.
//!
//! A live scan becomes a [`Fingerprint`]; historical radio-map readings come
//! back from a [`FingerprintStore`](crate::store::FingerprintStore) as
//! timestamp-ordered [`RadioRecord`]s, are grouped into [`ScanBucket`]s, scored
//! against the fingerprint, and the best `k` buckets vote a floor.

mod fingerprint;
mod floor_classifier;
mod floor_label;
mod predictor;
mod radio_record;
mod score;

pub use fingerprint::*;
pub use floor_classifier::*;
pub use floor_label::*;
pub use predictor::*;
pub use radio_record::*;
pub use score::*;
