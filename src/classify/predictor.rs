use serde_json::Value;
use tracing::{debug, info};

use crate::{
    classify::{Classification, Fingerprint, FloorClassifier},
    config::ClassifierConfig,
    error::Result,
    statistics::Stats,
    store::{BoundingBox, FingerprintStore},
};

/// Predicts the floor of a live scan from the radio map around it.
///
/// The store is queried once per strong MAC of the scan; every returned record
/// stream is fed to one shared [`FloorClassifier`], so the historical scans of
/// all queried MACs compete for the same top-k slots.
#[derive(Clone, Debug, Default)]
pub struct FloorPredictor {
    config: ClassifierConfig,
}

impl FloorPredictor {
    /// # Errors
    /// [`NavError::InvalidConfig`](crate::error::NavError::InvalidConfig) if
    /// `config` does not pass [`ClassifierConfig::validate`].
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(FloorPredictor { config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Queries the store with the `strongest_macs` loudest MACs of the scan.
    pub fn predict<S: FingerprintStore + ?Sized>(
        &self,
        store: &S,
        fingerprint: &Fingerprint,
        bbox: &BoundingBox,
        stats: &mut Stats,
    ) -> Result<Classification> {
        let macs = fingerprint.strongest_macs(self.config.strongest_macs);
        self.predict_with_macs(store, fingerprint, bbox, &macs, stats)
    }

    /// Queries the store with an explicit list of MACs, in order.
    ///
    /// Each MAC's stream is grouped on its own: a bucket never spans two
    /// streams even when the timestamps line up.
    pub fn predict_with_macs<S: FingerprintStore + ?Sized>(
        &self,
        store: &S,
        fingerprint: &Fingerprint,
        bbox: &BoundingBox,
        macs: &[String],
        stats: &mut Stats,
    ) -> Result<Classification> {
        let mut classifier = FloorClassifier::new(fingerprint, &self.config)?;
        for mac in macs {
            let records = store.records_near(mac, bbox)?;
            debug!(mac = %mac, records = records.len(), "radio map records fetched");
            classifier.consume(records);
        }

        let classification = classifier.finish(stats);
        info!(
            floor = %classification.floor,
            confident = classification.confident,
            macs = macs.len(),
            readings = classification.readings_examined,
            "floor predicted"
        );
        Ok(classification)
    }

    /// Parses a client scan and predicts its floor.
    ///
    /// # Errors
    /// [`NavError::InvalidScanFormat`](crate::error::NavError::InvalidScanFormat)
    /// before the store is touched if the scan is malformed.
    pub fn predict_scan<S: FingerprintStore + ?Sized>(
        &self,
        store: &S,
        scan: &Value,
        bbox: &BoundingBox,
        stats: &mut Stats,
    ) -> Result<Classification> {
        let fingerprint = Fingerprint::from_scan(scan)?;
        self.predict(store, &fingerprint, bbox, stats)
    }
}
