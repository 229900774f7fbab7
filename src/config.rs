//! Runtime configuration for the classifier and the router.
//!
//! Every field has a default matching the reference deployment, so an empty
//! JSON object (or no file at all) yields a working configuration. The binary
//! layers its command-line flags on top of whatever is loaded here.

use std::path::Path;

use serde::Deserialize;

use crate::{
    classify::SimilarityWeights,
    error::{NavError, Result},
    search::WeightPolicy,
};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub classifier: ClassifierConfig,
    pub router: RouterConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// How many best-matching buckets take part in the floor vote.
    pub top_k: usize,
    /// Score bonus per matched MAC (`a`).
    pub matched_reward: f64,
    /// Score penalty per unmatched MAC (`b`).
    pub unmatched_penalty: f64,
    /// A classification is confident only when strictly more readings than this were examined.
    pub min_readings: usize,
    /// How many of the scan's strongest MACs are used to query the fingerprint store.
    pub strongest_macs: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let weights = SimilarityWeights::default();
        ClassifierConfig {
            top_k: 10,
            matched_reward: weights.matched_reward,
            unmatched_penalty: weights.unmatched_penalty,
            min_readings: 10,
            strongest_macs: 3,
        }
    }
}

impl ClassifierConfig {
    /// Checks that the classifier can run with these values.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(NavError::InvalidConfig("classifier.top_k must be > 0".into()));
        }
        if self.strongest_macs == 0 {
            return Err(NavError::InvalidConfig(
                "classifier.strongest_macs must be > 0".into(),
            ));
        }
        if !self.matched_reward.is_finite() || !self.unmatched_penalty.is_finite() {
            return Err(NavError::InvalidConfig(
                "classifier score weights must be finite".into(),
            ));
        }
        Ok(())
    }

    pub fn weights(&self) -> SimilarityWeights {
        SimilarityWeights {
            matched_reward: self.matched_reward,
            unmatched_penalty: self.unmatched_penalty,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// What to do with connections whose weight cannot be parsed.
    pub weight_policy: WeightPolicy,
}

impl NavConfig {
    /// Load configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: NavConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.classifier.validate()
    }
}
