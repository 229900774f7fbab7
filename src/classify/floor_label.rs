use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a building floor as stored alongside radio-map samples
/// (`"-1"`, `"0"`, `"3"`, ...).
///
/// Labels are compared as opaque strings; `"01"` and `"1"` are different floors.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorLabel(String);

impl FloorLabel {
    pub fn new(label: impl Into<String>) -> Self {
        FloorLabel(label.into())
    }

    /// The floor reported when no bucket could be scored at all.
    pub fn ground() -> Self {
        FloorLabel("0".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FloorLabel {
    fn from(label: &str) -> Self {
        FloorLabel(label.to_string())
    }
}

impl From<String> for FloorLabel {
    fn from(label: String) -> Self {
        FloorLabel(label)
    }
}

impl fmt::Display for FloorLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
