//! Crate-wide error type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NavError>;

/// Errors produced while classifying scans, building route graphs or loading
/// their inputs.
///
/// Unreachable targets and low-confidence classifications are *not* errors:
/// they surface as an empty [`Route`](crate::search::Route) and an
/// unconfident [`Classification`](crate::classify::Classification).
#[derive(Debug, Error)]
pub enum NavError {
    /// The client-submitted scan is structurally invalid.
    #[error("invalid scan format: {0}")]
    InvalidScanFormat(String),

    /// A connection weight could not be parsed and the active policy rejects it.
    #[error("invalid weight '{raw}' on connection {pois_a} <-> {pois_b}")]
    InvalidWeight {
        pois_a: String,
        pois_b: String,
        raw: String,
    },

    /// The graph store has no data for the requested building.
    #[error("unknown building: {0}")]
    UnknownBuilding(String),

    /// Configuration values are out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A radio-map JSON Lines file holds a record that does not parse.
    #[error("radio map line {line}: {source}")]
    RadioMapLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
