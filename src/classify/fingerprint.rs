use hashbrown::HashMap;
use serde_json::Value;

use crate::error::{NavError, Result};

/// The MAC → RSS readings of one live WiFi scan.
///
/// Built once from the client-submitted scan and never mutated afterwards.
/// When a MAC appears more than once in the scan the last reading wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fingerprint {
    readings: HashMap<String, i32>,
}

impl Fingerprint {
    /// Parses a client scan of the form `{ "wifi": [ {"MAC": "..", "rss": -40}, ... ] }`.
    ///
    /// The whole scan is rejected on the first malformed entry; nothing is
    /// skipped. `rss` may be a JSON integer or a string holding one.
    ///
    /// # Errors
    /// [`NavError::InvalidScanFormat`] if `wifi` is missing or not an array, or
    /// if any entry lacks a usable `MAC` or `rss`.
    pub fn from_scan(scan: &Value) -> Result<Self> {
        let listen_list = scan
            .get("wifi")
            .and_then(Value::as_array)
            .ok_or_else(|| NavError::InvalidScanFormat("wifi parameter is not an array".into()))?;

        let mut readings = HashMap::with_capacity(listen_list.len());
        for (position, listen_object) in listen_list.iter().enumerate() {
            let (Some(mac), Some(rss)) = (listen_object.get("MAC"), listen_object.get("rss")) else {
                return Err(NavError::InvalidScanFormat(format!(
                    "wifi entry {position} requires MAC and rss"
                )));
            };
            let mac = mac
                .as_str()
                .filter(|m| !m.is_empty())
                .ok_or_else(|| {
                    NavError::InvalidScanFormat(format!("wifi entry {position} has an invalid MAC"))
                })?;
            let rss = parse_rss(rss).ok_or_else(|| {
                NavError::InvalidScanFormat(format!(
                    "wifi entry {position} has a non-integer rss: {rss}"
                ))
            })?;
            readings.insert(mac.to_string(), rss);
        }

        Ok(Fingerprint { readings })
    }

    /// Builds a fingerprint from already-typed readings.
    ///
    /// # Errors
    /// [`NavError::InvalidScanFormat`] if a MAC is empty.
    pub fn from_readings<I, S>(readings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        let mut map = HashMap::new();
        for (mac, rss) in readings {
            let mac = mac.into();
            if mac.is_empty() {
                return Err(NavError::InvalidScanFormat("empty MAC address".into()));
            }
            map.insert(mac, rss);
        }
        Ok(Fingerprint { readings: map })
    }

    pub fn get(&self, mac: &str) -> Option<i32> {
        self.readings.get(mac).copied()
    }

    pub fn contains(&self, mac: &str) -> bool {
        self.readings.contains_key(mac)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.readings.iter().map(|(mac, &rss)| (mac.as_str(), rss))
    }

    /// The `n` MACs heard loudest in this scan, strongest first.
    ///
    /// These select which historical radio records the fingerprint store is
    /// asked for. Equal RSS values are ordered by MAC so that the selection
    /// does not depend on hash order.
    pub fn strongest_macs(&self, n: usize) -> Vec<String> {
        let mut by_strength: Vec<(&String, i32)> =
            self.readings.iter().map(|(mac, &rss)| (mac, rss)).collect();
        by_strength.sort_by(|(mac_a, rss_a), (mac_b, rss_b)| {
            rss_b.cmp(rss_a).then_with(|| mac_a.cmp(mac_b))
        });
        by_strength
            .into_iter()
            .take(n)
            .map(|(mac, _)| mac.clone())
            .collect()
    }
}

fn parse_rss(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
}
