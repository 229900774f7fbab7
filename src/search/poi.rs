use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

/// A point of interest as stored for a building.
///
/// Only `puid` matters to routing; every other field is carried through
/// untouched so the route can hand back the original records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub puid: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Poi {
    pub fn new(puid: impl Into<String>) -> Self {
        Poi {
            puid: puid.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }
}

/// A stored link between two POIs.
///
/// Connections are directional records at rest but always produce an
/// undirected pair of edges in the route graph. `weight` is kept as the raw
/// decimal text; it is parsed when the graph is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub pois_a: String,
    pub pois_b: String,
    #[serde(deserialize_with = "weight_text")]
    pub weight: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Connection {
    pub fn new(pois_a: impl Into<String>, pois_b: impl Into<String>, weight: impl Into<String>) -> Self {
        Connection {
            pois_a: pois_a.into(),
            pois_b: pois_b.into(),
            weight: weight.into(),
            attributes: Map::new(),
        }
    }
}

/// Weights are decimal strings in the store, but a bare JSON number is
/// accepted and rendered back to text.
fn weight_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        // integers print as-is; floats go through `f64`'s Display, which
        // never uses exponent notation and round-trips exactly
        Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() => Ok(format!("{f}")),
            _ => Ok(n.to_string()),
        },
        other => Err(de::Error::custom(format!(
            "weight must be a string or number, got {other}"
        ))),
    }
}
