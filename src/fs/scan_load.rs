use std::{fs::File, io::BufReader, path::Path};

use serde_json::Value;

use crate::{classify::Fingerprint, error::Result};

impl Fingerprint {
    /// Reads a client scan document `{ "wifi": [ {"MAC": .., "rss": ..}, .. ] }`
    /// and validates it with [`Fingerprint::from_scan`].
    pub fn load_from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let scan: Value = serde_json::from_reader(reader)?;
        Fingerprint::from_scan(&scan)
    }
}
