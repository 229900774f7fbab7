use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::info;

use crate::{
    error::{NavError, Result},
    store::{LocatedRecord, MemoryFingerprintStore},
};

impl MemoryFingerprintStore {
    /// Reads a radio map stored as JSON Lines, one [`LocatedRecord`] per line.
    ///
    /// Blank lines are ignored. The first malformed line aborts the load and
    /// is reported with its 1-based line number.
    pub fn load_from_jsonl<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let mut store = MemoryFingerprintStore::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let sample: LocatedRecord = serde_json::from_str(&line).map_err(|source| {
                NavError::RadioMapLine {
                    line: index + 1,
                    source,
                }
            })?;
            store.push(sample);
        }

        info!(samples = store.len(), path = %path.as_ref().display(), "radio map loaded");
        Ok(store)
    }
}
