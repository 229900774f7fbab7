use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::{
    error::Result,
    search::{Connection, Poi},
    store::BuildingData,
};

#[derive(Deserialize)]
struct BuildingFile {
    #[serde(default)]
    pois: Vec<Poi>,
    #[serde(default)]
    connections: Vec<Connection>,
}

impl BuildingData {
    /// Reads a building document `{ "pois": [...], "connections": [...] }`.
    ///
    /// Either list may be omitted. Nothing is validated here: unknown
    /// endpoints and bad weights are dealt with when the route graph is built.
    pub fn load_from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let file: BuildingFile = serde_json::from_reader(reader)?;
        Ok(BuildingData::new(file.pois, file.connections))
    }
}
