use std::{fs::File, io::BufReader, path::Path};

use crate::{error::Result, search::RouteQuery};

pub trait Queries: Sized {
    fn load_from_json<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl Queries for Vec<RouteQuery> {
    /// Reads a JSON array of `{ "from": puid, "to": puid }` objects.
    fn load_from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        Ok(serde_json::from_reader(reader)?)
    }
}
