//! Loading buildings, radio maps, scans and route batches from disk.
//!
//! Buildings and scans are single JSON documents; radio maps are JSON Lines
//! with one located reading per line, the shape radio-map exports come in.

mod building_load;
mod query_load;
mod radiomap_load;
mod scan_load;

pub use building_load::*;
pub use query_load::*;
pub use radiomap_load::*;
pub use scan_load::*;
