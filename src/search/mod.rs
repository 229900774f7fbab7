//! Indoor routing: the POI graph of a building and shortest paths over it.

mod navigator;
mod poi;
mod route_graph;
mod shortest_path;
mod vertex;
mod weight;

pub use navigator::*;
pub use poi::*;
pub use route_graph::*;
pub use shortest_path::*;
pub use vertex::*;
pub use weight::*;
