//! External collaborators of the core: where radio-map readings and building
//! graphs come from.
//!
//! The traits are what the classifier and the router depend on; the in-memory
//! implementations back the command-line tool and the tests.

mod cached_graph_store;
mod fingerprint_store;
mod graph_store;

pub use cached_graph_store::*;
pub use fingerprint_store::*;
pub use graph_store::*;
