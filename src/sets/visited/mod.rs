//! Settled-vertex tracking for shortest-path searches.

mod visited_bitset;
mod visitor_set;

pub use visited_bitset::*;
pub use visitor_set::*;
