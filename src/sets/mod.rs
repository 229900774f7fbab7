//! Specialized data structures for floor classification and route search.
//!
//! # Submodules
//!
//! - [`candidates`]: Ordered entries and the bounded top-k list of scored scan buckets
//! - [`fixed`]: Frozen outgoing edge lists for route graph vertices
//! - [`visited`]: Bitmap-based settled-vertex tracking for shortest-path searches

pub mod candidates;
pub mod fixed;
pub mod visited;
