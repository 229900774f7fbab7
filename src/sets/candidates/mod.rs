//! Ordered entries and bounded collections used by the classifier and the router.
//!
//! This module provides a totally ordered float wrapper, the scored-bucket and
//! frontier entries built on top of it, and the bounded k-smallest list that
//! retains the best matching scan buckets.

mod frontier_entry;
mod ordered_float;
mod scored_bucket;
mod smallest_k;

pub use frontier_entry::*;
pub use ordered_float::*;
pub use scored_bucket::*;
pub use smallest_k::*;
