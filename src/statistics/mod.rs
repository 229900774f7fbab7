//! Work counters for floor classification and route search.
//!
//! Each worker keeps its own [`Stats`] and the caller merges them once the
//! workers are done, so counting never needs synchronization.

mod stats;
pub use stats::*;
