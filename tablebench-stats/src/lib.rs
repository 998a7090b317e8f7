#![warn(missing_docs)]
//! tablebench Statistical Engine
//!
//! Reduces a measurement sequence (whole microseconds, one sample per timed
//! render) to the three figures tablebench reports:
//! - Minimum, seeded with the first sample
//! - Maximum, seeded with zero
//! - Integer-truncated average

mod summary;

pub use summary::{LatencySummary, StatsError, compute_summary};
