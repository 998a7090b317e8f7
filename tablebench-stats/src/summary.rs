//! Latency Summary
//!
//! The seeds are part of the contract: `min` starts at the first sample and
//! `max` starts at 0, which is only sound because elapsed durations are
//! unsigned. The average divides the exact sum by the sample count and
//! truncates toward zero.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reducing a measurement sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// No samples to reduce
    #[error("measurement sequence is empty")]
    Empty,
}

/// Min / max / average of a measurement sequence, in microseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySummary {
    /// Smallest sample
    pub min_micros: u64,
    /// Largest sample
    pub max_micros: u64,
    /// Sum divided by sample count, truncated
    pub average_micros: u64,
    /// Number of samples reduced
    pub sample_count: usize,
}

/// Reduce `samples` to min, max and truncated average
pub fn compute_summary(samples: &[u64]) -> Result<LatencySummary, StatsError> {
    let first = *samples.first().ok_or(StatsError::Empty)?;

    let mut min = first;
    let mut max = 0u64;
    let mut sum: u128 = 0;

    for &sample in samples {
        if sample < min {
            min = sample;
        }
        if sample > max {
            max = sample;
        }
        sum += u128::from(sample);
    }

    // sum / len <= max, so the quotient always fits
    let average = (sum / samples.len() as u128) as u64;

    Ok(LatencySummary {
        min_micros: min,
        max_micros: max,
        average_micros: average,
        sample_count: samples.len(),
    })
}
