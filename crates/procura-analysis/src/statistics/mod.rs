//! Sample statistics for the outlier rule.
//!
//! Mean and **population** standard deviation (divide by `n`), plus the
//! validated threshold multiplier `k`.

mod multiplier;
mod sample;

pub use multiplier::Multiplier;
pub use sample::{threshold, SampleStatistics};
