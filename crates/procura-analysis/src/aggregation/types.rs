//! Aggregation result types.

use serde::{Deserialize, Serialize};

/// Count and sum of record values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricTotal {
    pub count: usize,
    pub sum: f64,
}

impl MetricTotal {
    pub fn add(&mut self, amount: f64) {
        self.count += 1;
        self.sum += amount;
    }

    /// Mean value, 0.0 when empty.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

impl std::ops::Sub for MetricTotal {
    type Output = MetricTotal;

    fn sub(self, rhs: MetricTotal) -> MetricTotal {
        MetricTotal {
            count: self.count.saturating_sub(rhs.count),
            sum: self.sum - rhs.sum,
        }
    }
}

/// One slice of a distribution-by-category chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare<K> {
    pub category: K,
    pub total: MetricTotal,
    /// Fraction of the valid sum, in [0.0, 1.0] when all values are
    /// non-negative. 0.0 when the valid sum is zero.
    pub share: f64,
}

/// Cross-check of the three headline aggregations of one dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub total: MetricTotal,
    pub evolution_total: MetricTotal,
    pub distribution_total: MetricTotal,
}

impl Reconciliation {
    /// Relative tolerance for comparing floating-point sums.
    pub const TOLERANCE: f64 = 1e-6;

    /// Whether evolution and distribution both add up to the total.
    pub fn is_consistent(&self) -> bool {
        self.total.count == self.evolution_total.count
            && self.total.count == self.distribution_total.count
            && sums_match(self.total.sum, self.evolution_total.sum)
            && sums_match(self.total.sum, self.distribution_total.sum)
    }
}

fn sums_match(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= Reconciliation::TOLERANCE * scale
}
