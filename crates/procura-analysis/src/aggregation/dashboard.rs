//! Dashboard aggregator bound to one valid id set.

use std::collections::BTreeMap;
use std::sync::Arc;

use procura_core::ValueRecord;

use super::types::{CategoryShare, MetricTotal, Reconciliation};
use crate::consistency::ValidIdSet;

/// Computes dashboard metrics over the records of a valid id set.
///
/// Records whose id is not in the set (outliers, or ids the set never saw)
/// are skipped. Missing and non-finite values count as zero in sums but are
/// still counted.
#[derive(Debug, Clone)]
pub struct DashboardAggregator {
    valid: Arc<ValidIdSet>,
}

impl DashboardAggregator {
    pub fn new(valid: Arc<ValidIdSet>) -> Self {
        Self { valid }
    }

    pub fn valid_set(&self) -> &ValidIdSet {
        &self.valid
    }

    /// Count and sum over every valid record.
    pub fn total<M>(&self, records: &[ValueRecord<M>]) -> MetricTotal {
        self.total_where(records, |_| true)
    }

    /// Count and sum over valid records matching `predicate`, e.g. the
    /// "active minus concluded" widget.
    pub fn total_where<M>(
        &self,
        records: &[ValueRecord<M>],
        predicate: impl Fn(&ValueRecord<M>) -> bool,
    ) -> MetricTotal {
        let mut total = MetricTotal::default();
        for record in self.valid.retain_valid(records).filter(|r| predicate(r)) {
            total.add(record.amount());
        }
        total
    }

    /// Per-period totals, ordered by period.
    pub fn evolution<M, K: Ord>(
        &self,
        records: &[ValueRecord<M>],
        period_of: impl Fn(&ValueRecord<M>) -> K,
    ) -> BTreeMap<K, MetricTotal> {
        let mut series: BTreeMap<K, MetricTotal> = BTreeMap::new();
        for record in self.valid.retain_valid(records) {
            series.entry(period_of(record)).or_default().add(record.amount());
        }
        series
    }

    /// Per-category totals with their share of the valid sum, largest sum
    /// first (ties by category).
    pub fn distribution<M, K: Ord>(
        &self,
        records: &[ValueRecord<M>],
        category_of: impl Fn(&ValueRecord<M>) -> K,
    ) -> Vec<CategoryShare<K>> {
        let grouped = self.evolution(records, category_of);
        let grand_total: f64 = grouped.values().map(|t| t.sum).sum();

        let mut shares: Vec<CategoryShare<K>> = grouped
            .into_iter()
            .map(|(category, total)| CategoryShare {
                category,
                share: if grand_total != 0.0 {
                    total.sum / grand_total
                } else {
                    0.0
                },
                total,
            })
            .collect();
        shares.sort_by(|a, b| {
            b.total
                .sum
                .total_cmp(&a.total.sum)
                .then_with(|| a.category.cmp(&b.category))
        });
        shares
    }

    /// The `limit` largest valid records by value. Equal values keep input
    /// order.
    pub fn critical_items<'a, M>(
        &self,
        records: &'a [ValueRecord<M>],
        limit: usize,
    ) -> Vec<&'a ValueRecord<M>> {
        let mut items: Vec<&'a ValueRecord<M>> = records
            .iter()
            .filter(|r| self.valid.contains(&r.id))
            .collect();
        items.sort_by(|a, b| b.amount().total_cmp(&a.amount()));
        items.truncate(limit);
        items
    }

    /// Check that total, evolution and distribution cover the same records.
    pub fn reconcile<M, P: Ord, C: Ord>(
        &self,
        records: &[ValueRecord<M>],
        period_of: impl Fn(&ValueRecord<M>) -> P,
        category_of: impl Fn(&ValueRecord<M>) -> C,
    ) -> Reconciliation {
        let fold = |acc: MetricTotal, t: &MetricTotal| MetricTotal {
            count: acc.count + t.count,
            sum: acc.sum + t.sum,
        };
        let evolution_total = self
            .evolution(records, period_of)
            .values()
            .fold(MetricTotal::default(), fold);
        let distribution_total = self
            .distribution(records, category_of)
            .iter()
            .map(|s| &s.total)
            .fold(MetricTotal::default(), fold);

        Reconciliation {
            total: self.total(records),
            evolution_total,
            distribution_total,
        }
    }
}
