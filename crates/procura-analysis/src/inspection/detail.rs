//! Outlier details for the inspection view.

use serde::Serialize;

use procura_core::ValueRecord;

use super::ValueFormatter;
use crate::outliers::{DeviationScore, Partition, SignificanceTier, StatisticalSummary};

/// One excluded record as the inspection view shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierDetail<M> {
    /// The record exactly as it was passed in, metadata included.
    pub record: ValueRecord<M>,
    pub formatted_value: String,
    /// `value - threshold`; always positive for an outlier.
    pub excess: f64,
    /// `(value - mean) / stddev`.
    pub z_score: f64,
    pub deviation: DeviationScore,
    pub significance: SignificanceTier,
}

/// Inspection view of one partition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport<M> {
    pub summary: StatisticalSummary,
    pub formatted_mean: String,
    pub formatted_threshold: String,
    /// Largest value first; equal values keep input order.
    pub details: Vec<OutlierDetail<M>>,
}

/// Build the inspection report for `partition`.
pub fn inspect<M: Clone>(partition: &Partition<M>, formatter: &ValueFormatter) -> OutlierReport<M> {
    let summary = partition.summary;

    let mut details: Vec<OutlierDetail<M>> = partition
        .outliers
        .iter()
        .map(|record| {
            let value = record.amount();
            let z_score = if summary.stddev > 0.0 {
                (value - summary.mean) / summary.stddev
            } else {
                0.0
            };
            let deviation = DeviationScore::from_z_score(z_score, summary.multiplier);
            OutlierDetail {
                record: record.clone(),
                formatted_value: formatter.format_opt(record.value),
                excess: value - summary.threshold,
                z_score,
                deviation,
                significance: SignificanceTier::from_threshold_ratio(value, summary.threshold),
            }
        })
        .collect();
    details.sort_by(|a, b| b.record.amount().total_cmp(&a.record.amount()));

    OutlierReport {
        summary,
        formatted_mean: formatter.format(summary.mean),
        formatted_threshold: formatter.format(summary.threshold),
        details,
    }
}
