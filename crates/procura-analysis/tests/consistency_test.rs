//! One dashboard response, many widgets, one classification.

use std::sync::Arc;
use std::time::Duration;

use procura_analysis::aggregation::MetricTotal;
use procura_analysis::consistency::{ConsistencyScope, PartitionCache, ValidIdSet};
use procura_analysis::inspection::{inspect, ValueFormatter};
use procura_analysis::outliers::partition;
use procura_analysis::statistics::Multiplier;
use procura_core::config::ProcuraConfig;
use procura_core::errors::{ConsistencyError, ProcuraErrorCode};
use procura_core::{RecordId, ValueRecord};

#[derive(Debug, Clone, PartialEq)]
struct Process {
    month: u32,
    modality: &'static str,
    concluded: bool,
}

/// Active processes with positive value: a tight cluster, a few zero-value
/// drafts, and two implausible amounts typed with extra digits.
fn active_processes() -> Vec<ValueRecord<Process>> {
    let modalities = ["pregao", "concorrencia", "dispensa"];
    let mut out = Vec::new();
    for i in 0..60 {
        out.push(ValueRecord::new(
            i as i64,
            Some(10_000.0 + (i % 7) as f64 * 750.0),
            Process {
                month: 1 + (i % 12) as u32,
                modality: modalities[i % 3],
                concluded: i % 4 == 0,
            },
        ));
    }
    for i in 60..63 {
        out.push(ValueRecord::new(
            i as i64,
            Some(0.0),
            Process { month: 3, modality: "dispensa", concluded: false },
        ));
    }
    out.push(ValueRecord::new(
        900i64,
        Some(12_500_000.0),
        Process { month: 5, modality: "pregao", concluded: false },
    ));
    out.push(ValueRecord::new(
        901i64,
        Some(9_800_000.0),
        Process { month: 8, modality: "concorrencia", concluded: true },
    ));
    out
}

#[test]
fn every_widget_of_a_response_agrees() {
    let records = active_processes();
    let mut scope = ConsistencyScope::new("dashboard:req-42", Multiplier::DEFAULT);

    // Widget 1: headline total
    let totals = scope.aggregator("active", &records).unwrap();
    let active_total = totals.total(&records);

    // Widget 2: active minus concluded
    let not_concluded = scope
        .aggregator("active", &records)
        .unwrap()
        .total_where(&records, |r| !r.metadata.concluded);
    let concluded = totals.total_where(&records, |r| r.metadata.concluded);
    assert_eq!(active_total - concluded, not_concluded);

    // Widget 3 and 4: evolution and distribution
    let evolution = scope
        .aggregator("active", &records)
        .unwrap()
        .evolution(&records, |r| r.metadata.month);
    let evolution_sum: f64 = evolution.values().map(|t| t.sum).sum();
    let distribution = scope
        .aggregator("active", &records)
        .unwrap()
        .distribution(&records, |r| r.metadata.modality);
    let distribution_sum: f64 = distribution.iter().map(|s| s.total.sum).sum();
    assert!((evolution_sum - active_total.sum).abs() < 1e-6);
    assert!((distribution_sum - active_total.sum).abs() < 1e-6);

    // Widget 5: critical items never contain an excluded record
    let critical = totals.critical_items(&records, 5);
    assert!(critical.iter().all(|r| r.id != RecordId::Int(900) && r.id != RecordId::Int(901)));

    // Widget 6: outlier inspection lists exactly what the others excluded
    let partition = scope.partition("active", &records).unwrap();
    let report = inspect(&partition, &ValueFormatter::default());
    let inspected: Vec<_> = report.details.iter().map(|d| d.record.id.clone()).collect();
    assert_eq!(inspected, vec![RecordId::Int(900), RecordId::Int(901)]);
    assert_eq!(report.details[0].formatted_value, "R$ 12.500.000,00");

    let reconciliation = totals.reconcile(&records, |r| r.metadata.month, |r| r.metadata.modality);
    assert!(reconciliation.is_consistent(), "{reconciliation:?}");
    assert_eq!(active_total.count + partition.outliers.len(), records.len());

    let summaries = scope.summaries();
    assert_eq!(summaries.len(), 1);
    assert_eq!(*summaries[0].1, partition.summary);
}

#[test]
fn unfiltered_totals_would_not_reconcile() {
    let records = active_processes();
    let mut scope = ConsistencyScope::new("dashboard:req-43", Multiplier::DEFAULT);
    let filtered = scope.aggregator("active", &records).unwrap().total(&records);

    let mut unfiltered = MetricTotal::default();
    for r in &records {
        unfiltered.add(r.amount());
    }
    assert!(unfiltered.sum - filtered.sum > 20_000_000.0);
}

#[test]
fn refetched_snapshot_within_one_request_is_an_error() {
    let records = active_processes();
    let mut scope = ConsistencyScope::new("dashboard:req-44", Multiplier::DEFAULT);
    scope.valid_set("active", &records).unwrap();

    // A concurrent edit landed between two widget queries.
    let mut refetched = records.clone();
    refetched[10].value = Some(11_111.0);

    let err = scope.aggregator("active", &refetched).unwrap_err();
    assert!(matches!(err, ConsistencyError::SnapshotDiverged { .. }));
    assert_eq!(err.error_code(), "SNAPSHOT_DIVERGED");

    // Reordering the same rows is also a different snapshot.
    let mut reordered = records.clone();
    reordered.reverse();
    assert!(scope.valid_set("active", &reordered).is_err());
}

#[test]
fn shared_cache_returns_what_recomputation_would() {
    let records = active_processes();
    let cache = PartitionCache::new(64, Duration::from_secs(300));

    let mut first = ConsistencyScope::new("req-a", Multiplier::DEFAULT).with_cache(cache.clone());
    let mut second = ConsistencyScope::new("req-b", Multiplier::DEFAULT).with_cache(cache.clone());

    let a = first.valid_set("active", &records).unwrap();
    let b = second.valid_set("active", &records).unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    let fresh = ValidIdSet::compute(&records, Multiplier::DEFAULT);
    assert_eq!(*a.summary(), *fresh.summary());
    assert_eq!(a.outlier_ids(), fresh.outlier_ids());
    assert_eq!(a.len(), fresh.len());
}

#[test]
fn cache_never_mixes_multipliers() {
    let records = active_processes();
    let cache = PartitionCache::new(64, Duration::from_secs(300));

    let mut strict = ConsistencyScope::with_k("req-strict", 0.5).unwrap().with_cache(cache.clone());
    let mut lenient = ConsistencyScope::with_k("req-lenient", 6.0).unwrap().with_cache(cache.clone());

    let s = strict.valid_set("active", &records).unwrap();
    let l = lenient.valid_set("active", &records).unwrap();
    assert!(!Arc::ptr_eq(&s, &l));
    assert!(s.outlier_ids().len() >= l.outlier_ids().len());
    assert_eq!(s.multiplier().value(), 0.5);
    assert_eq!(l.multiplier().value(), 6.0);
}

#[test]
fn scope_from_config_uses_configured_multiplier() {
    let config = ProcuraConfig::from_toml("[outliers]\nmultiplier = 3.0\n[cache]\nenabled = true\n").unwrap();
    let cache = PartitionCache::from_config(&config.cache);
    assert!(cache.is_some());

    let mut scope = ConsistencyScope::from_config("req-cfg", &config, cache.as_ref()).unwrap();
    assert_eq!(scope.multiplier().value(), 3.0);

    let records = active_processes();
    let set = scope.valid_set("active", &records).unwrap();
    let direct = partition(&records, 3.0).unwrap();
    assert_eq!(*set.summary(), direct.summary);
}

#[test]
fn scope_from_config_rejects_bad_multiplier() {
    let config = ProcuraConfig::from_toml("[outliers]\nmultiplier = -2.0\n").unwrap();
    let err = ConsistencyScope::from_config("req-bad", &config, None).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_ARGUMENT");
}

#[test]
fn scopes_run_concurrently_without_coordination() {
    let records = Arc::new(active_processes());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let records = Arc::clone(&records);
            std::thread::spawn(move || {
                let mut scope = ConsistencyScope::new(format!("req-{i}"), Multiplier::DEFAULT);
                let set = scope.valid_set("active", &records).unwrap();
                *set.summary()
            })
        })
        .collect();

    let summaries: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(summaries.windows(2).all(|w| w[0] == w[1]));
}
