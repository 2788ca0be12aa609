//! Statistics Tests.
//!
//! Verifies the derived metrics' zero guards and the counter relationships
//! a driven predictor maintains.

use pfsim_core::config::AdaptiveConfig;
use pfsim_core::predictor::{AdaptivePrefetcher, PrefetchUnit};
use pfsim_core::stats::PrefetchStats;

use crate::common::{AccessBuilder, RecordingHost};

// ══════════════════════════════════════════════════════════
// 1. Derived metrics
// ══════════════════════════════════════════════════════════

/// Accuracy is defined as 0 before anything has been issued.
#[test]
fn accuracy_zero_guard() {
    let stats = PrefetchStats::default();
    assert!((stats.accuracy() - 0.0).abs() < f64::EPSILON);
}

/// Accuracy divides useful by issued.
#[test]
fn accuracy_ratio() {
    let stats = PrefetchStats {
        issued_total: 4,
        useful_prefetches: 3,
        ..PrefetchStats::default()
    };
    assert!((stats.accuracy() - 0.75).abs() < f64::EPSILON);
}

/// Attempted counts everything that reached the host.
#[test]
fn attempted_includes_rejections() {
    let stats = PrefetchStats {
        issued_total: 4,
        rejected_by_host: 2,
        dropped_page_cross: 7,
        ..PrefetchStats::default()
    };
    assert_eq!(stats.attempted(), 6, "page drops never reach the host");
}

/// The report names every counter.
#[test]
fn report_is_complete() {
    let report = PrefetchStats::default().to_string();
    for key in [
        "pf.issued",
        "pf.rejected",
        "pf.dropped.page_cross",
        "pf.useful",
        "pf.accuracy",
        "pf.degree.raises",
        "pf.patterns",
    ] {
        assert!(report.contains(key), "missing {key}");
    }
}

// ══════════════════════════════════════════════════════════
// 2. Counter relationships under load
// ══════════════════════════════════════════════════════════

/// Priority classes partition the issued count.
#[test]
fn priority_classes_partition_issues() {
    let mut pf = AdaptivePrefetcher::new(&AdaptiveConfig::default());
    let mut host = RecordingHost::new();

    let _ = pf.operate(&mut host, &AccessBuilder::load(100).build());
    host.occupancy = 0.9;
    let _ = pf.operate(&mut host, &AccessBuilder::load(500).build());

    let stats = pf.stats();
    assert_eq!(stats.issued_total, 4);
    assert_eq!(stats.issued_high_priority, 2);
    assert_eq!(stats.issued_low_priority, 2);
    assert_eq!(
        stats.issued_total,
        stats.issued_high_priority + stats.issued_low_priority
    );
}
