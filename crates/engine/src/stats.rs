//! Prefetch statistics collection and reporting.
//!
//! This module tracks performance counters for a single predictor instance.
//! It provides:
//! 1. **Issue accounting:** Candidates issued by priority class, rejected by
//!    the host, and dropped at page boundaries.
//! 2. **Usefulness:** Lifetime useful-prefetch attributions and derived
//!    accuracy.
//! 3. **Controller activity:** Degree raises/lowers and detected pattern
//!    periods.
//!
//! Counters are owned per-instance and cumulative over the instance's
//! lifetime; the adaptive controller's windowed tracker is separate state
//! that resets every adjustment period.

use std::fmt;

/// Maximum pattern period tracked by the per-period histogram.
const MAX_PATTERN_PERIOD: usize = 3;

/// Performance counters for one predictor instance.
///
/// All fields are plain cumulative counters; derived metrics are computed
/// on demand and guarded against empty denominators.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrefetchStats {
    /// Candidates accepted by the host.
    pub issued_total: u64,
    /// Accepted candidates issued at normal priority (light load).
    pub issued_high_priority: u64,
    /// Accepted candidates issued at the lowest priority (heavy load).
    pub issued_low_priority: u64,
    /// Candidates the host refused (resource exhaustion).
    pub rejected_by_host: u64,
    /// Candidates dropped by the page-containment check.
    pub dropped_page_cross: u64,
    /// Prefetched blocks later confirmed by a demand access (first use only).
    pub useful_prefetches: u64,
    /// Degree increments performed by the adaptive controller.
    pub degree_raises: u64,
    /// Degree decrements performed by the adaptive controller.
    pub degree_lowers: u64,
    /// Patterns detected by the history-buffer detector.
    pub patterns_detected: u64,
    /// Detected patterns by period (index 0 = period 1).
    pub pattern_periods: [u64; MAX_PATTERN_PERIOD],
}

impl PrefetchStats {
    /// Records a candidate the host accepted.
    pub(crate) fn record_issue(&mut self, high_priority: bool) {
        self.issued_total += 1;
        if high_priority {
            self.issued_high_priority += 1;
        } else {
            self.issued_low_priority += 1;
        }
    }

    /// Records a detected pattern of the given period.
    pub(crate) fn record_pattern(&mut self, period: usize) {
        self.patterns_detected += 1;
        if period >= 1 {
            if let Some(slot) = self.pattern_periods.get_mut(period - 1) {
                *slot += 1;
            }
        }
    }

    /// Candidates that reached the host's issue primitive.
    pub fn attempted(&self) -> u64 {
        self.issued_total + self.rejected_by_host
    }

    /// Lifetime accuracy: useful prefetches over issued prefetches.
    ///
    /// Defined as 0 when nothing has been issued.
    pub fn accuracy(&self) -> f64 {
        if self.issued_total == 0 {
            return 0.0;
        }
        self.useful_prefetches as f64 / self.issued_total as f64
    }
}

impl fmt::Display for PrefetchStats {
    /// Formats the counters as an aligned key-value report.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pf.issued                {}", self.issued_total)?;
        writeln!(f, "pf.issued.high_priority  {}", self.issued_high_priority)?;
        writeln!(f, "pf.issued.low_priority   {}", self.issued_low_priority)?;
        writeln!(f, "pf.rejected              {}", self.rejected_by_host)?;
        writeln!(f, "pf.dropped.page_cross    {}", self.dropped_page_cross)?;
        writeln!(f, "pf.useful                {}", self.useful_prefetches)?;
        writeln!(f, "pf.accuracy              {:.4}", self.accuracy())?;
        writeln!(f, "pf.degree.raises         {}", self.degree_raises)?;
        writeln!(f, "pf.degree.lowers         {}", self.degree_lowers)?;
        write!(f, "pf.patterns              {}", self.patterns_detected)
    }
}
