//! Adaptive Next-N-Line Predictor.
//!
//! A spatial predictor that fetches the next `degree` sequential blocks on
//! every demand miss, and adapts `degree` to the workload: a sliding window
//! of accesses measures what fraction of issued prefetches were later hit
//! by real accesses, and a two-threshold hysteresis controller widens or
//! narrows the distance by at most one block per window.
//!
//! Usefulness is attributed through a prefetch-history table: each issued
//! block is recorded unused, and the first demand access that lands on it
//! flips the flag and counts once toward the window's accuracy.
//!
//! # Performance
//!
//! - **Time Complexity:** `operate()`: O(D) where D is the current degree
//! - **Space Complexity:** O(H) where H is the history capacity (1024)
//! - **Best Case:** Sequential scans (accuracy saturates the degree high)
//! - **Worst Case:** Pointer chasing (degree collapses to the lower bound)

use tracing::debug;

use crate::common::BlockNumber;
use crate::config::AdaptiveConfig;
use crate::host::PrefetchHost;
use crate::stats::PrefetchStats;
use crate::table::{LruTable, TableEntry};

use super::policy::{self, IssueOutcome};
use super::{LineFill, MemoryAccess, PrefetchUnit};

/// One block this predictor has speculatively fetched.
#[derive(Clone, Copy, Debug)]
struct HistoryEntry {
    /// The prefetched block.
    block: BlockNumber,
    /// Set on the first demand access that lands on the block.
    used: bool,
}

impl TableEntry for HistoryEntry {
    fn index(&self) -> u64 {
        self.block.val()
    }

    fn tag(&self) -> u64 {
        self.block.val()
    }
}

/// Issue/usefulness counts over the current adjustment window.
#[derive(Clone, Copy, Debug, Default)]
struct AccuracyTracker {
    total_prefetches: u64,
    useful_prefetches: u64,
}

impl AccuracyTracker {
    /// Window accuracy; 0 when nothing was issued.
    fn accuracy(&self) -> f64 {
        if self.total_prefetches == 0 {
            return 0.0;
        }
        self.useful_prefetches as f64 / self.total_prefetches as f64
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Adaptive next-N-line predictor state.
pub struct AdaptivePrefetcher {
    /// Current prefetch distance, in blocks.
    degree: usize,
    min_degree: usize,
    max_degree: usize,
    high_threshold: f64,
    low_threshold: f64,
    /// Accesses between degree re-evaluations.
    adjustment_period: u64,
    /// Accesses observed since the last re-evaluation.
    access_count: u64,
    tracker: AccuracyTracker,
    /// Recently prefetched blocks, for usefulness attribution.
    history: LruTable<HistoryEntry>,
    stats: PrefetchStats,
}

impl AdaptivePrefetcher {
    /// Creates a new adaptive predictor.
    ///
    /// Degenerate bounds are clamped rather than rejected: a zero lower
    /// bound becomes 1, an inverted upper bound is raised to the lower
    /// bound, and the initial degree is clamped into range.
    ///
    /// # Arguments
    ///
    /// * `config` - Tuning for the controller and history table.
    pub fn new(config: &AdaptiveConfig) -> Self {
        let min_degree = config.min_degree.max(1);
        let max_degree = config.max_degree.max(min_degree);

        Self {
            degree: config.initial_degree.clamp(min_degree, max_degree),
            min_degree,
            max_degree,
            high_threshold: config.high_threshold,
            low_threshold: config.low_threshold,
            adjustment_period: config.adjustment_period.max(1),
            access_count: 0,
            tracker: AccuracyTracker::default(),
            history: LruTable::new(config.history_size, 1),
            stats: PrefetchStats::default(),
        }
    }

    /// Returns the current prefetch distance.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Re-evaluates the prefetch distance from the window's accuracy.
    ///
    /// Accuracy above the high threshold widens the distance, accuracy
    /// below the low threshold narrows it, and the dead band in between
    /// leaves it alone. The window resets regardless.
    fn adjust_degree(&mut self) {
        let accuracy = self.tracker.accuracy();

        if accuracy > self.high_threshold && self.degree < self.max_degree {
            self.degree += 1;
            self.stats.degree_raises += 1;
            debug!(degree = self.degree, accuracy, "prefetch degree raised");
        } else if accuracy < self.low_threshold && self.degree > self.min_degree {
            self.degree -= 1;
            self.stats.degree_lowers += 1;
            debug!(degree = self.degree, accuracy, "prefetch degree lowered");
        }

        self.tracker.reset();
    }
}

impl PrefetchUnit for AdaptivePrefetcher {
    /// Observes an access: attributes usefulness, advances the adjustment
    /// window, and on a demand miss issues the next `degree` blocks.
    fn operate(&mut self, host: &mut dyn PrefetchHost, access: &MemoryAccess) -> u32 {
        let block = access.address.block();

        // First-use attribution: a block counts as useful at most once.
        let probe = HistoryEntry { block, used: false };
        if let Some(found) = self.history.check_hit(&probe) {
            if !found.used {
                self.history.fill(HistoryEntry { block, used: true });
                self.tracker.useful_prefetches += 1;
                self.stats.useful_prefetches += 1;
            }
        }

        self.access_count += 1;
        if self.access_count >= self.adjustment_period {
            self.adjust_degree();
            self.access_count = 0;
        }

        if !access.cache_hit {
            for distance in 1..=self.degree {
                let candidate = block + distance as i64;
                match policy::issue_candidate(host, block, candidate, 0) {
                    IssueOutcome::Issued { high_priority } => {
                        self.history.fill(HistoryEntry {
                            block: candidate,
                            used: false,
                        });
                        self.tracker.total_prefetches += 1;
                        self.stats.record_issue(high_priority);
                    }
                    IssueOutcome::CrossedPage => self.stats.dropped_page_cross += 1,
                    IssueOutcome::Rejected => self.stats.rejected_by_host += 1,
                }
            }
        }

        access.metadata
    }

    fn fill(&mut self, _host: &mut dyn PrefetchHost, fill: &LineFill) -> u32 {
        fill.metadata
    }

    fn stats(&self) -> &PrefetchStats {
        &self.stats
    }
}
