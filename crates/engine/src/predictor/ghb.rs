//! Global History Buffer Predictor.
//!
//! A pattern predictor that reconstructs each instruction's recent
//! block-address stream and chains prefetches along repeating stride
//! patterns. Two structures cooperate:
//! * an **index table** mapping an instruction's PC to the buffer slot it
//!   last wrote, and
//! * the **global history buffer** itself, a circular log of block
//!   addresses where each slot links back to the previous slot written by
//!   the same instruction.
//!
//! On every demand read the new slot's back-link chain is walked to collect
//! the instruction's recent deltas, and a periodic-pattern search over them
//! drives a chained candidate walk. Links carry the sequence number of the
//! slot they were minted against, so a walk stops cleanly when the circular
//! buffer has overwritten part of a chain.
//!
//! # Performance
//!
//! - **Time Complexity:** `operate()`: O(D) walk + O(D × P) issue, where D
//!   is twice the degree and P the pattern period
//! - **Space Complexity:** O(N) buffer slots + O(I) index entries
//! - **Best Case:** Loopy strided kernels (one pattern per instruction)
//! - **Worst Case:** Irregular per-instruction streams (walks never pay off)

use tracing::trace;

use crate::common::{Address, BlockNumber};
use crate::config::GhbConfig;
use crate::host::PrefetchHost;
use crate::stats::PrefetchStats;
use crate::table::{LruTable, TableEntry};

use super::policy::{self, IssueOutcome};
use super::{LineFill, MemoryAccess, PrefetchUnit};

/// Longest repeating period the detector searches for.
const MAX_PATTERN_PERIOD: usize = 3;

/// Link to a buffer slot, valid only while the slot still holds `seq`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct GhbLink {
    index: usize,
    seq: u64,
}

/// One slot of the circular history buffer.
#[derive(Clone, Copy, Debug, Default)]
struct GhbSlot {
    /// Block address of the logged access.
    block: BlockNumber,
    /// Insertion sequence number; changes when the slot is overwritten.
    seq: u64,
    /// Previous slot written by the same instruction, if still intact.
    prev: Option<GhbLink>,
}

/// Index-table entry: the most recent buffer slot a PC wrote.
#[derive(Clone, Copy, Debug)]
struct IndexEntry {
    pc: Address,
    last: Option<GhbLink>,
}

impl IndexEntry {
    /// A lookup key for `pc` carrying no link.
    fn probe(pc: Address) -> Self {
        Self { pc, last: None }
    }
}

impl TableEntry for IndexEntry {
    // Instruction addresses are keyed above their low byte-offset bits.
    fn index(&self) -> u64 {
        self.pc.val() >> 2
    }

    fn tag(&self) -> u64 {
        self.pc.val() >> 2
    }
}

/// Global history buffer predictor state.
pub struct GhbPrefetcher {
    /// Pattern repetitions issued per triggering access.
    degree: usize,
    /// Minimum collected deltas before the pattern search runs.
    delta_threshold: usize,
    /// Circular log of recent demand-read blocks.
    ghb: Vec<GhbSlot>,
    /// Next slot to overwrite.
    head: usize,
    /// Sequence number the next insertion will carry.
    next_seq: u64,
    /// PC → most recent buffer slot.
    index_table: LruTable<IndexEntry>,
    stats: PrefetchStats,
}

impl GhbPrefetcher {
    /// Creates a new history-buffer predictor.
    ///
    /// Degenerate geometry is clamped rather than rejected, matching the
    /// history-table convention.
    ///
    /// # Arguments
    ///
    /// * `config` - Buffer/index geometry and detector tuning.
    pub fn new(config: &GhbConfig) -> Self {
        let ghb_size = if config.ghb_size == 0 {
            256
        } else {
            config.ghb_size
        };

        Self {
            degree: config.degree.max(1),
            delta_threshold: config.delta_threshold.max(2),
            ghb: vec![GhbSlot::default(); ghb_size],
            head: 0,
            next_seq: 0,
            index_table: LruTable::new(config.index_table_size, 1),
            stats: PrefetchStats::default(),
        }
    }

    /// Follows a link if the target slot has not been overwritten since
    /// the link was minted.
    fn follow(&self, link: GhbLink) -> Option<&GhbSlot> {
        let slot = self.ghb.get(link.index)?;
        (slot.seq == link.seq).then_some(slot)
    }

    /// Walks the back-link chain from `start`, collecting newest-first
    /// deltas until the chain ends, goes stale, or `2 × degree` deltas
    /// are in hand.
    fn collect_deltas(&self, start: usize) -> Vec<i64> {
        let cap = 2 * self.degree;
        let mut deltas = Vec::with_capacity(cap);
        let mut slot = &self.ghb[start];

        while deltas.len() < cap {
            let Some(link) = slot.prev else { break };
            let Some(prev) = self.follow(link) else { break };
            deltas.push(slot.block.offset_from(prev.block));
            slot = prev;
        }

        deltas
    }

    /// Searches the collected deltas for the shortest repeating period and
    /// returns the pattern in chronological order, ready to extend the
    /// stream.
    ///
    /// Periods 1 through [`MAX_PATTERN_PERIOD`] are probed ascending; a
    /// period `L` matches when the `L` newest deltas equal the `L` before
    /// them. Period 1 is the plain constant-stride stream.
    fn detect_pattern(&self, start: usize) -> Option<Vec<i64>> {
        let deltas = self.collect_deltas(start);
        if deltas.len() < self.delta_threshold {
            return None;
        }

        for period in 1..=MAX_PATTERN_PERIOD {
            if deltas.len() < 2 * period {
                break;
            }
            if (0..period).all(|i| deltas[i] == deltas[i + period]) {
                // The walk collected newest-first; the stream's
                // continuation is that window reversed.
                let mut pattern = deltas[..period].to_vec();
                pattern.reverse();
                return Some(pattern);
            }
        }

        None
    }

    /// Issues `degree` repetitions of the pattern, accumulating deltas
    /// from the triggering block.
    fn issue_chain(&mut self, host: &mut dyn PrefetchHost, origin: BlockNumber, pattern: &[i64]) {
        let mut candidate = origin;
        for _ in 0..self.degree {
            for &delta in pattern {
                candidate = candidate + delta;
                match policy::issue_candidate(host, origin, candidate, 0) {
                    IssueOutcome::Issued { high_priority } => {
                        self.stats.record_issue(high_priority);
                    }
                    IssueOutcome::CrossedPage => self.stats.dropped_page_cross += 1,
                    IssueOutcome::Rejected => self.stats.rejected_by_host += 1,
                }
            }
        }
    }
}

impl PrefetchUnit for GhbPrefetcher {
    /// Observes an access: logs demand reads into the buffer, re-links the
    /// issuing instruction, and chains prefetches along any detected
    /// pattern.
    fn operate(&mut self, host: &mut dyn PrefetchHost, access: &MemoryAccess) -> u32 {
        if !access.kind.is_demand_read() {
            return access.metadata;
        }

        let block = access.address.block();
        let seq = self.next_seq;

        let prev = self
            .index_table
            .check_hit(&IndexEntry::probe(access.pc))
            .and_then(|entry| entry.last);

        self.ghb[self.head] = GhbSlot { block, seq, prev };
        self.index_table.fill(IndexEntry {
            pc: access.pc,
            last: Some(GhbLink {
                index: self.head,
                seq,
            }),
        });

        if let Some(pattern) = self.detect_pattern(self.head) {
            self.stats.record_pattern(pattern.len());
            trace!(
                pc = access.pc.val(),
                period = pattern.len(),
                "repeating delta pattern detected"
            );
            self.issue_chain(host, block, &pattern);
        }

        self.head = (self.head + 1) % self.ghb.len();
        self.next_seq += 1;

        access.metadata
    }

    fn fill(&mut self, _host: &mut dyn PrefetchHost, fill: &LineFill) -> u32 {
        fill.metadata
    }

    fn stats(&self) -> &PrefetchStats {
        &self.stats
    }
}
