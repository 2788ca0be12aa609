//! Shared Issue Policy.
//!
//! Every candidate address a predictor computes passes through this policy
//! before reaching the host:
//! * **Page containment:** unless the host's address space is flat,
//!   candidates leaving the originating access's page are dropped without
//!   reaching the host.
//! * **Load-sensitive priority:** the downstream queue occupancy selects
//!   normal or lowest priority. Throttling is a priority hint, not
//!   admission control — a loaded queue never drops a candidate here.

use tracing::trace;

use crate::common::BlockNumber;
use crate::host::PrefetchHost;

/// Occupancy below which the downstream queue counts as lightly loaded.
const LIGHT_LOAD_THRESHOLD: f64 = 0.5;

/// What became of one candidate address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssueOutcome {
    /// The host accepted the request.
    Issued {
        /// Priority class the request was issued at.
        high_priority: bool,
    },
    /// Dropped before reaching the host: the candidate left the
    /// originating access's page.
    CrossedPage,
    /// The host refused the request (resource exhaustion).
    Rejected,
}

/// Runs one candidate through containment, throttling, and the host's
/// issue primitive.
///
/// # Arguments
///
/// * `host` - The embedding cache level's services.
/// * `origin` - Block of the access that triggered prediction.
/// * `candidate` - Block the predictor wants fetched.
/// * `metadata` - Pass-through slot for the issue call.
///
/// # Returns
///
/// The candidate's [`IssueOutcome`]. Callers record bookkeeping (history
/// fills, counters) only on [`IssueOutcome::Issued`].
pub fn issue_candidate(
    host: &mut dyn PrefetchHost,
    origin: BlockNumber,
    candidate: BlockNumber,
    metadata: u32,
) -> IssueOutcome {
    if !host.address_space_is_flat() && candidate.page() != origin.page() {
        trace!(
            origin = origin.val(),
            candidate = candidate.val(),
            "candidate dropped at page boundary"
        );
        return IssueOutcome::CrossedPage;
    }

    let high_priority = host.queue_occupancy_ratio() < LIGHT_LOAD_THRESHOLD;
    if host.issue_prefetch(candidate.address(), high_priority, metadata) {
        IssueOutcome::Issued { high_priority }
    } else {
        trace!(candidate = candidate.val(), "host refused candidate");
        IssueOutcome::Rejected
    }
}
