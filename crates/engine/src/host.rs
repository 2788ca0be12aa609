//! Host Services Interface.
//!
//! This module defines the seam between the engine and the cache level that
//! embeds it. The host drives predictors through their callback interface
//! and, in return, exposes the three services the engine consumes: the
//! speculative-fetch primitive, a load signal for throttling, and the
//! address-space containment policy.

use crate::common::Address;

/// Services a predictor consumes from its embedding cache level.
///
/// The host guarantees strict call serialization: no two predictor
/// callbacks execute concurrently, and every call into these services
/// happens synchronously inside a callback.
pub trait PrefetchHost {
    /// Requests a speculative fetch of `addr`.
    ///
    /// # Arguments
    ///
    /// * `addr` - The byte address to fetch (block-aligned by the caller).
    /// * `high_priority` - Scheduling hint from the issue policy; `false`
    ///   requests the lowest priority, never outright rejection.
    /// * `metadata` - Pass-through slot for cooperating predictors.
    ///
    /// # Returns
    ///
    /// `true` if the host accepted the request, `false` if its resources
    /// were exhausted. A `false` return means only "this candidate was not
    /// issued" — the engine neither retries nor escalates.
    fn issue_prefetch(&mut self, addr: Address, high_priority: bool, metadata: u32) -> bool;

    /// Returns the downstream request-queue occupancy in `[0, 1]`.
    ///
    /// Used as the load signal for priority throttling.
    fn queue_occupancy_ratio(&self) -> f64;

    /// Whether candidate addresses may cross page boundaries.
    ///
    /// When `true` the issue policy skips its page-containment check;
    /// when `false`, candidates leaving the originating access's page are
    /// silently dropped.
    fn address_space_is_flat(&self) -> bool;
}
