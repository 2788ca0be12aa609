//! Memory Access Types.
//!
//! This module defines the classification of memory accesses the host
//! supplies with every `operate` call. Predictors use it for the following:
//! 1. **Training Filters:** Deciding whether an access should update history
//!    state (the history-buffer predictor trains on demand reads only).
//! 2. **Statistics Tracking:** Categorizing observed traffic.

/// Classification of a memory access observed by a predictor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// A demand data load.
    Load,

    /// A read-for-ownership: a store that must first fetch the line.
    Rfo,

    /// A store hitting a line already owned.
    Store,

    /// Any other traffic (writebacks, translation fills, speculative probes).
    Other,
}

impl AccessType {
    /// Whether this access is a demand read that should train history-based
    /// predictors.
    ///
    /// Loads and read-for-ownership accesses reveal the program's forward
    /// reference stream; other traffic does not.
    #[inline]
    pub fn is_demand_read(&self) -> bool {
        matches!(self, AccessType::Load | AccessType::Rfo)
    }
}
