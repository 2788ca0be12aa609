//! Memory-access prefetch engine library.
//!
//! This crate implements a speculative prefetch engine for cache-hierarchy
//! simulators with the following:
//! 1. **Common:** Strong address types (byte, block, page) and access
//!    classification.
//! 2. **History Table:** A generic fixed-capacity, set-associative,
//!    LRU-replaced key→entry store shared by the predictors.
//! 3. **Predictors:** An adaptive next-N-line predictor with an
//!    accuracy-driven degree controller, and a global-history-buffer
//!    predictor that chains prefetches along repeating per-instruction
//!    delta patterns.
//! 4. **Issue Policy:** Page-boundary containment and load-sensitive
//!    priority throttling applied to every candidate address.
//! 5. **Host Seam:** The callback contract a cache level drives and the
//!    services it provides in return.
//!
//! The engine has no thread of its own: the host calls
//! [`PrefetchUnit::operate`] on every access and the predictor issues zero
//! or more candidates back through [`PrefetchHost::issue_prefetch`] before
//! returning. Storage is fixed-size and allocated at construction.

/// Common types and constants (addresses, access types, geometry).
pub mod common;
/// Engine configuration (defaults, selector enum, validation).
pub mod config;
/// Host-side services consumed by predictors.
pub mod host;
/// Predictor implementations and the callback contract.
pub mod predictor;
/// Per-predictor statistics counters.
pub mod stats;
/// Generic set-associative LRU history table.
pub mod table;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Services the embedding cache level provides to a predictor.
pub use crate::host::PrefetchHost;
/// Callback contract implemented by every predictor, plus the factory.
pub use crate::predictor::{build_predictor, MemoryAccess, PrefetchUnit};
