//! Block and Page Geometry Constants.
//!
//! This module defines the fixed address geometry the engine operates on.
//! Predictors observe accesses at cache-line (block) granularity and bound
//! speculation at page granularity, so both sizes are global constants
//! rather than per-instance configuration.

/// Number of bits to shift to convert between byte addresses and block numbers.
pub const LOG2_BLOCK_SIZE: u64 = 6;

/// Cache block (line) size in bytes (64 bytes).
pub const BLOCK_SIZE: u64 = 1 << LOG2_BLOCK_SIZE;

/// Number of bits to shift to convert between byte addresses and page numbers.
pub const LOG2_PAGE_SIZE: u64 = 12;

/// Page size in bytes (4 KiB).
pub const PAGE_SIZE: u64 = 1 << LOG2_PAGE_SIZE;

/// Mask for extracting the byte offset within a page.
pub const PAGE_OFFSET_MASK: u64 = PAGE_SIZE - 1;
