//! Byte, Block, and Page Address Types.
//!
//! This module defines strong types for the three address granularities the
//! engine works at, to prevent accidental mixing. It provides the following:
//! 1. **Type Safety:** A byte [`Address`], a cache-line [`BlockNumber`], and a
//!    [`PageNumber`] are distinct types with explicit conversions.
//! 2. **Delta Arithmetic:** Signed block-granularity strides for pattern
//!    detection and candidate generation.
//! 3. **Containment Checks:** Page-number extraction at any granularity for
//!    the issue policy's boundary check.

use std::fmt;
use std::ops::Add;

use super::constants::{LOG2_BLOCK_SIZE, LOG2_PAGE_SIZE};

/// A byte-granularity memory address.
///
/// This is the representation the host hands to `operate`/`fill` and the
/// representation handed back to the host's issue primitive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub u64);

/// A cache-block (line) number: a byte address truncated to line granularity.
///
/// All pattern detection and candidate generation happens at this
/// granularity; only the final issue step widens back to an [`Address`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockNumber(pub u64);

/// A page number: a byte address truncated to page granularity.
///
/// Used only for the issue policy's containment check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(pub u64);

impl Address {
    /// Creates a new address from a raw 64-bit value.
    ///
    /// # Arguments
    ///
    /// * `addr` - The raw 64-bit address value.
    ///
    /// # Returns
    ///
    /// A new `Address` instance wrapping the provided value.
    #[inline(always)]
    pub fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub fn val(&self) -> u64 {
        self.0
    }

    /// Returns the block number containing this address.
    #[inline(always)]
    pub fn block(&self) -> BlockNumber {
        BlockNumber(self.0 >> LOG2_BLOCK_SIZE)
    }

    /// Returns the page number containing this address.
    #[inline(always)]
    pub fn page(&self) -> PageNumber {
        PageNumber(self.0 >> LOG2_PAGE_SIZE)
    }
}

impl BlockNumber {
    /// Creates a new block number from a raw value.
    #[inline(always)]
    pub fn new(block: u64) -> Self {
        Self(block)
    }

    /// Returns the raw block-number value.
    #[inline(always)]
    pub fn val(&self) -> u64 {
        self.0
    }

    /// Returns the byte address of the first byte of this block.
    #[inline(always)]
    pub fn address(&self) -> Address {
        Address(self.0 << LOG2_BLOCK_SIZE)
    }

    /// Returns the page number containing this block.
    #[inline(always)]
    pub fn page(&self) -> PageNumber {
        PageNumber(self.0 >> (LOG2_PAGE_SIZE - LOG2_BLOCK_SIZE))
    }

    /// Returns the signed block delta `self − other`.
    ///
    /// Deltas are the unit of pattern detection: consecutive accesses in a
    /// chain are summarized by their block-number differences.
    ///
    /// # Arguments
    ///
    /// * `other` - The older block in the pair.
    ///
    /// # Returns
    ///
    /// The signed stride from `other` to `self`, in blocks.
    #[inline(always)]
    pub fn offset_from(&self, other: BlockNumber) -> i64 {
        self.0.wrapping_sub(other.0) as i64
    }
}

impl Add<i64> for BlockNumber {
    type Output = BlockNumber;

    /// Applies a signed block delta, wrapping on overflow.
    fn add(self, delta: i64) -> BlockNumber {
        BlockNumber(self.0.wrapping_add(delta as u64))
    }
}

impl PageNumber {
    /// Returns the raw page-number value.
    #[inline(always)]
    pub fn val(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block {:#x}", self.0)
    }
}
