//! Address Type Tests.
//!
//! Verifies block/page conversion, signed block deltas, and the
//! demand-read classification used by the history-buffer predictor.

use pfsim_core::common::{AccessType, Address, BlockNumber};

// ══════════════════════════════════════════════════════════
// 1. Byte ↔ block ↔ page conversion
// ══════════════════════════════════════════════════════════

/// A mid-line byte address maps to the block containing it.
#[test]
fn address_to_block_truncates() {
    assert_eq!(Address::new(0x1040).block(), BlockNumber::new(0x41));
    assert_eq!(Address::new(0x107F).block(), BlockNumber::new(0x41));
}

/// A block's address is its first byte.
#[test]
fn block_to_address_is_line_aligned() {
    assert_eq!(BlockNumber::new(0x41).address(), Address::new(0x1040));
}

/// The last block of a page and the first block of the next page land on
/// different page numbers.
#[test]
fn block_page_boundary() {
    // 64 blocks per 4 KiB page.
    assert_eq!(BlockNumber::new(63).page(), BlockNumber::new(0).page());
    assert_ne!(BlockNumber::new(64).page(), BlockNumber::new(63).page());
}

/// Byte-address page extraction agrees with block-number page extraction.
#[test]
fn address_page_matches_block_page() {
    let addr = Address::new(0x3FC0);
    assert_eq!(addr.page(), addr.block().page());
}

// ══════════════════════════════════════════════════════════
// 2. Delta arithmetic
// ══════════════════════════════════════════════════════════

/// Deltas are signed: a backward stride is negative.
#[test]
fn offset_from_is_signed() {
    assert_eq!(BlockNumber::new(10).offset_from(BlockNumber::new(3)), 7);
    assert_eq!(BlockNumber::new(3).offset_from(BlockNumber::new(10)), -7);
}

/// Applying a delta inverts `offset_from`.
#[test]
fn add_delta_round_trips() {
    let base = BlockNumber::new(100);
    assert_eq!(base + 5, BlockNumber::new(105));
    assert_eq!(base + (-5), BlockNumber::new(95));
    assert_eq!((base + (-5)).offset_from(base), -5);
}

// ══════════════════════════════════════════════════════════
// 3. Access classification
// ══════════════════════════════════════════════════════════

/// Loads and read-for-ownership accesses train history predictors; other
/// traffic does not.
#[test]
fn demand_read_classification() {
    assert!(AccessType::Load.is_demand_read());
    assert!(AccessType::Rfo.is_demand_read());
    assert!(!AccessType::Store.is_demand_read());
    assert!(!AccessType::Other.is_demand_read());
}
