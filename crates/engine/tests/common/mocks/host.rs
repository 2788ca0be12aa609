//! Host mocks.
//!
//! `RecordingHost` is a scripted host: tests configure its load signal,
//! address-space flag, and acceptance behavior up front and inspect the
//! requests a predictor issued afterwards. `MockHost` is a
//! mockall-generated mock for expectation-style tests.

use mockall::mock;
use pfsim_core::common::Address;
use pfsim_core::host::PrefetchHost;

mock! {
    pub Host {}
    impl PrefetchHost for Host {
        fn issue_prefetch(&mut self, addr: Address, high_priority: bool, metadata: u32) -> bool;
        fn queue_occupancy_ratio(&self) -> f64;
        fn address_space_is_flat(&self) -> bool;
    }
}

/// Scripted host that records every issued request.
pub struct RecordingHost {
    /// Requests the predictor issued, in order: `(address, high_priority)`.
    pub issued: Vec<(u64, bool)>,
    /// Downstream queue occupancy the host reports.
    pub occupancy: f64,
    /// Whether candidates may cross page boundaries.
    pub flat_address_space: bool,
    /// Whether the host accepts requests at all.
    pub accept: bool,
}

impl RecordingHost {
    /// A permissive host: empty queue, flat address space, accepts
    /// everything.
    pub fn new() -> Self {
        Self {
            issued: Vec::new(),
            occupancy: 0.0,
            flat_address_space: true,
            accept: true,
        }
    }

    /// The raw addresses issued so far, in order.
    pub fn issued_addrs(&self) -> Vec<u64> {
        self.issued.iter().map(|&(addr, _)| addr).collect()
    }

    /// The issued addresses converted back to block numbers.
    pub fn issued_blocks(&self) -> Vec<u64> {
        self.issued.iter().map(|&(addr, _)| addr >> 6).collect()
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefetchHost for RecordingHost {
    fn issue_prefetch(&mut self, addr: Address, high_priority: bool, _metadata: u32) -> bool {
        if !self.accept {
            return false;
        }
        self.issued.push((addr.val(), high_priority));
        true
    }

    fn queue_occupancy_ratio(&self) -> f64 {
        self.occupancy
    }

    fn address_space_is_flat(&self) -> bool {
        self.flat_address_space
    }
}
