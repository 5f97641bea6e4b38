//! In-memory heap model consumed by the heap map
//!
//! This module provides the data the visualization works on:
//! - [`AllocationSite`]: the function/source pair that made an allocation
//! - [`AllocationRecord`]: one live allocation (or an implicit free block)
//! - [`Snapshot`]: the live allocations at one point in time
//! - [`HeatTable`]: per-byte access counts of one sampled block, for the heat view
//! - [`HeapModel`]: all snapshots plus the global address range
//!
//! Models are built by [`loader`] from a JSON memory profile, or directly
//! with [`HeapModel::new`] and [`Snapshot::new`].

pub mod loader;

use std::ops::Range;
use std::rc::Rc;

pub use loader::{load_profile, parse_profile, ProfileError};

/// The code location responsible for an allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationSite {
    pub function: String,
    pub source: String,
    pub line: u32,
}

impl AllocationSite {
    pub fn new(function: impl Into<String>, source: impl Into<String>, line: u32) -> Self {
        AllocationSite {
            function: function.into(),
            source: source.into(),
            line,
        }
    }

    /// Two sites share a color when function and source match; the line is ignored.
    pub fn same_origin(&self, other: &AllocationSite) -> bool {
        self.function == other.function && self.source == other.source
    }
}

impl std::fmt::Display for AllocationSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}:{})", self.function, self.source, self.line)
    }
}

/// A single allocation; `uid == None` marks free space
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationRecord {
    pub address: u64,
    pub amount: u64,
    pub uid: Option<Rc<AllocationSite>>,
}

impl AllocationRecord {
    pub fn new(address: u64, amount: u64, uid: Option<Rc<AllocationSite>>) -> Self {
        AllocationRecord {
            address,
            amount,
            uid,
        }
    }
}

/// Live allocations at one point in time
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// 1-based position in the profile
    pub index: usize,
    /// Seconds since the start of profiling
    pub timestamp: f64,
    records: Vec<AllocationRecord>,
    total_allocated: u64,
    largest_amount: u64,
    smallest_amount: u64,
}

impl Snapshot {
    /// Build a snapshot; records are sorted by address here so every later
    /// walk sees them in address order.
    pub fn new(index: usize, timestamp: f64, mut records: Vec<AllocationRecord>) -> Self {
        records.sort_by_key(|r| r.address);

        let total_allocated = records.iter().map(|r| r.amount).sum();
        let largest_amount = records.iter().map(|r| r.amount).max().unwrap_or(0);
        let smallest_amount = records.iter().map(|r| r.amount).min().unwrap_or(0);

        Snapshot {
            index,
            timestamp,
            records,
            total_allocated,
            largest_amount,
            smallest_amount,
        }
    }

    pub fn records(&self) -> &[AllocationRecord] {
        &self.records
    }

    pub fn total_allocated(&self) -> u64 {
        self.total_allocated
    }

    pub fn allocation_count(&self) -> usize {
        self.records.len()
    }

    pub fn largest_amount(&self) -> u64 {
        self.largest_amount
    }

    pub fn smallest_amount(&self) -> u64 {
        self.smallest_amount
    }
}

/// Per-byte access counts for the block starting at `base_address`.
///
/// The table only covers the bytes that were actually sampled; every other
/// address in the profile reads as zero accesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatTable {
    base_address: u64,
    counts: Vec<u32>,
}

impl HeatTable {
    pub fn new(base_address: u64, counts: Vec<u32>) -> Self {
        HeatTable {
            base_address,
            counts,
        }
    }

    pub fn base_address(&self) -> u64 {
        self.base_address
    }

    /// First address past the sampled block
    pub fn end_address(&self) -> u64 {
        self.base_address.saturating_add(self.counts.len() as u64)
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Highest access count among the addresses in `range`, 0 outside the table
    pub fn hottest_in(&self, range: Range<u64>) -> u32 {
        let start = range.start.max(self.base_address);
        let end = range.end.min(self.end_address());
        if start >= end {
            return 0;
        }
        let from = (start - self.base_address) as usize;
        let to = (end - self.base_address) as usize;
        self.counts
            .get(from..to)
            .and_then(|window| window.iter().copied().max())
            .unwrap_or(0)
    }
}

/// A loaded memory profile
#[derive(Debug, Clone)]
pub struct HeapModel {
    snapshots: Vec<Snapshot>,
    pub min_address: u64,
    pub max_address: u64,
    /// Memory unit label, e.g. "B"
    pub unit: String,
    heat: Option<HeatTable>,
}

impl HeapModel {
    pub fn new(
        snapshots: Vec<Snapshot>,
        min_address: u64,
        max_address: u64,
        unit: impl Into<String>,
    ) -> Self {
        HeapModel {
            snapshots,
            min_address,
            max_address,
            unit: unit.into(),
            heat: None,
        }
    }

    pub fn with_heat(mut self, heat: HeatTable) -> Self {
        self.heat = Some(heat);
        self
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Number of snapshots (N)
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Look up a snapshot by its 1-based index
    pub fn snapshot(&self, index: usize) -> Option<&Snapshot> {
        index.checked_sub(1).and_then(|i| self.snapshots.get(i))
    }

    pub fn heat(&self) -> Option<&HeatTable> {
        self.heat.as_ref()
    }

}
