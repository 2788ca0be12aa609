//! Set-Associative LRU History Table.
//!
//! This module implements the generic fixed-capacity history table shared by
//! both predictors. Entries carry their own keying via the [`TableEntry`]
//! capability trait, so any entry type that can produce an index and a tag
//! can be stored; the table itself only manages placement and replacement.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `check_hit()`: O(W) where W is the number of ways (associativity)
//!   - `fill()`: O(W)
//! - **Space Complexity:** O(S × W) where S is the number of sets
//! - **Best Case:** Keys with good set distribution (PC-keyed index tables)
//! - **Worst Case:** Many hot keys aliasing into one set (conflict thrashing)

use std::fmt;

/// Capability trait for entries stored in an [`LruTable`].
///
/// `index` selects the set a lookup lands in; `tag` distinguishes entries
/// within that set. Both predictors here use identical full-key slices for
/// the pair, which makes the table behave as a tag-matched cache with
/// `ways` slots per set.
pub trait TableEntry {
    /// Returns the set-selection key. Reduced modulo the set count.
    fn index(&self) -> u64;

    /// Returns the tag distinguishing this entry within its set.
    fn tag(&self) -> u64;
}

/// A fixed-capacity, set-associative, LRU-replaced key→entry store.
///
/// Holds `sets × ways` entries. At most one entry per (set, tag) pair is
/// resident at a time: a `fill` with a matching tag overwrites in place,
/// and otherwise evicts the least-recently-used way of a full set.
/// Operations never fail — a lookup either hits or misses.
pub struct LruTable<E> {
    sets: usize,
    ways: usize,
    slots: Vec<Option<E>>,
    /// One recency stack per set; index 0 is MRU, last index is LRU.
    usage: Vec<Vec<usize>>,
}

impl<E: TableEntry + Clone> LruTable<E> {
    /// Creates a new table with the given geometry.
    ///
    /// Degenerate geometry is clamped to a single set/way rather than
    /// rejected, so constructed tables are always usable.
    ///
    /// # Arguments
    ///
    /// * `sets` - Number of sets (index buckets).
    /// * `ways` - Associativity (entries per set).
    pub fn new(sets: usize, ways: usize) -> Self {
        let sets = if sets == 0 { 1 } else { sets };
        let ways = if ways == 0 { 1 } else { ways };

        let mut slots = Vec::with_capacity(sets * ways);
        slots.resize_with(sets * ways, || None);

        Self {
            sets,
            ways,
            slots,
            usage: (0..sets).map(|_| (0..ways).collect()).collect(),
        }
    }

    /// Returns the number of sets.
    pub fn sets(&self) -> usize {
        self.sets
    }

    /// Returns the associativity.
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Looks up an entry matching the probe's index and tag.
    ///
    /// On a hit the resident entry is marked most-recently-used and a copy
    /// is returned. On a miss the table is left untouched.
    ///
    /// # Arguments
    ///
    /// * `probe` - An entry-shaped key; only its `index()`/`tag()` are used.
    ///
    /// # Returns
    ///
    /// A copy of the matching resident entry, or `None`.
    pub fn check_hit(&mut self, probe: &E) -> Option<E> {
        let set = self.set_of(probe);
        let way = self.way_of(set, probe.tag())?;
        self.touch(set, way);
        self.slots[set * self.ways + way].clone()
    }

    /// Installs an entry, overwriting any resident entry with the same tag.
    ///
    /// If the set has no matching tag and no empty way, the strict
    /// least-recently-used way is evicted. The installed entry becomes
    /// most-recently-used either way.
    ///
    /// # Arguments
    ///
    /// * `entry` - The entry to install.
    pub fn fill(&mut self, entry: E) {
        let set = self.set_of(&entry);
        let way = match self.way_of(set, entry.tag()) {
            Some(way) => way,
            None => self.victim_way(set),
        };
        self.slots[set * self.ways + way] = Some(entry);
        self.touch(set, way);
    }

    /// Computes the set a key falls into.
    fn set_of(&self, entry: &E) -> usize {
        (entry.index() as usize) % self.sets
    }

    /// Scans a set's ways for a resident entry with the given tag.
    fn way_of(&self, set: usize, tag: u64) -> Option<usize> {
        let base = set * self.ways;
        (0..self.ways).find(|&way| {
            self.slots[base + way]
                .as_ref()
                .is_some_and(|resident| resident.tag() == tag)
        })
    }

    /// Picks the way a new entry should land in: an empty way if one
    /// exists, otherwise the LRU way.
    fn victim_way(&self, set: usize) -> usize {
        let base = set * self.ways;
        if let Some(way) = (0..self.ways).find(|&way| self.slots[base + way].is_none()) {
            return way;
        }
        self.usage[set].last().copied().unwrap_or(0)
    }

    /// Moves a way to the MRU position of its set's recency stack.
    fn touch(&mut self, set: usize, way: usize) {
        let stack = &mut self.usage[set];
        if let Some(pos) = stack.iter().position(|&w| w == way) {
            let _ = stack.remove(pos);
        }
        stack.insert(0, way);
    }
}

impl<E> fmt::Debug for LruTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruTable")
            .field("sets", &self.sets)
            .field("ways", &self.ways)
            .finish()
    }
}
