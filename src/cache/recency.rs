//! Tree-PseudoLRU recency tracking.
//!
//! Each set carries a compact approximation of LRU ordering: a binary tree
//! of one-bit decisions over the ways (W−1 bits for W ways). Every tree node
//! records which of its two subtrees should be evicted next; touching a way
//! rewrites the nodes on its path to point away from it.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()`: O(1)
//!   - `victim()`: O(1)
//! - **Space Complexity:** W−1 bits per set (one machine word)
//! - **Hardware Cost:** Low - simple bit operations
//!
//! Associativities other than 2, 4, and 8 fall back to a round-robin
//! counter, which keeps victim selection legal but loses the recency
//! approximation.

/// Per-set recency state.
///
/// For W ∈ {2, 4, 8} the `bits` word holds the PseudoLRU decision tree; for
/// any other associativity it holds a round-robin counter modulo W.
#[derive(Debug, Clone)]
pub struct RecencyTracker {
    /// Number of ways covered by this tracker.
    ways: usize,
    /// Tree bits (or round-robin counter for unsupported associativities).
    bits: u64,
}

impl RecencyTracker {
    /// Creates a tracker for a set with the given associativity.
    ///
    /// A fresh tracker has all tree bits clear, so the first victim is
    /// way 0. An associativity of 0 is treated as 1.
    pub fn new(ways: usize) -> Self {
        Self {
            ways: if ways == 0 { 1 } else { ways },
            bits: 0,
        }
    }

    /// Returns the number of ways covered by this tracker.
    pub fn ways(&self) -> usize {
        self.ways
    }

    /// Returns the way the tree currently points at for eviction.
    ///
    /// Read-only: the returned way is an advisory hint, and the caller is
    /// free to decline it (for example when the way is locked).
    pub fn victim(&self) -> usize {
        match self.ways {
            2 => (self.bits & 1) as usize,
            4 => self.victim4(),
            8 => self.victim8(),
            _ => (self.bits as usize) % self.ways,
        }
    }

    /// Marks a way as most recently used.
    ///
    /// Rewrites every tree node on the path to `way` to point at the
    /// opposite subtree, so the way just touched is never the immediate
    /// next victim.
    pub fn touch(&mut self, way: usize) {
        debug_assert!(way < self.ways);
        match self.ways {
            2 => self.bits = (way as u64 ^ 1) & 1,
            4 => self.touch4(way),
            8 => self.touch8(way),
            _ => self.bits = ((way + 1) % self.ways) as u64,
        }
    }

    /// Reads one tree node bit.
    fn bit(&self, idx: u32) -> bool {
        (self.bits >> idx) & 1 != 0
    }

    /// Writes one tree node bit.
    fn set_bit(&mut self, idx: u32, value: bool) {
        if value {
            self.bits |= 1 << idx;
        } else {
            self.bits &= !(1 << idx);
        }
    }

    /// 4-way tree walk.
    ///
    /// Node layout: bit 0 selects the pair to evict ({0,1} vs {2,3});
    /// bit 1 selects within {0,1}; bit 2 selects within {2,3}.
    fn victim4(&self) -> usize {
        if !self.bit(0) {
            if !self.bit(1) { 0 } else { 1 }
        } else if !self.bit(2) {
            2
        } else {
            3
        }
    }

    /// 4-way tree update.
    fn touch4(&mut self, way: usize) {
        if way < 2 {
            self.set_bit(0, true);
            self.set_bit(1, way == 0);
        } else {
            self.set_bit(0, false);
            self.set_bit(2, way == 2);
        }
    }

    /// 8-way tree walk.
    ///
    /// Node layout: bit 0 selects the half to evict; bits 1 and 2 select
    /// the pair within the left and right halves; bits 3..=6 select within
    /// the pairs {0,1}, {2,3}, {4,5}, {6,7}.
    fn victim8(&self) -> usize {
        if !self.bit(0) {
            if !self.bit(1) {
                if !self.bit(3) { 0 } else { 1 }
            } else if !self.bit(4) {
                2
            } else {
                3
            }
        } else if !self.bit(2) {
            if !self.bit(5) { 4 } else { 5 }
        } else if !self.bit(6) {
            6
        } else {
            7
        }
    }

    /// 8-way tree update.
    fn touch8(&mut self, way: usize) {
        if way < 4 {
            self.set_bit(0, true);
            if way < 2 {
                self.set_bit(1, true);
                self.set_bit(3, way == 0);
            } else {
                self.set_bit(1, false);
                self.set_bit(4, way == 2);
            }
        } else {
            self.set_bit(0, false);
            if way < 6 {
                self.set_bit(2, true);
                self.set_bit(5, way == 4);
            } else {
                self.set_bit(2, false);
                self.set_bit(6, way == 6);
            }
        }
    }
}
