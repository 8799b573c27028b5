//! Set-associative cache directory and replacement policies.
//!
//! This module implements the bookkeeping half of a set-associative cache:
//! the directory that maps addresses to sets, the block metadata stored per
//! way, the per-set recency state, and the victim-selection policies that
//! decide which block to displace on a miss.
//!
//! The data path (tags, MSHRs, writeback) belongs to the enclosing cache
//! pipeline; this module only answers "where does this line live" and
//! "which block should go".

/// Set-associative directory bookkeeping and integration hooks.
pub mod directory;

/// Victim-selection policies (Tree-PseudoLRU baseline and perceptron).
pub mod policies;

/// Per-set Tree-PseudoLRU recency tracking.
pub mod recency;

pub use directory::Directory;
pub use recency::RecencyTracker;

/// Process identifier attached to cached lines.
///
/// Caches shared between address spaces disambiguate identical virtual
/// addresses by PID; a single-process simulation can use the default zero
/// value throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProcessId(pub u64);

/// Metadata for one physical block slot (one way of one set).
///
/// Blocks are created by the directory at construction time and mutated by
/// the directory pipeline. The replacement policies receive them read-only
/// and never write them.
#[derive(Debug, Clone)]
pub struct Block {
    /// Owning process of the cached line.
    pub pid: ProcessId,
    /// Tag of the cached line (the full request address of the line).
    pub tag: u64,
    /// Way index of this slot within its set.
    pub way_id: usize,
    /// Set index of this slot within the directory.
    pub set_id: usize,
    /// Byte offset of this slot's storage within the cache data array.
    pub cache_address: u64,
    /// The slot holds a mapped line.
    pub valid: bool,
    /// The cached line differs from the backing store.
    pub dirty: bool,
    /// The slot is the target of an in-flight transaction and must not be
    /// evicted.
    pub locked: bool,
}

/// One directory set: a fixed number of block slots plus recency state.
#[derive(Debug, Clone)]
pub struct Set {
    /// Block slots in way order; the length equals the associativity.
    pub blocks: Vec<Block>,
    /// Tree-PseudoLRU state covering this set's ways.
    pub recency: RecencyTracker,
}

impl Set {
    /// Creates a set with `ways` invalid blocks for the given geometry.
    ///
    /// Each block's `cache_address` is precomputed from its position so the
    /// directory owner can locate its storage without arithmetic on the hot
    /// path.
    pub fn new(set_id: usize, ways: usize, block_size: usize) -> Self {
        let blocks = (0..ways)
            .map(|way_id| Block {
                pid: ProcessId::default(),
                tag: 0,
                way_id,
                set_id,
                cache_address: ((set_id * ways + way_id) * block_size) as u64,
                valid: false,
                dirty: false,
                locked: false,
            })
            .collect();
        Self {
            blocks,
            recency: RecencyTracker::new(ways),
        }
    }

    /// Returns the number of ways in this set.
    pub fn ways(&self) -> usize {
        self.blocks.len()
    }
}
