//! Set-associative directory bookkeeping.
//!
//! The directory records which line occupies which block slot, translates
//! request addresses to sets, and drives its victim-selection policy
//! through the integration hooks: victim requests on misses, hit/eviction
//! outcome feedback, and recency updates when a way becomes most recently
//! used.
//!
//! The directory owns its sets and blocks exclusively. The policy receives
//! sets read-only during victim selection and never mutates block metadata;
//! the enclosing cache pipeline performs all block mutation through
//! [`Directory::block_mut`].

use super::policies::{AccessKind, Policy, VictimContext, VictimFinder};
use super::{Block, ProcessId, Set};
use crate::config::CacheConfig;
use crate::stats::DirectoryStats;

/// Set-associative directory, generic over its victim-selection policy.
///
/// The policy parameter is resolved at compile time; use [`Policy`] as the
/// parameter to select the policy from configuration at run time without
/// dynamic dispatch.
#[derive(Debug, Clone)]
pub struct Directory<V: VictimFinder> {
    num_sets: usize,
    num_ways: usize,
    block_size: usize,
    sets: Vec<Set>,
    victim_finder: V,
    stats: DirectoryStats,
}

impl Directory<Policy> {
    /// Builds a directory with the policy named by the configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(
            config.num_sets,
            config.ways,
            config.block_bytes,
            Policy::from_config(config),
        )
    }
}

impl<V: VictimFinder> Directory<V> {
    /// Creates a directory with the given geometry and policy.
    ///
    /// Zero-valued geometry parameters are clamped to 1 so the directory is
    /// always well formed.
    pub fn new(num_sets: usize, num_ways: usize, block_size: usize, victim_finder: V) -> Self {
        let num_sets = num_sets.max(1);
        let num_ways = num_ways.max(1);
        let block_size = block_size.max(1);
        let sets = (0..num_sets)
            .map(|set_id| Set::new(set_id, num_ways, block_size))
            .collect();
        Self {
            num_sets,
            num_ways,
            block_size,
            sets,
            victim_finder,
            stats: DirectoryStats::default(),
        }
    }

    /// Returns the set index a request address maps to.
    fn set_index(&self, addr: u64) -> usize {
        (addr / self.block_size as u64) as usize % self.num_sets
    }

    /// Finds the block holding `addr` for `pid`, if it is cached.
    pub fn lookup(&self, pid: ProcessId, addr: u64) -> Option<&Block> {
        let set = &self.sets[self.set_index(addr)];
        set.blocks
            .iter()
            .find(|block| block.valid && block.tag == addr && block.pid == pid)
    }

    /// Selects a victim block for a fill at `addr` without access context.
    ///
    /// Derives a read-kind context from the address and delegates to
    /// [`Directory::find_victim_with_context`].
    pub fn find_victim(&mut self, addr: u64) -> &Block {
        let ctx = VictimContext {
            address: addr,
            pid: ProcessId::default(),
            kind: AccessKind::Read,
            line_id: addr / self.block_size as u64,
        };
        self.find_victim_with_context(addr, &ctx)
    }

    /// Selects a victim block for a fill at `addr`.
    ///
    /// Each call corresponds to a miss in the enclosing cache and is
    /// counted as such. The returned block is chosen by the policy; the
    /// caller mutates it through [`Directory::block_mut`] once the fill
    /// resolves.
    pub fn find_victim_with_context(&mut self, addr: u64, ctx: &VictimContext) -> &Block {
        self.stats.misses += 1;
        let set = &self.sets[self.set_index(addr)];
        self.victim_finder.find_victim(set, ctx)
    }

    /// Reports a cache hit on `addr`.
    ///
    /// Forwards the reuse outcome to the policy's predictor, if it has one.
    pub fn on_hit(&mut self, addr: u64) {
        self.stats.hits += 1;
        self.victim_finder.on_hit(addr);
    }

    /// Reports that the line at `addr` was displaced without an intervening
    /// hit.
    pub fn on_evict(&mut self, addr: u64) {
        self.stats.evictions += 1;
        self.victim_finder.on_evict(addr);
    }

    /// Marks a way as most recently used (fill or hit).
    pub fn visit(&mut self, set_id: usize, way_id: usize) {
        self.victim_finder.on_touch(&mut self.sets[set_id], way_id);
    }

    /// Invalidates every block, restoring the post-construction state.
    ///
    /// Geometry and cumulative statistics are preserved; recency trees and
    /// block metadata are re-initialized.
    pub fn reset(&mut self) {
        self.sets = (0..self.num_sets)
            .map(|set_id| Set::new(set_id, self.num_ways, self.block_size))
            .collect();
    }

    /// Returns the maximum number of bytes the cache can hold.
    pub fn total_size(&self) -> u64 {
        (self.num_sets * self.num_ways * self.block_size) as u64
    }

    /// Returns the number of ways per set.
    pub fn way_associativity(&self) -> usize {
        self.num_ways
    }

    /// Returns the number of sets.
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Returns all sets, in index order.
    pub fn sets(&self) -> &[Set] {
        &self.sets
    }

    /// Returns one block's metadata.
    pub fn block(&self, set_id: usize, way_id: usize) -> &Block {
        &self.sets[set_id].blocks[way_id]
    }

    /// Returns one block's metadata mutably.
    ///
    /// The directory pipeline uses this to commit fills and invalidations;
    /// the replacement policy itself never mutates blocks.
    pub fn block_mut(&mut self, set_id: usize, way_id: usize) -> &mut Block {
        &mut self.sets[set_id].blocks[way_id]
    }

    /// Returns the policy driving victim selection.
    pub fn victim_finder(&self) -> &V {
        &self.victim_finder
    }

    /// Returns the cumulative directory statistics.
    pub fn stats(&self) -> DirectoryStats {
        self.stats
    }
}
