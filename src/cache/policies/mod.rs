//! Victim-selection policies.
//!
//! Defines the interface a cache directory uses to pick eviction victims
//! and to feed outcome information back into the policy.
//!
//! # Policies
//!
//! - `PlruVictimFinder`: Tree-PseudoLRU recency baseline.
//! - `PerceptronVictimFinder`: perceptron reuse prediction hybridized with
//!   the recency baseline.

/// Perceptron-based victim selection.
pub mod perceptron;

/// Tree-PseudoLRU baseline victim selection.
pub mod plru;

/// Perceptron reuse predictor (weights and training).
pub mod predictor;

pub use perceptron::PerceptronVictimFinder;
pub use plru::PlruVictimFinder;
pub use predictor::ReusePredictor;

use super::{Block, ProcessId, Set};
use crate::config::{CacheConfig, ReplacementPolicy};

/// Kind of memory access that triggered a victim request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    /// Read access.
    Read,
    /// Write access.
    Write,
}

/// Context describing the access a victim is being selected for.
///
/// The selector forwards `address` to the predictor; the remaining fields
/// are carried for the enclosing directory pipeline and are opaque to the
/// replacement core.
#[derive(Debug, Clone, Copy)]
pub struct VictimContext {
    /// Memory address of the referenced line.
    pub address: u64,
    /// Owning process of the access.
    pub pid: ProcessId,
    /// Read or write.
    pub kind: AccessKind,
    /// Cache-line identifier derived from the address.
    pub line_id: u64,
}

/// Trait for victim-selection policies.
///
/// A directory drives its policy through four hooks: victim selection on a
/// miss, hit and eviction outcome feedback, and recency updates when a way
/// becomes most recently used.
pub trait VictimFinder {
    /// Selects the block to displace (or the invalid block to fill) from a
    /// set.
    ///
    /// Never fails: if every block is locked the first block is returned,
    /// and the caller is expected not to request victims from fully locked
    /// sets.
    fn find_victim<'a>(&mut self, set: &'a Set, ctx: &VictimContext) -> &'a Block;

    /// Notifies the policy that `addr` was hit again while cached.
    fn on_hit(&mut self, addr: u64) {
        let _ = addr;
    }

    /// Notifies the policy that the line at `addr` was displaced without an
    /// intervening hit.
    fn on_evict(&mut self, addr: u64) {
        let _ = addr;
    }

    /// Notifies the policy that a way became most recently used (fill or
    /// hit).
    fn on_touch(&mut self, set: &mut Set, way_id: usize) {
        set.recency.touch(way_id);
    }
}

/// Tagged union over the finite set of policies.
///
/// The directory is generic over its policy, so the two concrete finders
/// dispatch statically; this variant exists for callers that pick the
/// policy from configuration at run time without boxing.
#[derive(Debug, Clone)]
pub enum Policy {
    /// Tree-PseudoLRU recency baseline.
    Plru(PlruVictimFinder),
    /// Perceptron reuse prediction with recency fallback.
    Perceptron(PerceptronVictimFinder),
}

impl Policy {
    /// Builds the configured policy.
    pub fn from_config(config: &CacheConfig) -> Self {
        match config.policy {
            ReplacementPolicy::Plru => Policy::Plru(PlruVictimFinder::new()),
            ReplacementPolicy::Perceptron => {
                Policy::Perceptron(PerceptronVictimFinder::from_config(&config.perceptron))
            }
        }
    }

    /// Returns the reuse predictor when the perceptron policy is active.
    pub fn predictor(&self) -> Option<&ReusePredictor> {
        match self {
            Policy::Plru(_) => None,
            Policy::Perceptron(finder) => Some(finder.predictor()),
        }
    }
}

impl VictimFinder for Policy {
    fn find_victim<'a>(&mut self, set: &'a Set, ctx: &VictimContext) -> &'a Block {
        match self {
            Policy::Plru(finder) => finder.find_victim(set, ctx),
            Policy::Perceptron(finder) => finder.find_victim(set, ctx),
        }
    }

    fn on_hit(&mut self, addr: u64) {
        match self {
            Policy::Plru(finder) => finder.on_hit(addr),
            Policy::Perceptron(finder) => finder.on_hit(addr),
        }
    }

    fn on_evict(&mut self, addr: u64) {
        match self {
            Policy::Plru(finder) => finder.on_evict(addr),
            Policy::Perceptron(finder) => finder.on_evict(addr),
        }
    }

    fn on_touch(&mut self, set: &mut Set, way_id: usize) {
        match self {
            Policy::Plru(finder) => finder.on_touch(set, way_id),
            Policy::Perceptron(finder) => finder.on_touch(set, way_id),
        }
    }
}

/// Returns the first unlocked block in way order, or the first block when
/// every way is locked.
///
/// Shared fallback of both policies; assumes the set is non-empty, which
/// the directory guarantees by construction.
fn first_unlocked(set: &Set) -> &Block {
    set.blocks
        .iter()
        .find(|block| !block.locked)
        .unwrap_or(&set.blocks[0])
}

/// Returns the first invalid, unlocked block in way order, if any.
fn first_invalid(set: &Set) -> Option<&Block> {
    set.blocks
        .iter()
        .find(|block| !block.valid && !block.locked)
}

/// Returns the recency tree's victim if it is usable, falling back to the
/// first unlocked block.
fn recency_victim(set: &Set) -> &Block {
    let way = set.recency.victim();
    if way < set.blocks.len() && !set.blocks[way].locked {
        return &set.blocks[way];
    }
    first_unlocked(set)
}
