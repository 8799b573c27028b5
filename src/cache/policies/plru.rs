//! Tree-PseudoLRU baseline victim selection.
//!
//! The recency-only policy: invalid slots are filled first, then the set's
//! PseudoLRU tree names the victim. This is the behavior the perceptron
//! policy degrades to whenever its prediction is unreliable, and the
//! reference point its worst case is bounded by.

use super::{first_invalid, recency_victim, Block, Set, VictimContext, VictimFinder};

/// Recency-baseline policy state.
///
/// All recency state lives in the sets themselves, so the finder is a unit
/// struct.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlruVictimFinder;

impl PlruVictimFinder {
    /// Creates a new baseline victim finder.
    pub fn new() -> Self {
        Self
    }
}

impl VictimFinder for PlruVictimFinder {
    /// Selects a victim by recency alone.
    ///
    /// Order of preference: first invalid unlocked slot, the recency tree's
    /// victim if unlocked, the first unlocked block, the first block.
    fn find_victim<'a>(&mut self, set: &'a Set, _ctx: &VictimContext) -> &'a Block {
        if let Some(block) = first_invalid(set) {
            return block;
        }
        recency_victim(set)
    }
}
