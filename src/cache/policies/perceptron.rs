//! Perceptron-based victim selection.
//!
//! Hybrid policy: the reuse predictor scores each incoming reference, and a
//! confident "no reuse" verdict releases the first unlocked block instead of
//! the one the recency tree protects. Every other case — an uncertain score
//! or a predicted reuse — degrades to the Tree-PseudoLRU baseline, which
//! bounds the policy's worst case by the baseline's behavior.
//!
//! The directory reports outcomes back through `on_hit` (the scored line was
//! referenced again) and `on_evict` (it was displaced untouched); both feed
//! the predictor's sampled training.

use super::{first_invalid, first_unlocked, recency_victim, Block, Set, VictimContext};
use super::{ReusePredictor, VictimFinder};
use crate::config::PerceptronConfig;

/// Perceptron policy state.
#[derive(Debug, Clone)]
pub struct PerceptronVictimFinder {
    /// The reuse predictor consulted for every victim request.
    predictor: ReusePredictor,
}

impl PerceptronVictimFinder {
    /// Creates a perceptron policy with the default tuning parameters.
    pub fn new() -> Self {
        Self {
            predictor: ReusePredictor::new(),
        }
    }

    /// Creates a perceptron policy from explicit tuning parameters.
    pub fn from_config(config: &PerceptronConfig) -> Self {
        Self {
            predictor: ReusePredictor::from_config(config),
        }
    }

    /// Returns the underlying predictor (for statistics readout).
    pub fn predictor(&self) -> &ReusePredictor {
        &self.predictor
    }

    /// Returns the underlying predictor mutably (for warm-up or direct
    /// training).
    pub fn predictor_mut(&mut self) -> &mut ReusePredictor {
        &mut self.predictor
    }
}

impl VictimFinder for PerceptronVictimFinder {
    /// Selects a victim using the prediction when it is confident, the
    /// recency tree otherwise.
    ///
    /// The access is scored unconditionally so that the predictor's
    /// single-entry score cache always reflects the most recent victim
    /// request; training for this access consumes that cached score.
    fn find_victim<'a>(&mut self, set: &'a Set, ctx: &VictimContext) -> &'a Block {
        let score = self.predictor.score(ctx.address);

        // Invalid slots are free: fill them before consulting anything.
        if let Some(block) = first_invalid(set) {
            return block;
        }

        let predict_no_reuse = score >= self.predictor.threshold();
        let confident = score.abs() >= self.predictor.theta();

        if confident && predict_no_reuse {
            // Predicted dead on arrival: recency does not matter here.
            return first_unlocked(set);
        }

        recency_victim(set)
    }

    /// Trains the predictor with a reuse outcome.
    fn on_hit(&mut self, addr: u64) {
        self.predictor.train(addr, true);
    }

    /// Trains the predictor with a no-reuse outcome.
    fn on_evict(&mut self, addr: u64) {
        self.predictor.train(addr, false);
    }
}

impl Default for PerceptronVictimFinder {
    /// Returns a perceptron policy with the default tuning parameters.
    fn default() -> Self {
        Self::new()
    }
}
