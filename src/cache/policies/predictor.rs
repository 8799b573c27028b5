//! Perceptron reuse predictor.
//!
//! Maps a 64-bit reference address to a signed score whose sign predicts
//! whether the line will be reused before eviction and whose magnitude is
//! the confidence. The predictor keeps 32 saturating signed weights, one per
//! address bit of the low 32 bits: scoring sums the weights selected by the
//! set bits, and training nudges those same weights toward the observed
//! outcome.
//!
//! Training is sampled (every Nth outcome) and coupled to the most recent
//! scoring call through a single-entry address/score cache, so the hot path
//! never scores an access twice.

use crate::config::PerceptronConfig;
use crate::stats::PredictorStats;

/// Number of weights (one per inspected address bit).
const NUM_WEIGHTS: usize = 32;

/// Lower saturation bound of a weight (6-bit signed storage).
pub const WEIGHT_MIN: i32 = -32;

/// Upper saturation bound of a weight (6-bit signed storage).
pub const WEIGHT_MAX: i32 = 31;

/// Perceptron reuse-predictor state.
///
/// One instance per cache. Weights warm-start at zero; there is no
/// persistent state across runs.
#[derive(Debug, Clone)]
pub struct ReusePredictor {
    /// Per-bit weights, each saturating in `[WEIGHT_MIN, WEIGHT_MAX]`.
    weights: [i32; NUM_WEIGHTS],
    /// Prediction threshold (τ): scores at or above it predict no reuse.
    threshold: i32,
    /// Confidence floor (θ): magnitude below which training always applies.
    theta: i32,
    /// Magnitude of a single weight adjustment.
    learning_rate: i32,
    /// Train every Nth outcome.
    sample_period: u64,
    /// Monotonic count of training calls; advances whether or not the
    /// sampling gate admits the call.
    train_tick: u64,
    /// Address of the most recent scoring call.
    last_addr: Option<u64>,
    /// Score produced by the most recent scoring call.
    last_score: i32,
    /// Number of predictions made.
    total_predictions: u64,
    /// Number of predictions whose trained outcome matched.
    correct_predictions: u64,
}

impl ReusePredictor {
    /// Creates a predictor with the default parameters (τ = 0, θ = 32,
    /// learning rate 2, sample period 5).
    pub fn new() -> Self {
        Self::from_config(&PerceptronConfig::default())
    }

    /// Creates a predictor with explicit τ, θ, and learning rate, keeping
    /// the default sample period.
    pub fn with_params(threshold: i32, theta: i32, learning_rate: i32) -> Self {
        Self::from_config(&PerceptronConfig {
            threshold,
            theta,
            learning_rate,
            ..PerceptronConfig::default()
        })
    }

    /// Creates a predictor from explicit tuning parameters.
    ///
    /// A sample period of 0 is treated as 1 (train on every outcome).
    pub fn from_config(config: &PerceptronConfig) -> Self {
        Self {
            weights: [0; NUM_WEIGHTS],
            threshold: config.threshold,
            theta: config.theta,
            learning_rate: config.learning_rate,
            sample_period: config.train_sample_mod.max(1),
            train_tick: 0,
            last_addr: None,
            last_score: 0,
            total_predictions: 0,
            correct_predictions: 0,
        }
    }

    /// Returns the prediction threshold (τ).
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    /// Returns the confidence floor (θ).
    pub fn theta(&self) -> i32 {
        self.theta
    }

    /// Scores an address.
    ///
    /// The result is the sum of the weights selected by the set bits of the
    /// low 32 bits of `addr`: bits 0..16 index the first half of the weight
    /// array, bits 16..32 the second half. The caller interprets
    /// `score >= τ` as "predict no reuse" and `|score|` as confidence.
    ///
    /// Records the `(addr, score)` pair for training and advances the
    /// prediction counter. With 32 weights in `[-32, +31]` the sum cannot
    /// leave `[-1024, +992]`, so `i32` arithmetic cannot overflow.
    pub fn score(&mut self, addr: u64) -> i32 {
        let sum = self.raw_score(addr);
        self.last_addr = Some(addr);
        self.last_score = sum;
        self.total_predictions += 1;
        sum
    }

    /// Sums the weights selected by the set bits of `addr` without touching
    /// predictor state.
    fn raw_score(&self, addr: u64) -> i32 {
        let mut sum = 0;
        for i in 0..16 {
            if (addr >> i) & 1 == 1 {
                sum += self.weights[i];
            }
        }
        for i in 0..16 {
            if (addr >> (i + 16)) & 1 == 1 {
                sum += self.weights[i + 16];
            }
        }
        sum
    }

    /// Feeds an observed outcome back into the weights.
    ///
    /// `reused` is true when the line was hit again before eviction, false
    /// when it was displaced without an intervening hit.
    ///
    /// The tick counter advances on every call. Training applies only when
    /// the sampled tick lands on the period boundary *and* `addr` matches
    /// the most recently scored address; otherwise the call is a silent
    /// no-op. When training applies, weights move only on a misprediction
    /// or when the cached score's magnitude is below θ; each weight whose
    /// address bit is set moves by the learning rate toward the outcome and
    /// saturates at the storage bounds.
    pub fn train(&mut self, addr: u64, reused: bool) {
        self.train_tick += 1;
        if self.train_tick % self.sample_period != 0 {
            return;
        }
        if self.last_addr != Some(addr) {
            return;
        }

        let predicted_no_reuse = self.last_score >= self.threshold;
        let wrong = predicted_no_reuse == reused;

        if wrong || self.last_score.abs() < self.theta {
            for i in 0..NUM_WEIGHTS {
                if (addr >> i) & 1 != 1 {
                    continue;
                }
                self.weights[i] = if reused {
                    (self.weights[i] - self.learning_rate).max(WEIGHT_MIN)
                } else {
                    (self.weights[i] + self.learning_rate).min(WEIGHT_MAX)
                };
            }
        }

        if !wrong {
            self.correct_predictions += 1;
        }
    }

    /// Returns the cumulative prediction counters.
    pub fn stats(&self) -> PredictorStats {
        PredictorStats {
            total_predictions: self.total_predictions,
            correct_predictions: self.correct_predictions,
        }
    }
}

impl Default for ReusePredictor {
    /// Returns a predictor with the default tuning parameters.
    fn default() -> Self {
        Self::new()
    }
}
