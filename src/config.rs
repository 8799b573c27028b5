//! Configuration for the cache replacement core.
//!
//! This module defines the configuration structures used to parameterize a
//! cache directory and its replacement policy. It provides:
//! 1. **Defaults:** Baseline geometry and predictor constants.
//! 2. **Structures:** Cache geometry and perceptron tuning parameters.
//! 3. **Enums:** Replacement policy selection.
//!
//! Configuration is supplied via JSON from an enclosing simulator, or use
//! `CacheConfig::default()` for a standalone directory.

use serde::Deserialize;

/// Default configuration constants for the replacement core.
///
/// These values define the baseline configuration when not explicitly
/// overridden by the enclosing simulator.
mod defaults {
    /// Default number of sets in the directory.
    pub const NUM_SETS: usize = 64;

    /// Default associativity (ways per set).
    ///
    /// Four ways keeps the Tree-PseudoLRU representation at three bits per
    /// set and matches the geometry the policy is most often driven with.
    pub const NUM_WAYS: usize = 4;

    /// Default cache block (line) size in bytes.
    pub const BLOCK_BYTES: usize = 64;

    /// Default prediction threshold (τ).
    ///
    /// A score at or above τ is interpreted as "predict no reuse". Larger
    /// values make the predictor more conservative about declaring a block
    /// dead.
    pub const PREDICTION_THRESHOLD: i32 = 0;

    /// Default confidence floor (θ).
    ///
    /// Scores with magnitude below θ are treated as unreliable and the
    /// selector falls back to the recency baseline. Larger values use the
    /// prediction less often.
    pub const CONFIDENCE_FLOOR: i32 = 32;

    /// Default learning rate (magnitude of a single weight adjustment).
    pub const LEARNING_RATE: i32 = 2;

    /// Default training sample period (train every Nth outcome).
    pub const TRAIN_SAMPLE_MOD: u64 = 5;
}

/// Replacement policy selection for a cache directory.
///
/// Specifies the victim-selection strategy used when a new line must be
/// installed in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ReplacementPolicy {
    /// Tree-PseudoLRU recency baseline.
    ///
    /// Evicts the way the per-set recency tree points at. Cheap and
    /// predictable; the fallback path of the perceptron policy degrades to
    /// exactly this behavior.
    #[default]
    #[serde(alias = "PLRU")]
    Plru,
    /// Perceptron-based reuse prediction, hybridized with Tree-PseudoLRU.
    ///
    /// Predicts whether the incoming reference is likely to be reused and
    /// overrides the recency baseline only on confident no-reuse
    /// predictions.
    #[serde(alias = "PERCEPTRON")]
    Perceptron,
}

/// Cache directory configuration.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachesim_core::config::CacheConfig;
///
/// let config = CacheConfig::default();
/// assert_eq!(config.num_sets, 64);
/// assert_eq!(config.ways, 4);
/// ```
///
/// Deserializing from JSON (typical simulator usage):
///
/// ```
/// use cachesim_core::config::{CacheConfig, ReplacementPolicy};
///
/// let json = r#"{
///     "num_sets": 128,
///     "ways": 8,
///     "block_bytes": 64,
///     "policy": "Perceptron",
///     "perceptron": {
///         "threshold": 0,
///         "theta": 32,
///         "learning_rate": 2,
///         "train_sample_mod": 5
///     }
/// }"#;
///
/// let config: CacheConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.num_sets, 128);
/// assert_eq!(config.policy, ReplacementPolicy::Perceptron);
/// assert_eq!(config.perceptron.train_sample_mod, 5);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Number of sets in the directory.
    #[serde(default = "CacheConfig::default_num_sets")]
    pub num_sets: usize,

    /// Associativity (ways per set). Must match the enclosing cache.
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Cache block (line) size in bytes.
    #[serde(default = "CacheConfig::default_block_bytes")]
    pub block_bytes: usize,

    /// Victim-selection policy.
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Perceptron tuning parameters (used when `policy` is `Perceptron`).
    #[serde(default)]
    pub perceptron: PerceptronConfig,
}

impl CacheConfig {
    /// Returns the default number of sets.
    fn default_num_sets() -> usize {
        defaults::NUM_SETS
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::NUM_WAYS
    }

    /// Returns the default block size in bytes.
    fn default_block_bytes() -> usize {
        defaults::BLOCK_BYTES
    }
}

impl Default for CacheConfig {
    /// Creates a default cache configuration.
    ///
    /// 64 sets, 4 ways, 64-byte blocks, Tree-PseudoLRU replacement.
    fn default() -> Self {
        Self {
            num_sets: defaults::NUM_SETS,
            ways: defaults::NUM_WAYS,
            block_bytes: defaults::BLOCK_BYTES,
            policy: ReplacementPolicy::default(),
            perceptron: PerceptronConfig::default(),
        }
    }
}

/// Perceptron reuse-predictor configuration.
///
/// The defaults are the parameters the predictor was tuned with: τ = 0,
/// θ = 32, learning rate 2, training sampled every fifth outcome.
#[derive(Debug, Clone, Deserialize)]
pub struct PerceptronConfig {
    /// Prediction threshold (τ): scores at or above it predict no reuse.
    #[serde(default = "PerceptronConfig::default_threshold")]
    pub threshold: i32,

    /// Confidence floor (θ): minimum score magnitude for the prediction to
    /// override the recency baseline.
    #[serde(default = "PerceptronConfig::default_theta")]
    pub theta: i32,

    /// Magnitude of a single weight adjustment during training.
    #[serde(default = "PerceptronConfig::default_learning_rate")]
    pub learning_rate: i32,

    /// Train every Nth outcome. A value of 1 trains on every outcome;
    /// 0 is treated as 1.
    #[serde(default = "PerceptronConfig::default_train_sample_mod")]
    pub train_sample_mod: u64,
}

impl PerceptronConfig {
    /// Returns the default prediction threshold (τ).
    fn default_threshold() -> i32 {
        defaults::PREDICTION_THRESHOLD
    }

    /// Returns the default confidence floor (θ).
    fn default_theta() -> i32 {
        defaults::CONFIDENCE_FLOOR
    }

    /// Returns the default learning rate.
    fn default_learning_rate() -> i32 {
        defaults::LEARNING_RATE
    }

    /// Returns the default training sample period.
    fn default_train_sample_mod() -> u64 {
        defaults::TRAIN_SAMPLE_MOD
    }
}

impl Default for PerceptronConfig {
    /// Creates a default perceptron configuration (τ = 0, θ = 32, lr = 2,
    /// sample period 5).
    fn default() -> Self {
        Self {
            threshold: defaults::PREDICTION_THRESHOLD,
            theta: defaults::CONFIDENCE_FLOOR,
            learning_rate: defaults::LEARNING_RATE,
            train_sample_mod: defaults::TRAIN_SAMPLE_MOD,
        }
    }
}
