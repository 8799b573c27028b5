//! Observability counters for the replacement core.
//!
//! This module tracks the externally visible health signals of a cache
//! directory and its reuse predictor. It provides:
//! 1. **Predictor accuracy:** Cumulative prediction and correctness counts.
//! 2. **Directory traffic:** Hit, miss, and eviction counts.
//!
//! All counters are monotonic for the lifetime of the owning structure; the
//! enclosing simulator's metric pipeline is expected to snapshot and
//! aggregate them.

/// Cumulative reuse-predictor statistics.
///
/// A steadily improving `correct / total` ratio indicates the predictor is
/// converging on the workload's reuse behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredictorStats {
    /// Number of predictions made (one per scored access).
    pub total_predictions: u64,
    /// Number of predictions whose observed outcome matched.
    pub correct_predictions: u64,
}

impl PredictorStats {
    /// Returns the fraction of predictions that were correct.
    ///
    /// Returns `0.0` before any prediction has been made.
    pub fn accuracy(&self) -> f64 {
        if self.total_predictions == 0 {
            return 0.0;
        }
        self.correct_predictions as f64 / self.total_predictions as f64
    }
}

/// Cumulative cache directory statistics.
///
/// Maintained by the directory's integration hooks: `on_hit` counts hits,
/// victim lookups count misses, and `on_evict` counts displacements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryStats {
    /// Number of lookups the enclosing cache reported as hits.
    pub hits: u64,
    /// Number of victim requests (each corresponds to a miss).
    pub misses: u64,
    /// Number of lines displaced without an intervening hit.
    pub evictions: u64,
}

impl DirectoryStats {
    /// Returns the fraction of accesses that hit.
    ///
    /// Returns `0.0` before any access has been recorded.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}
