//! Cache replacement core with perceptron reuse prediction.
//!
//! This crate implements the victim-selection half of a set-associative
//! cache (sized for a GPU L2, usable anywhere) with the following:
//! 1. **Predictor:** 32 saturating signed weights scoring each reference
//!    address; online training from hit/eviction outcomes, sampled and
//!    coupled to the most recent score.
//! 2. **Recency:** per-set Tree-PseudoLRU bit trees with O(1) touch and
//!    victim lookup.
//! 3. **Selection:** a hybrid policy that lets a confident "no reuse"
//!    prediction override the recency baseline, and degrades to PseudoLRU
//!    everywhere else.
//! 4. **Directory:** set-associative bookkeeping (lookup, victim requests,
//!    recency and training hooks) for the enclosing cache pipeline.
//!
//! The core is single-threaded per cache instance and allocation-free on
//! the hot path; it is meant to be driven by a discrete-event simulator
//! that serializes accesses per cache.
//!
//! # Examples
//!
//! ```
//! use cachesim_core::cache::policies::{AccessKind, VictimContext};
//! use cachesim_core::cache::{Directory, ProcessId};
//! use cachesim_core::config::{CacheConfig, ReplacementPolicy};
//!
//! let config = CacheConfig {
//!     policy: ReplacementPolicy::Perceptron,
//!     ..CacheConfig::default()
//! };
//! let mut directory = Directory::from_config(&config);
//!
//! // Miss path: ask for a victim, then commit the fill.
//! let ctx = VictimContext {
//!     address: 0x4000,
//!     pid: ProcessId(1),
//!     kind: AccessKind::Read,
//!     line_id: 0x4000 / 64,
//! };
//! let (set_id, way_id) = {
//!     let victim = directory.find_victim_with_context(0x4000, &ctx);
//!     (victim.set_id, victim.way_id)
//! };
//! let block = directory.block_mut(set_id, way_id);
//! block.valid = true;
//! block.tag = 0x4000;
//! block.pid = ProcessId(1);
//! directory.visit(set_id, way_id);
//!
//! // Hit path: recency update plus reuse feedback for the predictor.
//! assert!(directory.lookup(ProcessId(1), 0x4000).is_some());
//! directory.on_hit(0x4000);
//! ```

/// Set-associative directory, block metadata, and replacement policies.
pub mod cache;
/// Cache geometry and predictor configuration (deserializable).
pub mod config;
/// Observability counters for the predictor and directory.
pub mod stats;

/// Root configuration type; use `CacheConfig::default()` or deserialize
/// from JSON.
pub use crate::config::CacheConfig;
/// Set-associative directory driving a victim-selection policy.
pub use crate::cache::Directory;
/// Per-set Tree-PseudoLRU recency state.
pub use crate::cache::RecencyTracker;
/// Perceptron reuse predictor (weights, scoring, training).
pub use crate::cache::policies::ReusePredictor;
