//! # Configuration Tests
//!
//! Tests for configuration structures, deserialization, defaults, and
//! policy selection.

use cachesim_core::config::*;

#[test]
fn test_cache_config_defaults() {
    let config = CacheConfig::default();
    assert_eq!(config.num_sets, 64);
    assert_eq!(config.ways, 4);
    assert_eq!(config.block_bytes, 64);
    assert_eq!(config.policy, ReplacementPolicy::Plru);
}

#[test]
fn test_perceptron_config_defaults() {
    let perceptron = PerceptronConfig::default();
    assert_eq!(perceptron.threshold, 0);
    assert_eq!(perceptron.theta, 32);
    assert_eq!(perceptron.learning_rate, 2);
    assert_eq!(perceptron.train_sample_mod, 5);
}

#[test]
fn test_replacement_policy_enum() {
    assert_eq!(ReplacementPolicy::default(), ReplacementPolicy::Plru);
    assert_ne!(ReplacementPolicy::Plru, ReplacementPolicy::Perceptron);
}

#[test]
fn test_json_deserialization_full() {
    let json = r#"{
        "num_sets": 128,
        "ways": 8,
        "block_bytes": 32,
        "policy": "Perceptron",
        "perceptron": {
            "threshold": 4,
            "theta": 64,
            "learning_rate": 1,
            "train_sample_mod": 2
        }
    }"#;

    let config: CacheConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.num_sets, 128);
    assert_eq!(config.ways, 8);
    assert_eq!(config.block_bytes, 32);
    assert_eq!(config.policy, ReplacementPolicy::Perceptron);
    assert_eq!(config.perceptron.threshold, 4);
    assert_eq!(config.perceptron.theta, 64);
    assert_eq!(config.perceptron.learning_rate, 1);
    assert_eq!(config.perceptron.train_sample_mod, 2);
}

#[test]
fn test_json_deserialization_minimal() {
    // Every field has a default; an empty object is a valid configuration.
    let config: CacheConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.num_sets, 64);
    assert_eq!(config.ways, 4);
    assert_eq!(config.policy, ReplacementPolicy::Plru);
    assert_eq!(config.perceptron.train_sample_mod, 5);
}

#[test]
fn test_json_policy_aliases() {
    let config: CacheConfig = serde_json::from_str(r#"{"policy": "PLRU"}"#).unwrap();
    assert_eq!(config.policy, ReplacementPolicy::Plru);

    let config: CacheConfig = serde_json::from_str(r#"{"policy": "PERCEPTRON"}"#).unwrap();
    assert_eq!(config.policy, ReplacementPolicy::Perceptron);
}

#[test]
fn test_json_partial_perceptron_section() {
    // Unspecified perceptron fields fall back to their defaults.
    let json = r#"{
        "policy": "Perceptron",
        "perceptron": { "train_sample_mod": 1 }
    }"#;

    let config: CacheConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.perceptron.train_sample_mod, 1);
    assert_eq!(config.perceptron.theta, 32);
    assert_eq!(config.perceptron.learning_rate, 2);
}
