//! Reuse Predictor Unit Tests.
//!
//! Verifies the perceptron's scoring arithmetic, the saturating weight
//! updates, the training gates (sample period and scored-address match),
//! and the observability counters. Training is driven through the public
//! API only: an address must be scored before an outcome for it can train.

use cachesim_core::cache::policies::ReusePredictor;
use cachesim_core::config::PerceptronConfig;

// ──────────────────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────────────────

/// Builds a predictor with the default tuning but an explicit training
/// sample period.
fn predictor_with_period(train_sample_mod: u64) -> ReusePredictor {
    ReusePredictor::from_config(&PerceptronConfig {
        train_sample_mod,
        ..PerceptronConfig::default()
    })
}

/// Scores `addr` and feeds back a no-reuse outcome, `rounds` times.
///
/// With the default learning rate this walks every weight selected by
/// `addr` upward by 2 per round until it saturates at +31.
fn train_no_reuse(predictor: &mut ReusePredictor, addr: u64, rounds: usize) {
    for _ in 0..rounds {
        predictor.score(addr);
        predictor.train(addr, false);
    }
}

/// Scores `addr` and feeds back a reuse outcome, `rounds` times.
fn train_reuse(predictor: &mut ReusePredictor, addr: u64, rounds: usize) {
    for _ in 0..rounds {
        predictor.score(addr);
        predictor.train(addr, true);
    }
}

// ══════════════════════════════════════════════════════════
// 1. Fresh Scoring
// ══════════════════════════════════════════════════════════

/// All weights start at zero, so every address scores zero.
#[test]
fn fresh_predictor_scores_zero() {
    let mut predictor = ReusePredictor::new();
    for addr in [0x0, 0x1, 0xABCD_1234, 0xFFFF_FFFF, u64::MAX] {
        assert_eq!(predictor.score(addr), 0, "addr={:#x}", addr);
    }
}

/// The all-zero address selects no weights and scores zero even on a
/// trained predictor.
#[test]
fn zero_address_always_scores_zero() {
    let mut predictor = predictor_with_period(1);
    train_no_reuse(&mut predictor, 0xDEAD_BEEF, 8);
    assert_eq!(predictor.score(0), 0);
}

/// Scoring has no side effect on the weights: back-to-back scores of the
/// same address agree.
#[test]
fn score_is_repeatable() {
    let mut predictor = predictor_with_period(1);
    train_no_reuse(&mut predictor, 0x1234_5678, 5);

    let first = predictor.score(0x1234_5678);
    let second = predictor.score(0x1234_5678);
    assert_eq!(first, second);
}

/// The full 32-bit mask scores the sum of every per-bit weight.
#[test]
fn full_mask_scores_sum_of_weights() {
    let mut predictor = predictor_with_period(1);
    // Two no-reuse rounds push all 32 weights to +2 (the second round's
    // score of 64 is past θ, and the prediction is correct, so it stops
    // moving afterwards).
    train_no_reuse(&mut predictor, 0xFFFF_FFFF, 3);

    let full = predictor.score(0xFFFF_FFFF);
    let per_bit: i32 = (0..32).map(|i| predictor.score(1u64 << i)).sum();
    assert_eq!(full, 64);
    assert_eq!(full, per_bit);
}

/// Address bits above 31 select no weight.
#[test]
fn high_address_bits_are_ignored() {
    let mut predictor = predictor_with_period(1);
    train_no_reuse(&mut predictor, 0x1, 4);

    let low = predictor.score(0x1);
    let high = predictor.score(0x1 | (0xFFu64 << 32));
    assert_eq!(low, high);
}

// ══════════════════════════════════════════════════════════
// 2. Single-Bit Isolation
// ══════════════════════════════════════════════════════════

/// Training a single-bit address moves exactly that bit's weight: the
/// trained bit scores the full weight, any other address scores zero.
#[test]
fn single_bit_training_is_isolated() {
    let mut predictor = predictor_with_period(1);
    train_no_reuse(&mut predictor, 1 << 5, 20);

    assert_eq!(predictor.score(1 << 5), 31);
    assert_eq!(predictor.score(1 << 6), 0);
    assert_eq!(predictor.score((1 << 5) | (1 << 6)), 31);
}

// ══════════════════════════════════════════════════════════
// 3. Saturation
// ══════════════════════════════════════════════════════════

/// Repeated no-reuse outcomes drive a weight to +31 and hold it there; it
/// never wraps past the 6-bit storage bound.
#[test]
fn weights_saturate_at_upper_bound() {
    let mut predictor = predictor_with_period(1);
    train_no_reuse(&mut predictor, 0x1, 40);
    assert_eq!(predictor.score(0x1), 31);

    train_no_reuse(&mut predictor, 0x1, 10);
    assert_eq!(predictor.score(0x1), 31);
}

/// Repeated reuse outcomes drive a weight to -32 and hold it there.
#[test]
fn weights_saturate_at_lower_bound() {
    let mut predictor = predictor_with_period(1);
    train_reuse(&mut predictor, 0x1, 40);
    assert_eq!(predictor.score(0x1), -32);

    train_reuse(&mut predictor, 0x1, 10);
    assert_eq!(predictor.score(0x1), -32);
}

/// Every weight stays inside [-32, +31] under mixed training pressure.
#[test]
fn weights_stay_in_range_under_mixed_training() {
    let mut predictor = predictor_with_period(1);
    for round in 0..50 {
        let addr = 0x5555_5555u64.rotate_left(round % 32);
        predictor.score(addr);
        predictor.train(addr, round % 3 == 0);
    }

    for i in 0..32 {
        let weight = predictor.score(1u64 << i);
        assert!(
            (-32..=31).contains(&weight),
            "weight {} out of range: {}",
            i,
            weight
        );
    }
}

// ══════════════════════════════════════════════════════════
// 4. Training Gates
// ══════════════════════════════════════════════════════════

/// An outcome for an address other than the one last scored is a silent
/// no-op.
#[test]
fn training_requires_matching_address() {
    let mut predictor = predictor_with_period(1);
    predictor.score(0xF0);
    predictor.train(0x0F, false);

    assert_eq!(predictor.score(0xF0), 0);
    assert_eq!(predictor.score(0x0F), 0);
}

/// An outcome delivered before anything was scored is a silent no-op,
/// including for address zero.
#[test]
fn training_before_any_score_is_noop() {
    let mut predictor = predictor_with_period(1);
    predictor.train(0x0, false);
    predictor.train(0xABCD, false);

    assert_eq!(predictor.score(0xABCD), 0);
    assert_eq!(predictor.stats().correct_predictions, 0);
}

/// With a sample period of 5, four outcomes pass without effect and the
/// fifth applies.
#[test]
fn sampling_gate_admits_every_fifth_outcome() {
    let mut predictor = predictor_with_period(5);

    predictor.score(0x1);
    for _ in 0..4 {
        predictor.train(0x1, false);
    }
    assert_eq!(predictor.score(0x1), 0, "first four outcomes are dropped");

    predictor.train(0x1, false);
    assert_eq!(predictor.score(0x1), 2, "fifth outcome trains");
}

/// The sample counter advances even on calls the address gate rejects, so
/// the period stays aligned to outcome deliveries rather than to matches.
#[test]
fn sampling_period_counts_rejected_calls() {
    let mut predictor = predictor_with_period(5);

    predictor.score(0x1);
    for _ in 0..4 {
        predictor.train(0x2, false);
    }
    // Fifth delivery matches the scored address and lands on the period.
    predictor.train(0x1, false);
    assert_eq!(predictor.score(0x1), 2);
}

/// A confident score still trains when the prediction turns out wrong.
#[test]
fn confident_mispredictions_still_train() {
    let mut predictor = predictor_with_period(1);
    // 0xAAAA_AAAA selects 16 weights; one no-reuse round lifts the score
    // to 32, right at the confidence floor.
    train_no_reuse(&mut predictor, 0xAAAA_AAAA, 1);
    assert_eq!(predictor.score(0xAAAA_AAAA), 32);

    predictor.train(0xAAAA_AAAA, true);
    assert_eq!(predictor.score(0xAAAA_AAAA), 0);
}

/// Above the confidence floor, correctly predicted outcomes stop moving
/// the weights.
#[test]
fn confident_correct_predictions_freeze_weights() {
    let mut predictor = ReusePredictor::with_params(0, 4, 2);
    for _ in 0..30 {
        predictor.score(0x1);
        predictor.train(0x1, false);
    }
    // The weight stops at 4: once the score reaches θ and the prediction
    // is correct, the update rule no longer applies.
    assert_eq!(predictor.score(0x1), 4);
}

// ══════════════════════════════════════════════════════════
// 5. Statistics
// ══════════════════════════════════════════════════════════

/// Accuracy is zero before any prediction.
#[test]
fn fresh_stats_are_zero() {
    let predictor = ReusePredictor::new();
    let stats = predictor.stats();
    assert_eq!(stats.total_predictions, 0);
    assert_eq!(stats.correct_predictions, 0);
    assert_eq!(stats.accuracy(), 0.0);
}

/// Every scoring call counts one prediction; trained outcomes that match
/// the prediction count as correct.
#[test]
fn stats_track_predictions_and_correctness() {
    let mut predictor = predictor_with_period(1);

    // Score 0 predicts no reuse; the no-reuse outcome is correct.
    predictor.score(0x1);
    predictor.train(0x1, false);
    let stats = predictor.stats();
    assert_eq!(stats.total_predictions, 1);
    assert_eq!(stats.correct_predictions, 1);
    assert_eq!(stats.accuracy(), 1.0);

    // The positive score still predicts no reuse; a reuse outcome is a
    // misprediction.
    predictor.score(0x1);
    predictor.train(0x1, true);
    let stats = predictor.stats();
    assert_eq!(stats.total_predictions, 2);
    assert_eq!(stats.correct_predictions, 1);
    assert_eq!(stats.accuracy(), 0.5);
}

/// Correct predictions never exceed total predictions across a mixed
/// workload.
#[test]
fn correct_never_exceeds_total() {
    let mut predictor = predictor_with_period(1);
    for round in 0..100u64 {
        let addr = round.wrapping_mul(0x9E37_79B9) & 0xFFFF_FFFF;
        predictor.score(addr);
        predictor.train(addr, round % 2 == 0);

        let stats = predictor.stats();
        assert!(stats.correct_predictions <= stats.total_predictions);
    }
}
