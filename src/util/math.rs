//! Activation and class-scoring helpers for grid decoding.

/// Logistic sigmoid in single precision.
///
/// Total for every finite input: `exp` saturates to infinity for large
/// negative `x` (result 0.0) and to zero for large positive `x` (result 1.0),
/// so no intermediate overflows into NaN.
pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Returns the winning class index and its probability for a logit vector.
///
/// The index is the first maximum found by a strict `>` scan, so ties go to
/// the lowest class index. The probability is `1 / sum_i exp(l_i - max)`: a
/// max-pivot normalization that scores only the winning class, deliberately
/// not a full softmax over the vector. Subtracting the maximum keeps every
/// exponent non-positive, so the sum is at least 1 and the result stays in
/// (0, 1].
pub(crate) fn best_class(logits: &[f32]) -> (usize, f32) {
    debug_assert!(!logits.is_empty());

    let mut best_idx = 0usize;
    let mut max_logit = f32::NEG_INFINITY;
    for (idx, &logit) in logits.iter().enumerate() {
        if logit > max_logit {
            best_idx = idx;
            max_logit = logit;
        }
    }

    let mut sum_exp = 0.0f32;
    for &logit in logits {
        sum_exp += (logit - max_logit).exp();
    }

    (best_idx, 1.0 / sum_exp)
}

#[cfg(test)]
mod tests {
    use super::{best_class, sigmoid};

    #[test]
    fn sigmoid_is_centered_and_monotonic() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(-1.0) < sigmoid(0.0));
        assert!(sigmoid(0.0) < sigmoid(1.0));
    }

    #[test]
    fn sigmoid_saturates_without_overflow() {
        assert_eq!(sigmoid(500.0), 1.0);
        assert_eq!(sigmoid(-500.0), 0.0);
        assert!(sigmoid(f32::MAX) <= 1.0);
        assert!(sigmoid(f32::MIN) >= 0.0);
    }

    #[test]
    fn best_class_picks_first_maximum() {
        let (idx, _) = best_class(&[1.0, 3.0, 3.0, 2.0]);
        assert_eq!(idx, 1);
    }

    #[test]
    fn best_class_uniform_logits_split_evenly() {
        let logits = [0.5f32; 8];
        let (idx, prob) = best_class(&logits);
        assert_eq!(idx, 0);
        assert!((prob - 1.0 / 8.0).abs() < 1e-6);
    }

    #[test]
    fn best_class_dominant_logit_takes_nearly_all_mass() {
        let mut logits = [0.0f32; 4];
        logits[2] = 20.0;
        let (idx, prob) = best_class(&logits);
        assert_eq!(idx, 2);
        assert!(prob > 0.999);
        assert!(prob <= 1.0);
    }

    #[test]
    fn best_class_is_shift_invariant() {
        let (_, prob_a) = best_class(&[1.0, 2.0, 3.0]);
        let (_, prob_b) = best_class(&[101.0, 102.0, 103.0]);
        assert!((prob_a - prob_b).abs() < 1e-6);
    }
}
