//! Multiplicative fitness over accumulated mutation effects.
//!
//! Fitness starts from a baseline of `1.0` and every recorded mutation
//! multiplies it by `1 + effect`. The result is always finite and
//! non-negative: a factor that would be negative (an effect below `-1`) is
//! lethal and contributes `0.0`, and a product that overflows or turns into
//! NaN is clamped back into range. Clamping is reported, never raised.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::evolution::MutationEvent;

/// Fitness of an organism with an empty mutation log.
pub const BASELINE_FITNESS: f64 = 1.0;

/// Fitness of an organism carrying a lethal mutation.
pub const LETHAL_FITNESS: f64 = 0.0;

/// Result of scoring a mutation log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessScore {
    /// Finite, non-negative fitness.
    pub value: f64,
    /// Whether any factor or the final product had to be clamped.
    pub clamped: bool,
}

impl FitnessScore {
    /// Score of an unmutated organism.
    pub const fn baseline() -> Self {
        Self {
            value: BASELINE_FITNESS,
            clamped: false,
        }
    }

    pub fn is_lethal(&self) -> bool {
        self.value == LETHAL_FITNESS
    }
}

impl Default for FitnessScore {
    fn default() -> Self {
        Self::baseline()
    }
}

impl fmt::Display for FitnessScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Multiplicative contribution of a single effect, clamped at zero.
#[inline]
fn factor(effect: f64) -> (f64, bool) {
    let raw = 1.0 + effect;
    if raw.is_nan() || raw < 0.0 {
        (LETHAL_FITNESS, true)
    } else {
        (raw, false)
    }
}

/// Clamp a product into `[0, f64::MAX]`.
#[inline]
fn clamp_product(product: f64) -> (f64, bool) {
    if product.is_nan() || product < 0.0 {
        (LETHAL_FITNESS, true)
    } else if product == f64::INFINITY {
        (f64::MAX, true)
    } else {
        (product, false)
    }
}

/// Score a sequence of raw effect values.
pub fn score_effects<I>(effects: I) -> FitnessScore
where
    I: IntoIterator<Item = f64>,
{
    let mut product = BASELINE_FITNESS;
    let mut clamped = false;
    for effect in effects {
        let (f, c) = factor(effect);
        clamped |= c;
        product *= f;
    }
    let (value, c) = clamp_product(product);
    FitnessScore {
        value,
        clamped: clamped || c,
    }
}

/// Score a mutation log: `1.0 * Π max(0, 1 + e)` over every event effect.
///
/// The zero clamp applies to each factor, not only to the final product. An
/// even number of effects below `-1` therefore scores `0.0`, where the bare
/// product `Π (1 + e)` would come out positive (`-1.5, -1.5` gives `0.0`,
/// not `2.25`). Any lethal mutation keeps an organism lethal.
///
/// Pure and allocation-free, so it can run concurrently on disjoint
/// organisms without coordination.
pub fn score<E>(log: &[E]) -> FitnessScore
where
    E: AsRef<MutationEvent>,
{
    score_effects(log.iter().map(|event| event.as_ref().effect))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_empty_log_is_baseline() {
        let score = score_effects(std::iter::empty());
        assert_eq!(score, FitnessScore::baseline());
    }

    #[test]
    fn test_product_of_effects() {
        let score = score_effects([-0.5, 0.0, 0.1]);
        assert!(approx_eq(score.value, 0.5 * 1.1, 1e-12));
        assert!(!score.clamped);
    }

    #[test]
    fn test_neutral_effects_keep_exact_one() {
        let score = score_effects([0.0; 32]);
        assert_eq!(score.value, 1.0);
    }

    #[test]
    fn test_lethal_effect_clamps_to_zero() {
        let score = score_effects([-1.5]);
        assert_eq!(score.value, 0.0);
        assert!(score.clamped);
        assert!(score.is_lethal());
    }

    #[test]
    fn test_two_lethal_effects_stay_lethal() {
        // (1 - 2.5) * (1 - 2.5) would be positive without the per-factor clamp
        let score = score_effects([-2.5, -2.5]);
        assert_eq!(score.value, 0.0);
    }

    #[test]
    fn test_score_clamps_each_factor_not_the_product() {
        let log = [-1.5, -1.5].map(|effect| MutationEvent {
            site: 0,
            kind: crate::evolution::MutationKind::Substitution,
            ref_symbol: crate::base::Nucleotide::A,
            alt_symbol: Some(crate::base::Nucleotide::C),
            effect,
        });
        let score = score(&log);
        assert_eq!(score.value, 0.0);
        assert!(score.clamped);
    }

    #[test]
    fn test_effect_of_exactly_minus_one_is_lethal_without_clamp() {
        let score = score_effects([-1.0]);
        assert_eq!(score.value, 0.0);
        assert!(!score.clamped);
    }

    #[test]
    fn test_nan_effect_is_clamped() {
        let score = score_effects([f64::NAN]);
        assert_eq!(score.value, 0.0);
        assert!(score.clamped);
    }

    #[test]
    fn test_overflow_is_clamped_to_max() {
        let score = score_effects([f64::MAX, f64::MAX]);
        assert_eq!(score.value, f64::MAX);
        assert!(score.clamped);
        assert!(score.value.is_finite());
    }
}
