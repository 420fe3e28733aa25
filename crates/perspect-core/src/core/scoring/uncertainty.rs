use super::density::score;
use super::sensitivity::sensitivity;
use crate::core::invariants::{Invariants, clamp_unit};
use serde::Serialize;

/// Default one-sigma uncertainty assumed on every invariant.
pub const DEFAULT_PARAM_UNCERTAINTY: f64 = 0.05;

/// A confidence band around a density score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UncertaintyEnvelope {
    /// Propagated one-sigma uncertainty on D.
    pub sigma: f64,
    /// Lower edge of the band, clamped to `[0, 1]`.
    pub d_min: f64,
    /// Upper edge of the band, clamped to `[0, 1]`.
    pub d_max: f64,
}

/// Propagates a uniform per-invariant uncertainty through the density formula.
///
/// This is first-order (linear) error propagation:
///
/// ```text
/// σ = √( Σᵢ (∂D/∂xᵢ)² · u² ) = u · ‖∇D‖
/// ```
///
/// with the same uncertainty `u` assumed on all five invariants. Being a
/// linearization, the band under-covers where the formula is strongly curved
/// (most notably near H = 0, where the √-penalty bends sharply); treat it as
/// a first-order estimate, not a guaranteed interval.
///
/// Negative `param_uncertainty` is taken by absolute value and a non-finite
/// one collapses to zero, so the envelope always satisfies
/// `d_min ≤ D ≤ d_max` with both edges inside `[0, 1]`.
pub fn propagate(invariants: &Invariants, param_uncertainty: f64) -> UncertaintyEnvelope {
    let u = if param_uncertainty.is_finite() {
        param_uncertainty.abs()
    } else {
        0.0
    };

    let density = score(invariants).density;
    let sigma = u * sensitivity(invariants).magnitude();

    UncertaintyEnvelope {
        sigma,
        d_min: clamp_unit(density - sigma),
        d_max: clamp_unit(density + sigma),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn zero_uncertainty_collapses_the_band() {
        let envelope = propagate(&Invariants::BASELINE, 0.0);
        let density = score(&Invariants::BASELINE).density;
        assert_eq!(envelope.sigma, 0.0);
        assert!(f64_approx_equal(envelope.d_min, density));
        assert!(f64_approx_equal(envelope.d_max, density));
    }

    #[test]
    fn band_always_contains_the_score() {
        let steps = [0.0, 0.25, 0.5, 0.75, 1.0];
        for phi in steps {
            for entropy in steps {
                for kappa in steps {
                    let inv = Invariants::clamped(phi, 0.6, 0.4, entropy, kappa);
                    let density = score(&inv).density;
                    let envelope = propagate(&inv, DEFAULT_PARAM_UNCERTAINTY);
                    assert!(envelope.d_min <= density + TOLERANCE);
                    assert!(envelope.d_max >= density - TOLERANCE);
                    assert!((0.0..=1.0).contains(&envelope.d_min));
                    assert!((0.0..=1.0).contains(&envelope.d_max));
                }
            }
        }
    }

    #[test]
    fn sigma_equals_uncertainty_times_gradient_norm() {
        let inv = Invariants::BASELINE;
        let envelope = propagate(&inv, 0.05);
        assert!(f64_approx_equal(
            envelope.sigma,
            0.05 * sensitivity(&inv).magnitude()
        ));
    }

    #[test]
    fn sigma_scales_linearly_with_uncertainty() {
        let inv = Invariants::BASELINE;
        let narrow = propagate(&inv, 0.05);
        let wide = propagate(&inv, 0.10);
        assert!(f64_approx_equal(wide.sigma, 2.0 * narrow.sigma));
    }

    #[test]
    fn band_clamps_at_the_range_ends() {
        // D = 1 exactly; the upper edge cannot exceed it.
        let top = propagate(&Invariants::clamped(1.0, 1.0, 1.0, 0.0, 0.5), 0.2);
        assert_eq!(top.d_max, 1.0);

        // D = 0 exactly; the lower edge cannot go below it.
        let bottom = propagate(&Invariants::clamped(0.0, 0.9, 0.9, 0.5, 0.5), 0.2);
        assert_eq!(bottom.d_min, 0.0);
    }

    #[test]
    fn negative_uncertainty_is_taken_by_absolute_value() {
        let inv = Invariants::BASELINE;
        assert_eq!(propagate(&inv, -0.05), propagate(&inv, 0.05));
    }

    #[test]
    fn non_finite_uncertainty_collapses_to_zero() {
        let envelope = propagate(&Invariants::BASELINE, f64::NAN);
        assert_eq!(envelope.sigma, 0.0);
        assert!(envelope.d_min.is_finite());
        assert!(envelope.d_max.is_finite());
    }
}
