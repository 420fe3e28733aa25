use crate::core::invariants::{Invariants, Param};
use nalgebra::Vector5;
use serde::Serialize;

/// The exact gradient of the density formula at one point in invariant space.
///
/// Each field is the partial derivative of D with respect to one component,
/// evaluated analytically (no finite differences). Magnitudes tell which
/// slider would move the score fastest; signs tell in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sensitivity {
    /// ∂D/∂φ = τ·ρ·M.
    pub d_phi: f64,
    /// ∂D/∂τ = φ·ρ·M.
    pub d_tau: f64,
    /// ∂D/∂ρ = φ·τ·M.
    pub d_rho: f64,
    /// ∂D/∂H = φ·τ·ρ·(κ − 1/(2√H)), with the bracket replaced by κ at H = 0.
    pub d_entropy: f64,
    /// ∂D/∂κ = φ·τ·ρ·H.
    pub d_kappa: f64,
}

impl Sensitivity {
    /// The partials as an array in canonical (φ, τ, ρ, H, κ) order.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.d_phi,
            self.d_tau,
            self.d_rho,
            self.d_entropy,
            self.d_kappa,
        ]
    }

    /// The partials as a fixed-size nalgebra vector.
    pub fn to_vector(&self) -> Vector5<f64> {
        Vector5::from(self.as_array())
    }

    /// Euclidean norm of the gradient.
    pub fn magnitude(&self) -> f64 {
        self.to_vector().norm()
    }

    /// The component with the largest absolute partial. Ties resolve to the
    /// earlier component in canonical order.
    pub fn dominant(&self) -> Param {
        let values = self.as_array();
        let mut best = Param::ALL[0];
        let mut best_abs = values[0].abs();
        for (param, value) in Param::ALL.into_iter().zip(values).skip(1) {
            if value.abs() > best_abs {
                best = param;
                best_abs = value.abs();
            }
        }
        best
    }
}

/// Computes the analytic gradient of D = φ·τ·ρ·[(1 − √H) + H·κ].
///
/// The input is sanitized exactly as in [`score`](super::density::score), so
/// the gradient always describes the same point the score was computed at.
///
/// The entropy partial contains 1/(2√H), which diverges as H → 0. At the
/// H = 0 boundary the √-penalty contribution is dropped and the bracketed
/// term collapses to κ alone, keeping the partial finite everywhere in
/// range. Every returned component is guaranteed finite.
pub fn sensitivity(invariants: &Invariants) -> Sensitivity {
    let inv = invariants.sanitized();

    let modulator = (1.0 - inv.entropy.sqrt()) + inv.entropy * inv.kappa;
    let structural_base = inv.phi * inv.tau * inv.rho;

    let entropy_bracket = if inv.entropy == 0.0 {
        inv.kappa
    } else {
        inv.kappa - 1.0 / (2.0 * inv.entropy.sqrt())
    };

    Sensitivity {
        d_phi: inv.tau * inv.rho * modulator,
        d_tau: inv.phi * inv.rho * modulator,
        d_rho: inv.phi * inv.tau * modulator,
        d_entropy: structural_base * entropy_bracket,
        d_kappa: structural_base * inv.entropy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scoring::density::score;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn gradient_is_finite_at_entropy_zero() {
        let inv = Invariants::clamped(0.8, 0.75, 0.65, 0.0, 0.65);
        let grad = sensitivity(&inv);
        for value in grad.as_array() {
            assert!(value.is_finite());
        }
        // At H = 0 the bracket collapses to kappa alone.
        assert!(f64_approx_equal(grad.d_entropy, 0.8 * 0.75 * 0.65 * 0.65));
    }

    #[test]
    fn gradient_is_finite_at_entropy_one() {
        let inv = Invariants::clamped(0.8, 0.75, 0.65, 1.0, 0.65);
        let grad = sensitivity(&inv);
        assert!(f64_approx_equal(
            grad.d_entropy,
            0.8 * 0.75 * 0.65 * (0.65 - 0.5)
        ));
    }

    #[test]
    fn gradient_is_finite_across_grid_including_boundaries() {
        let steps = [0.0, 0.25, 0.5, 0.75, 1.0];
        for phi in steps {
            for tau in steps {
                for entropy in steps {
                    for kappa in steps {
                        let inv = Invariants::clamped(phi, tau, 0.5, entropy, kappa);
                        for value in sensitivity(&inv).as_array() {
                            assert!(value.is_finite());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn structural_partials_match_closed_form_at_baseline() {
        let inv = Invariants::BASELINE;
        let grad = sensitivity(&inv);
        let modulator = score(&inv).entropy_modulator;
        assert!(f64_approx_equal(grad.d_phi, 0.75 * 0.65 * modulator));
        assert!(f64_approx_equal(grad.d_tau, 0.8 * 0.65 * modulator));
        assert!(f64_approx_equal(grad.d_rho, 0.8 * 0.75 * modulator));
        assert!(f64_approx_equal(grad.d_kappa, 0.8 * 0.75 * 0.65 * 0.5));
    }

    #[test]
    fn gradient_matches_central_finite_differences_at_interior_points() {
        let points = [
            Invariants::BASELINE,
            Invariants::clamped(0.3, 0.6, 0.4, 0.7, 0.2),
            Invariants::clamped(0.7, 0.2, 0.8, 0.25, 0.85),
            Invariants::clamped(0.5, 0.5, 0.5, 0.5, 0.5),
        ];
        let h = 1e-6;
        for inv in points {
            let grad = sensitivity(&inv);
            for (param, analytic) in Param::ALL.into_iter().zip(grad.as_array()) {
                let mut forward = inv;
                forward.set(param, inv.get(param) + h);
                let mut backward = inv;
                backward.set(param, inv.get(param) - h);
                let numeric = (score(&forward).density - score(&backward).density) / (2.0 * h);
                assert!(
                    (analytic - numeric).abs() < 1e-5,
                    "{param}: analytic {analytic} vs numeric {numeric}"
                );
            }
        }
    }

    #[test]
    fn entropy_partial_is_negative_where_penalty_dominates() {
        // Below the recovery crossover the √-penalty always wins.
        let grad = sensitivity(&Invariants::clamped(0.8, 0.8, 0.8, 0.25, 0.3));
        assert!(grad.d_entropy < 0.0);
    }

    #[test]
    fn gradient_vanishes_when_two_structural_invariants_are_zero() {
        let grad = sensitivity(&Invariants::clamped(0.0, 0.0, 0.9, 0.5, 0.5));
        for value in grad.as_array() {
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn dominant_component_at_baseline_is_binding() {
        let grad = sensitivity(&Invariants::BASELINE);
        assert_eq!(grad.dominant(), Param::Rho);
        assert!(grad.magnitude() > 0.0);
    }

    #[test]
    fn non_finite_inputs_are_sanitized_before_differentiation() {
        let inv = Invariants {
            phi: f64::NAN,
            tau: 0.5,
            rho: 0.5,
            entropy: f64::INFINITY,
            kappa: 0.5,
        };
        for value in sensitivity(&inv).as_array() {
            assert!(value.is_finite());
        }
    }
}
