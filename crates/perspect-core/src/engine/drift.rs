//! # Drift Field
//!
//! Smooth, deterministic micro-movement for the displayed invariant vector.
//! Each component is offset by a weighted stack of four sine waves at
//! incommensurate frequencies plus one slow "breathing" oscillation shared by
//! all components. The field is a pure function of elapsed time, so replaying
//! the same timestamps reproduces the same trajectory exactly.

use std::f64::consts::TAU;

use crate::core::invariants::Param;

/// The stacked waves, as `(frequency_hz, weight)` pairs. Frequencies are
/// mutually incommensurate so the combined signal never settles into a short
/// repeating loop; weights sum to 1.0, which makes the wave stack's peak
/// contribution equal to the configured amplitude.
const DRIFT_WAVES: [(f64, f64); 4] = [
    (0.23, 0.42),
    (0.41, 0.27),
    (0.67, 0.19),
    (1.13, 0.12),
];

/// Base phase per component, spaced evenly around the circle. Each wave `k`
/// applies the component phase scaled by `k + 1`, which decorrelates the five
/// trajectories instead of moving them in lockstep.
const PARAM_PHASES: [f64; 5] = [0.0, TAU / 5.0, 2.0 * TAU / 5.0, 3.0 * TAU / 5.0, 4.0 * TAU / 5.0];

/// Deterministic oscillatory offsets for the five invariants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftField {
    amplitude: f64,
    breath_amplitude: f64,
    breath_frequency: f64,
}

impl DriftField {
    /// Creates a field with the given wave-stack amplitude and breathing
    /// parameters. Amplitudes are absolute offsets in invariant units.
    pub fn new(amplitude: f64, breath_amplitude: f64, breath_frequency: f64) -> Self {
        Self {
            amplitude,
            breath_amplitude,
            breath_frequency,
        }
    }

    /// The signed offset for `param` at elapsed time `t` (seconds).
    pub fn offset(&self, param: Param, t: f64) -> f64 {
        let phase_base = PARAM_PHASES[param.index()];
        let mut wave_sum = 0.0;
        for (k, (frequency, weight)) in DRIFT_WAVES.iter().enumerate() {
            let phase = phase_base * (k as f64 + 1.0);
            wave_sum += weight * (TAU * frequency * t + phase).sin();
        }
        let breath = self.breath_amplitude * (TAU * self.breath_frequency * t).sin();
        self.amplitude * wave_sum + breath
    }

    /// The largest magnitude [`DriftField::offset`] can ever return.
    pub fn bound(&self) -> f64 {
        self.amplitude + self.breath_amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> DriftField {
        DriftField::new(0.02, 0.008, 0.05)
    }

    #[test]
    fn wave_weights_sum_to_one() {
        let total: f64 = DRIFT_WAVES.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn offset_is_deterministic() {
        let field = field();
        for param in Param::ALL {
            assert_eq!(field.offset(param, 3.7), field.offset(param, 3.7));
        }
    }

    #[test]
    fn offset_never_exceeds_bound() {
        let field = field();
        let bound = field.bound();
        for step in 0..2_000 {
            let t = step as f64 * 0.037;
            for param in Param::ALL {
                let offset = field.offset(param, t);
                assert!(
                    offset.abs() <= bound + 1e-12,
                    "offset {offset} at t={t} exceeds bound {bound}"
                );
            }
        }
    }

    #[test]
    fn zero_amplitudes_produce_no_offset() {
        let field = DriftField::new(0.0, 0.0, 0.05);
        for param in Param::ALL {
            assert_eq!(field.offset(param, 12.5), 0.0);
        }
    }

    #[test]
    fn components_move_out_of_phase() {
        let field = DriftField::new(0.02, 0.0, 0.05);
        let phi = field.offset(Param::Phi, 1.0);
        let tau = field.offset(Param::Tau, 1.0);
        let rho = field.offset(Param::Rho, 1.0);
        assert!((phi - tau).abs() > 1e-6);
        assert!((tau - rho).abs() > 1e-6);
    }

    #[test]
    fn breathing_component_is_shared() {
        let field = DriftField::new(0.0, 0.008, 0.05);
        let reference = field.offset(Param::Phi, 2.4);
        for param in Param::ALL {
            assert_eq!(field.offset(param, 2.4), reference);
        }
    }

    #[test]
    fn bound_combines_both_amplitudes() {
        let field = field();
        assert!((field.bound() - 0.028).abs() < 1e-12);
    }
}
