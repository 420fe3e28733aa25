//! # Perturbation Driver
//!
//! ## Overview
//!
//! The driver owns a resting invariant vector and, on every tick, layers the
//! deterministic drift field and the optional burst process on top of it,
//! re-clamps the result, and scores it. The output is a [`Frame`]: the
//! displayed vector together with its density, gradient, and uncertainty
//! envelope, ready for rendering or logging.
//!
//! ## Determinism
//!
//! The driver never consults a clock. Callers feed it frame deltas, so a
//! seeded driver replays the exact same frame sequence for the same deltas.
//! Wall-clock integration lives one layer up, in the animation loop.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use super::burst::BurstProcess;
use super::config::DriverConfig;
use super::drift::DriftField;
use crate::core::invariants::{Invariants, Param, clamp_unit};
use crate::core::scoring::{self, ScoreResult, Sensitivity, UncertaintyEnvelope};

/// Fraction of the burst level applied to τ; φ receives the full level.
const BURST_TAU_SHARE: f64 = 0.75;

/// One tick of the driver: the displayed vector and everything derived
/// from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Seconds of simulated time since the driver started.
    pub elapsed: f64,
    /// The perturbed, re-clamped vector on display this tick.
    pub invariants: Invariants,
    /// Full scoring breakdown for [`Frame::invariants`].
    pub score: ScoreResult,
    /// Density gradient at [`Frame::invariants`].
    pub sensitivity: Sensitivity,
    /// Uncertainty envelope around the density.
    pub uncertainty: UncertaintyEnvelope,
}

/// Stateful generator of perturbed, scored frames around a resting vector.
#[derive(Debug)]
pub struct PerturbationDriver {
    base: Invariants,
    config: DriverConfig,
    drift: DriftField,
    bursts: Option<BurstProcess>,
    rng: StdRng,
    elapsed: f64,
}

impl PerturbationDriver {
    /// Creates a driver at rest around `base`.
    ///
    /// The base vector is sanitized on entry. With a configured seed the
    /// burst schedule is reproducible; without one it is drawn from entropy.
    pub fn new(base: Invariants, config: DriverConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let drift = DriftField::new(
            config.drift_amplitude,
            config.breath_amplitude,
            config.breath_frequency,
        );
        let bursts = config
            .bursts
            .map(|burst_config| BurstProcess::new(burst_config, &mut rng));
        Self {
            base: base.sanitized(),
            config,
            drift,
            bursts,
            rng,
            elapsed: 0.0,
        }
    }

    /// The resting vector the driver perturbs around.
    pub fn base(&self) -> Invariants {
        self.base
    }

    /// Seconds of simulated time accumulated so far.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Replaces the resting vector; the next frame perturbs around it.
    pub fn set_base(&mut self, base: Invariants) {
        self.base = base.sanitized();
    }

    /// Advances simulated time by `dt` seconds and produces the next frame.
    ///
    /// Negative or non-finite deltas are treated as zero, so a misbehaving
    /// clock can stall the animation but never rewind it.
    pub fn advance(&mut self, dt: f64) -> Frame {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;
        let t = self.elapsed;

        let burst_level = match &mut self.bursts {
            Some(process) => process.advance(t, dt, &mut self.rng),
            None => 0.0,
        };

        let mut displayed = self.base;
        for param in Param::ALL {
            let base_value = self.base.get(param);
            // A structural invariant resting at exactly zero is a categorical
            // statement, not a small number; it must not wobble.
            if param.is_structural() && base_value == 0.0 {
                displayed.set(param, 0.0);
                continue;
            }
            let mut value = base_value + self.drift.offset(param, t);
            value += match param {
                Param::Phi => burst_level,
                Param::Tau => burst_level * BURST_TAU_SHARE,
                _ => 0.0,
            };
            displayed.set(param, clamp_unit(value));
        }

        let score = scoring::score(&displayed);
        let sensitivity = scoring::sensitivity(&displayed);
        let uncertainty = scoring::propagate(&displayed, self.config.param_uncertainty);

        Frame {
            elapsed: t,
            invariants: displayed,
            score,
            sensitivity,
            uncertainty,
        }
    }
}
