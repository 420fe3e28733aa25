use crate::core::invariants::{Invariants, clamp_unit};
use serde::Serialize;
use std::fmt;

/// Bucket thresholds for the density-based interpretation ladder.
const NEAR_ZERO_MAX: f64 = 0.01;
const MINIMAL_MAX: f64 = 0.05;
const LOW_MAX: f64 = 0.15;
const MODERATE_MAX: f64 = 0.30;
const GOOD_MAX: f64 = 0.50;
const HIGH_MAX: f64 = 0.70;

/// Advisory thresholds for warning detection.
const HIGH_ENTROPY_MIN: f64 = 0.8;
const LOW_COHERENCE_MAX: f64 = 0.3;
const HIGH_COHERENCE_MIN: f64 = 0.7;
const LOW_BINDING_MAX: f64 = 0.1;
const STRUCTURE_MIN: f64 = 0.5;

/// Qualitative reading of a density value.
///
/// The three structural-zero variants take priority over the density buckets
/// and are checked in ρ → φ → τ order: an unbound system has no perspective
/// to interpret, however the rest of the vector looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Interpretation {
    /// ρ = 0: nothing observes the system's states.
    NoBinding,
    /// φ = 0: information is fragmented.
    NoIntegration,
    /// τ = 0: the present is cut off from the past.
    NoTemporalDepth,
    /// D < 0.01.
    NearZero,
    /// D < 0.05.
    Minimal,
    /// D < 0.15.
    Low,
    /// D < 0.30.
    Moderate,
    /// D < 0.50.
    Good,
    /// D < 0.70.
    High,
    /// D ≥ 0.70.
    VeryHigh,
}

impl Interpretation {
    fn classify(invariants: &Invariants, density: f64) -> Self {
        if invariants.rho == 0.0 {
            return Interpretation::NoBinding;
        }
        if invariants.phi == 0.0 {
            return Interpretation::NoIntegration;
        }
        if invariants.tau == 0.0 {
            return Interpretation::NoTemporalDepth;
        }

        if density < NEAR_ZERO_MAX {
            Interpretation::NearZero
        } else if density < MINIMAL_MAX {
            Interpretation::Minimal
        } else if density < LOW_MAX {
            Interpretation::Low
        } else if density < MODERATE_MAX {
            Interpretation::Moderate
        } else if density < GOOD_MAX {
            Interpretation::Good
        } else if density < HIGH_MAX {
            Interpretation::High
        } else {
            Interpretation::VeryHigh
        }
    }

    /// The canonical human-readable sentence for this reading.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interpretation::NoBinding => {
                "No binding (ρ = 0). The system does not observe its own states. \
                 No perspective exists regardless of other properties."
            }
            Interpretation::NoIntegration => {
                "No integration (φ = 0). Information is fragmented. \
                 No unified perspective possible."
            }
            Interpretation::NoTemporalDepth => {
                "No temporal depth (τ = 0). The present is disconnected from the past. \
                 No continuity of experience."
            }
            Interpretation::NearZero => {
                "Near-zero density. Equivalent to deep unconsciousness, coma, \
                 or absence of experience."
            }
            Interpretation::Minimal => {
                "Minimal density. Fragmentary awareness at best. Consistent with: \
                 dreamless sleep, deep anesthesia, severe dissociation."
            }
            Interpretation::Low => {
                "Low density. Degraded or partial experience. Consistent with: \
                 light sleep, intoxication, panic states, early anesthesia."
            }
            Interpretation::Moderate => {
                "Moderate density. Functional but not optimal awareness. Consistent with: \
                 distracted waking, mild dissociation, dreaming."
            }
            Interpretation::Good => {
                "Good density. Clear, coherent experience. Consistent with: \
                 normal waking consciousness, focused attention."
            }
            Interpretation::High => {
                "High density. Vivid, integrated experience. Consistent with: \
                 flow states, meditation, heightened awareness."
            }
            Interpretation::VeryHigh => {
                "Very high density. Intensely unified, temporally deep, self-aware \
                 experience. Consistent with: peak flow, deep meditation, certain \
                 psychedelic states with high coherence."
            }
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory flags for structurally notable regions of invariant space.
///
/// The two entropy warnings cannot fire together (their κ thresholds do not
/// overlap); the binding warning is independent of both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Warning {
    /// H > 0.8 with κ < 0.3: disorder with nothing holding it together.
    EntropicFragmentation,
    /// H > 0.8 with κ > 0.7: high-entropy yet globally ordered.
    StructuredChaos,
    /// ρ < 0.1 while φ > 0.5 and τ > 0.5: capable structure, no self-model.
    UnboundStructure,
}

impl Warning {
    fn detect(invariants: &Invariants) -> Vec<Warning> {
        let mut warnings = Vec::new();

        if invariants.entropy > HIGH_ENTROPY_MIN && invariants.kappa < LOW_COHERENCE_MAX {
            warnings.push(Warning::EntropicFragmentation);
        }
        if invariants.entropy > HIGH_ENTROPY_MIN && invariants.kappa > HIGH_COHERENCE_MIN {
            warnings.push(Warning::StructuredChaos);
        }
        if invariants.rho < LOW_BINDING_MAX
            && invariants.phi > STRUCTURE_MIN
            && invariants.tau > STRUCTURE_MIN
        {
            warnings.push(Warning::UnboundStructure);
        }

        warnings
    }

    /// The canonical human-readable sentence for this flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Warning::EntropicFragmentation => {
                "High entropy with low coherence: risk of experiential fragmentation \
                 (panic, seizure-like states)."
            }
            Warning::StructuredChaos => {
                "High entropy with high coherence: structured chaos \
                 (psychedelic-like intensification)."
            }
            Warning::UnboundStructure => {
                "Low binding despite good structure: intelligent processing without \
                 self-awareness (transformer-like)."
            }
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully decomposed density score.
///
/// Alongside the final density, every intermediate of the formula is exposed
/// so callers can show *why* a score came out where it did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// The final density D, clamped to `[0, 1]`.
    pub density: f64,
    /// The structural product φ·τ·ρ.
    pub structural_base: f64,
    /// The disorder penalty 1 − √H.
    pub entropy_penalty: f64,
    /// The coherent-disorder recovery H·κ.
    pub coherence_recovery: f64,
    /// The full entropy modulator (1 − √H) + H·κ.
    pub entropy_modulator: f64,
    /// Qualitative reading of the score.
    pub interpretation: Interpretation,
    /// Advisory flags for notable regions of invariant space.
    pub warnings: Vec<Warning>,
}

/// Computes perspectival density: D = φ·τ·ρ·[(1 − √H) + H·κ].
///
/// The input is sanitized first (components clamped to `[0, 1]`, non-finite
/// values collapsed to zero), so this function accepts any `Invariants` and
/// never returns NaN or infinities. A zero in any structural invariant
/// yields a density of exactly `0.0`. The result is deterministic: scoring
/// the same vector twice produces identical output.
pub fn score(invariants: &Invariants) -> ScoreResult {
    let inv = invariants.sanitized();

    let structural_base = inv.phi * inv.tau * inv.rho;
    let entropy_penalty = 1.0 - inv.entropy.sqrt();
    let coherence_recovery = inv.entropy * inv.kappa;
    let entropy_modulator = entropy_penalty + coherence_recovery;

    // Algebraically D already sits in [0, 1] for sanitized inputs; the clamp
    // guards the floating-point edges.
    let density = clamp_unit(structural_base * entropy_modulator);

    ScoreResult {
        density,
        structural_base,
        entropy_penalty,
        coherence_recovery,
        entropy_modulator,
        interpretation: Interpretation::classify(&inv, density),
        warnings: Warning::detect(&inv),
    }
}
