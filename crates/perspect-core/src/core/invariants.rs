use nalgebra::Vector5;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors reported when constructing an [`Invariants`] vector from raw values.
#[derive(Debug, Error, PartialEq)]
pub enum InvariantError {
    /// A component was NaN or infinite.
    #[error("Invariant '{name}' is not a finite number")]
    NotFinite {
        /// The name of the offending component.
        name: &'static str,
    },
    /// A component fell outside the meaningful `[0, 1]` range.
    #[error("Invariant '{name}' is out of range: {value} (expected 0.0..=1.0)")]
    OutOfRange {
        /// The name of the offending component.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Error returned when a string does not name one of the five invariants.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown invariant '{0}' (expected phi, tau, rho, entropy, or kappa)")]
pub struct ParseParamError(pub String);

/// Identifies a single component of the invariant vector.
///
/// Used wherever a caller selects one invariant by name: parameter sweeps,
/// gradient reporting, and command-line argument parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Param {
    /// Integration (φ).
    Phi,
    /// Temporal depth (τ).
    Tau,
    /// Recursive binding (ρ).
    Rho,
    /// Entropy (H).
    Entropy,
    /// Coherence (κ).
    Kappa,
}

impl Param {
    /// All five components, in canonical (φ, τ, ρ, H, κ) order.
    pub const ALL: [Param; 5] = [
        Param::Phi,
        Param::Tau,
        Param::Rho,
        Param::Entropy,
        Param::Kappa,
    ];

    /// The lowercase identifier used in files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Param::Phi => "phi",
            Param::Tau => "tau",
            Param::Rho => "rho",
            Param::Entropy => "entropy",
            Param::Kappa => "kappa",
        }
    }

    /// Position of this component in canonical (φ, τ, ρ, H, κ) order, as
    /// used by [`Invariants::as_array`].
    pub fn index(&self) -> usize {
        match self {
            Param::Phi => 0,
            Param::Tau => 1,
            Param::Rho => 2,
            Param::Entropy => 3,
            Param::Kappa => 4,
        }
    }

    /// The conventional mathematical symbol for this component.
    pub fn symbol(&self) -> &'static str {
        match self {
            Param::Phi => "φ",
            Param::Tau => "τ",
            Param::Rho => "ρ",
            Param::Entropy => "H",
            Param::Kappa => "κ",
        }
    }

    /// Whether this component is one of the structural invariants (φ, τ, ρ)
    /// whose zero annihilates the density product.
    pub fn is_structural(&self) -> bool {
        matches!(self, Param::Phi | Param::Tau | Param::Rho)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Param {
    type Err = ParseParamError;

    /// Parses a component name. Case-insensitive; accepts the spelled-out
    /// name, the Greek symbol, or `h` for entropy.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "phi" | "φ" => Ok(Param::Phi),
            "tau" | "τ" => Ok(Param::Tau),
            "rho" | "ρ" => Ok(Param::Rho),
            "entropy" | "h" => Ok(Param::Entropy),
            "kappa" | "κ" => Ok(Param::Kappa),
            other => Err(ParseParamError(other.to_string())),
        }
    }
}

/// Clamps a raw value into the unit interval, collapsing NaN to `0.0`.
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// The five structural invariants of a system, each meaningful on `[0, 1]`.
///
/// This vector is the sole input of the density formula. The first three
/// components (φ, τ, ρ) are *structural*: the formula multiplies them
/// directly, so a zero in any of them collapses the score to exactly zero.
/// The last two (H, κ) shape the entropy modulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Invariants {
    /// Integration (φ): how unified the system's state space is.
    pub phi: f64,
    /// Temporal depth (τ): how far structure extends through time.
    pub tau: f64,
    /// Recursive binding (ρ): the degree to which states are bound to a
    /// self-model that itself shapes dynamics.
    pub rho: f64,
    /// Entropy (H): disorder of the current state distribution.
    pub entropy: f64,
    /// Coherence (κ): global order co-existing with high entropy.
    pub kappa: f64,
}

impl Invariants {
    /// The reference operating point used throughout documentation and
    /// calibration checks: a mid-range waking profile scoring ≈ 0.241.
    pub const BASELINE: Invariants = Invariants {
        phi: 0.8,
        tau: 0.75,
        rho: 0.65,
        entropy: 0.5,
        kappa: 0.65,
    };

    /// Creates a vector from raw values, rejecting anything outside `[0, 1]`.
    ///
    /// This is the strict entry point for data that claims to already be in
    /// range (catalog files, configuration). Interactive inputs should prefer
    /// [`Invariants::clamped`], which coerces instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError::NotFinite`] for NaN or infinite components
    /// and [`InvariantError::OutOfRange`] for finite components outside the
    /// unit interval. The first offending component (in φ, τ, ρ, H, κ order)
    /// is reported.
    pub fn new(
        phi: f64,
        tau: f64,
        rho: f64,
        entropy: f64,
        kappa: f64,
    ) -> Result<Self, InvariantError> {
        let candidate = Self {
            phi,
            tau,
            rho,
            entropy,
            kappa,
        };
        candidate.validate()?;
        Ok(candidate)
    }

    /// Creates a vector from raw values, clamping each component into
    /// `[0, 1]` and collapsing non-finite values to `0.0`.
    pub fn clamped(phi: f64, tau: f64, rho: f64, entropy: f64, kappa: f64) -> Self {
        Self {
            phi,
            tau,
            rho,
            entropy,
            kappa,
        }
        .sanitized()
    }

    /// Returns a copy with every component clamped into `[0, 1]` and
    /// non-finite values collapsed to `0.0`.
    ///
    /// Every scoring entry point sanitizes its input through this method, so
    /// no caller can push NaN or infinities into the math.
    pub fn sanitized(&self) -> Self {
        Self {
            phi: clamp_unit(self.phi),
            tau: clamp_unit(self.tau),
            rho: clamp_unit(self.rho),
            entropy: clamp_unit(self.entropy),
            kappa: clamp_unit(self.kappa),
        }
    }

    /// Checks every component against the strict constructor's rules.
    pub fn validate(&self) -> Result<(), InvariantError> {
        for param in Param::ALL {
            let value = self.get(param);
            if !value.is_finite() {
                return Err(InvariantError::NotFinite { name: param.name() });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(InvariantError::OutOfRange {
                    name: param.name(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Reads a single component by name.
    pub fn get(&self, param: Param) -> f64 {
        match param {
            Param::Phi => self.phi,
            Param::Tau => self.tau,
            Param::Rho => self.rho,
            Param::Entropy => self.entropy,
            Param::Kappa => self.kappa,
        }
    }

    /// Writes a single component by name.
    pub fn set(&mut self, param: Param, value: f64) {
        match param {
            Param::Phi => self.phi = value,
            Param::Tau => self.tau = value,
            Param::Rho => self.rho = value,
            Param::Entropy => self.entropy = value,
            Param::Kappa => self.kappa = value,
        }
    }

    /// The components as an array in canonical (φ, τ, ρ, H, κ) order.
    pub fn as_array(&self) -> [f64; 5] {
        [self.phi, self.tau, self.rho, self.entropy, self.kappa]
    }

    /// The components as a fixed-size nalgebra vector.
    pub fn to_vector(&self) -> Vector5<f64> {
        Vector5::from(self.as_array())
    }

    /// Unweighted Euclidean distance to another vector in 5-D invariant
    /// space. The basis for all nearest-match queries.
    pub fn distance(&self, other: &Invariants) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }

    /// Whether any structural invariant (φ, τ, ρ) is exactly zero, which
    /// forces the density to exactly zero.
    pub fn has_structural_zero(&self) -> bool {
        self.phi == 0.0 || self.tau == 0.0 || self.rho == 0.0
    }
}
