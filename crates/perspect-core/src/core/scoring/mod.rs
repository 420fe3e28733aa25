//! # Scoring Module
//!
//! This module implements the perspectival density formula and its derived
//! quantities: the decomposed score itself, the exact analytic gradient, and
//! a first-order uncertainty envelope.
//!
//! ## Overview
//!
//! Density condenses the five structural invariants into one bounded figure:
//!
//! ```text
//! D = φ · τ · ρ · [(1 − √H) + H · κ]
//! ```
//!
//! The structural product φ·τ·ρ gates everything; the bracketed entropy
//! modulator first penalizes disorder (1 − √H) and then lets coherent
//! disorder buy part of the score back (H·κ). All inputs are sanitized into
//! `[0, 1]` before any math runs, and every output is finite.
//!
//! ## Key Components
//!
//! - [`density`] - The formula, its intermediates, interpretations, and warnings
//! - [`sensitivity`] - Exact partial derivatives of D with finite boundary behavior
//! - [`uncertainty`] - First-order propagation of uniform parameter uncertainty
//!
//! ## Usage
//!
//! ```ignore
//! use perspect::core::invariants::Invariants;
//! use perspect::core::scoring;
//!
//! let result = scoring::score(&Invariants::BASELINE);
//! let gradient = scoring::sensitivity(&Invariants::BASELINE);
//! ```

pub mod density;
pub mod sensitivity;
pub mod uncertainty;

pub use density::{Interpretation, ScoreResult, Warning, score};
pub use sensitivity::{Sensitivity, sensitivity};
pub use uncertainty::{DEFAULT_PARAM_UNCERTAINTY, UncertaintyEnvelope, propagate};
