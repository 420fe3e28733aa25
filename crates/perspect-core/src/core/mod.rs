//! # Core Module
//!
//! This module provides the fundamental building blocks for perspectival
//! density scoring, serving as the stateless computational core of the
//! library.
//!
//! ## Overview
//!
//! The core module implements the essential data structures and closed-form
//! mathematics required to score a system's structure: the five-invariant
//! parameter vector, the density formula with its decomposition, the analytic
//! sensitivity gradient, first-order uncertainty propagation, and a validated
//! reference catalog with nearest-match queries.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules that handle different
//! aspects of the scoring problem:
//!
//! - **Parameter Representation** ([`invariants`]) - The bounded five-invariant vector and its accessors
//! - **Density Mathematics** ([`scoring`]) - The density formula, gradient, and uncertainty envelope
//! - **Reference Knowledge** ([`catalog`]) - Curated preset profiles and nearest-match search
//!
//! ## Key Capabilities
//!
//! - **Defensively clamped scoring** that never emits NaN or infinities
//! - **Decomposed results** exposing every intermediate of the formula
//! - **Exact analytic gradients** with finite boundary behavior
//! - **First-order uncertainty envelopes** around every score
//! - **Fail-fast catalog validation** with deterministic nearest-match lookup

pub mod catalog;
pub mod invariants;
pub mod scoring;
