//! # Workflows Module
//!
//! High-level entry points that orchestrate the core scoring functions and
//! the perturbation engine into complete, loggable operations.
//!
//! ## Overview
//!
//! Workflows are what callers of the library actually invoke. Each one
//! validates its configuration, runs a full pipeline over the core and engine
//! layers, and returns an owned, serializable result — no borrowed catalog
//! references or live engine state leak out.
//!
//! ## Architecture
//!
//! One module per operation:
//!
//! - **Evaluation** ([`evaluate`]) - Score one vector and situate it in the
//!   preset catalog: density breakdown, gradient, uncertainty band, and the
//!   closest reference profiles.
//! - **Spectrum** ([`spectrum`]) - Rank catalog presets by density.
//! - **Sweep** ([`sweep`]) - Sample density and its partial derivative along
//!   one invariant axis.
//! - **Simulation** ([`simulate`]) - Run the perturbation driver for a fixed
//!   duration at a fixed timestep and summarize the trajectory.

pub mod evaluate;
pub mod simulate;
pub mod spectrum;
pub mod sweep;
