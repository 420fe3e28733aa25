//! # Perspect Core Library
//!
//! A deterministic engine for scoring *perspectival density* — a single
//! bounded figure of merit computed from five structural invariants of a
//! system (integration, temporal depth, recursive binding, entropy, and
//! coherence).
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   (`Invariants`, `Preset`), the pure mathematics of the density formula
//!   (`scoring`), and the reference catalog with its nearest-match queries
//!   (`catalog`).
//!
//! - **[`engine`]: The Logic Core.** This stateful layer animates vectors over
//!   time. It includes the deterministic drift field, the randomly scheduled
//!   burst process, the frame-by-frame perturbation driver, and the cancelable
//!   animation loop with injectable time sources.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing
//!   layer. It ties the `engine` and `core` together to execute complete
//!   procedures: one-shot evaluation reports, catalog spectra, parameter
//!   sweeps, and finite deterministic simulations.

pub mod core;
pub mod engine;
pub mod workflows;
