//! # Engine Module
//!
//! ## Overview
//!
//! The stateful layer of the library. Where [`crate::core`] is a collection
//! of pure functions over invariant vectors, this module owns time, random
//! state, and configuration: it perturbs a resting vector frame by frame,
//! scores every frame, and pushes the results to callers either on demand or
//! from a background animation thread.
//!
//! ## Key Components
//!
//! - [`driver::PerturbationDriver`]: Layers drift and bursts over a base
//!   vector and scores the result each tick.
//! - [`drift::DriftField`] / [`burst::BurstProcess`]: The two perturbation
//!   sources, deterministic and stochastic respectively.
//! - [`animation`]: Wall-clock loop that feeds frames to a callback.
//! - [`config`]: Validated configuration types and their builders.
//! - [`clock`]: The time abstraction that keeps replays deterministic.

pub mod animation;
pub mod burst;
pub mod clock;
pub mod config;
pub mod drift;
pub mod driver;
pub mod error;

pub use animation::{AnimationHandle, FrameCallback, start_animation, start_animation_with_source};
pub use burst::{BurstConfig, BurstProcess};
pub use clock::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use config::{
    ConfigError, DriverConfig, DriverConfigBuilder, EvaluateConfig, SimulationConfig,
    SimulationConfigBuilder,
};
pub use drift::DriftField;
pub use driver::{Frame, PerturbationDriver};
pub use error::EngineError;
