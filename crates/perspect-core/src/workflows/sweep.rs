use serde::Serialize;
use tracing::{info, instrument};

use crate::core::invariants::{Invariants, Param};
use crate::core::scoring;
use crate::engine::error::EngineError;

/// What to sweep: one invariant over `[0, 1]` with the others held at `base`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepConfig {
    pub param: Param,
    /// Number of intervals; the sweep yields `steps + 1` samples.
    pub steps: usize,
    pub base: Invariants,
}

/// One sample along the swept axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    /// The swept invariant's value at this sample.
    pub value: f64,
    pub density: f64,
    /// The analytic partial ∂D/∂(swept invariant) at this sample.
    pub d_value: f64,
}

/// Samples density and its partial derivative along one invariant axis.
#[instrument(skip_all, name = "sweep_workflow")]
pub fn run(config: &SweepConfig) -> Result<Vec<SweepPoint>, EngineError> {
    if config.steps == 0 {
        return Err(EngineError::Simulation {
            reason: "sweep needs at least one step".to_string(),
        });
    }

    let base = config.base.sanitized();
    info!(
        param = config.param.name(),
        steps = config.steps,
        "Sweeping invariant axis."
    );

    let mut points = Vec::with_capacity(config.steps + 1);
    for step in 0..=config.steps {
        let value = step as f64 / config.steps as f64;
        let mut sample = base;
        sample.set(config.param, value);
        let density = scoring::score(&sample).density;
        let d_value = scoring::sensitivity(&sample).as_array()[config.param.index()];
        points.push(SweepPoint {
            value,
            density,
            d_value,
        });
    }

    Ok(points)
}
