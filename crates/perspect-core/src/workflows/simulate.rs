use serde::Serialize;
use tracing::{info, instrument};

use crate::engine::config::SimulationConfig;
use crate::engine::driver::{Frame, PerturbationDriver};
use crate::engine::error::EngineError;

/// Aggregate statistics over a finished fixed-step run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    /// Number of frames produced.
    pub frames: usize,
    /// Simulated seconds covered; `frames / frame_rate`.
    pub elapsed: f64,
    pub mean_density: f64,
    pub min_density: f64,
    pub max_density: f64,
    /// The last frame, or `None` for a zero-duration run.
    pub final_frame: Option<Frame>,
}

/// Runs the perturbation driver for a fixed duration at a fixed timestep.
///
/// The step is exactly `1 / frame_rate` and the run covers
/// `ceil(duration · frame_rate)` frames, so a seeded configuration replays
/// the same trajectory on every invocation regardless of host speed. Each
/// frame is handed to `observer` before it is folded into the summary.
#[instrument(skip_all, name = "simulation_workflow")]
pub fn run(
    config: &SimulationConfig,
    mut observer: Option<&mut dyn FnMut(&Frame)>,
) -> Result<SimulationSummary, EngineError> {
    config.validate()?;

    let dt = 1.0 / config.frame_rate;
    let total_frames = (config.duration_seconds * config.frame_rate).ceil() as usize;
    info!(
        frames = total_frames,
        frame_rate = config.frame_rate,
        "Starting fixed-step simulation."
    );

    let mut driver = PerturbationDriver::new(config.base, config.driver.clone());
    let mut density_sum = 0.0;
    let mut min_density = f64::INFINITY;
    let mut max_density = f64::NEG_INFINITY;
    let mut final_frame = None;

    for _ in 0..total_frames {
        let frame = driver.advance(dt);
        if let Some(callback) = observer.as_mut() {
            callback(&frame);
        }
        density_sum += frame.score.density;
        min_density = min_density.min(frame.score.density);
        max_density = max_density.max(frame.score.density);
        final_frame = Some(frame);
    }

    let summary = if total_frames == 0 {
        SimulationSummary {
            frames: 0,
            elapsed: 0.0,
            mean_density: 0.0,
            min_density: 0.0,
            max_density: 0.0,
            final_frame: None,
        }
    } else {
        SimulationSummary {
            frames: total_frames,
            elapsed: driver.elapsed(),
            mean_density: density_sum / total_frames as f64,
            min_density,
            max_density,
            final_frame,
        }
    };

    info!(
        mean_density = summary.mean_density,
        elapsed = summary.elapsed,
        "Simulation complete."
    );
    Ok(summary)
}
