//! # Animation Loop
//!
//! Runs a [`PerturbationDriver`] on a background thread at a fixed frame
//! rate, handing each produced [`Frame`] to a caller-supplied callback. The
//! loop measures real elapsed time between ticks through a [`TimeSource`], so
//! scheduler jitter stretches or squeezes the drift trajectory instead of
//! desynchronizing it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use super::clock::{SystemTimeSource, TimeSource};
use super::driver::{Frame, PerturbationDriver};
use super::error::EngineError;

/// Receives every frame the loop produces, in order, on the loop's thread.
pub type FrameCallback = Box<dyn FnMut(&Frame) + Send>;

/// Handle to a running animation loop.
///
/// Dropping the handle stops the loop and joins its thread, so an animation
/// never outlives the code that started it.
pub struct AnimationHandle {
    running: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl AnimationHandle {
    /// Whether the loop is still producing frames.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
            && self
                .worker
                .as_ref()
                .is_some_and(|worker| !worker.is_finished())
    }

    /// Stops the loop and waits for its thread to finish.
    pub fn cancel(mut self) {
        self.stop_and_join();
    }

    fn stop_and_join(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
            debug!("Animation loop stopped");
        }
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

/// Starts an animation loop against the wall clock.
pub fn start_animation(
    driver: PerturbationDriver,
    frame_rate: f64,
    callback: FrameCallback,
) -> Result<AnimationHandle, EngineError> {
    start_animation_with_source(driver, SystemTimeSource::new(), frame_rate, callback)
}

/// Starts an animation loop against an explicit time source.
///
/// Use a [`ManualTimeSource`](super::clock::ManualTimeSource) with a fixed
/// step to decouple frame deltas from scheduler jitter.
pub fn start_animation_with_source(
    mut driver: PerturbationDriver,
    mut source: impl TimeSource + Send + 'static,
    frame_rate: f64,
    mut callback: FrameCallback,
) -> Result<AnimationHandle, EngineError> {
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return Err(EngineError::Simulation {
            reason: format!("frame rate must be positive and finite, got {frame_rate}"),
        });
    }
    let interval = Duration::from_secs_f64(1.0 / frame_rate);
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);

    debug!(frame_rate, "Starting animation loop");
    let worker = std::thread::spawn(move || {
        let mut previous = source.now();
        while flag.load(Ordering::Relaxed) {
            std::thread::sleep(interval);
            if !flag.load(Ordering::Relaxed) {
                break;
            }
            let now = source.now();
            let dt = now.saturating_sub(previous).as_secs_f64();
            previous = now;
            let frame = driver.advance(dt);
            callback(&frame);
        }
    });

    Ok(AnimationHandle {
        running,
        worker: Some(worker),
    })
}
