//! # Time Source Abstraction
//!
//! The perturbation engine never reads the wall clock directly. All elapsed
//! time flows through the [`TimeSource`] trait so that the animation loop can
//! run against real time in production and against a scripted clock in tests,
//! producing bit-identical frame sequences either way.

use std::time::{Duration, Instant};

/// A monotonic supplier of elapsed time.
///
/// Implementations report the time elapsed since their own origin. Successive
/// calls must never go backwards; the engine converts consecutive readings
/// into frame deltas and a negative delta would rewind the drift field.
pub trait TimeSource {
    /// Returns the elapsed time since this source's origin.
    ///
    /// Takes `&mut self` so that deterministic sources can advance their own
    /// internal state on every reading.
    fn now(&mut self) -> Duration;
}

/// Wall-clock time source backed by [`Instant`].
#[derive(Debug)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    /// Creates a source whose origin is the moment of the call.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

/// Scripted time source for tests and offline rendering.
///
/// The clock only moves when told to: either explicitly via
/// [`ManualTimeSource::advance`], or by a fixed `step` applied on every call
/// to [`TimeSource::now`] when constructed with
/// [`ManualTimeSource::with_step`].
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    elapsed: Duration,
    step: Duration,
}

impl ManualTimeSource {
    /// Creates a frozen clock at zero; advance it manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock that ticks forward by `step` on every reading.
    pub fn with_step(step: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            step,
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.elapsed += delta;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&mut self) -> Duration {
        self.elapsed += self.step;
        self.elapsed
    }
}
