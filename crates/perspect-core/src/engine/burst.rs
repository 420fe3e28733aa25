//! # Burst Process
//!
//! Randomly timed positive impulses with exponential decay, layered on top of
//! the drift field to model transient surges of integration. An impulse
//! raises the process level instantly and the level then relaxes toward zero
//! with a sub-second time constant, so a surge visibly fades within a couple
//! of seconds.

use rand::Rng;

/// Decay time constant in seconds. After two seconds an undisturbed impulse
/// retains under 6% of its peak.
const DECAY_TAU_SECONDS: f64 = 0.7;

/// Impulse strengths vary uniformly over this fraction of the configured gain.
const IMPULSE_SPREAD: std::ops::RangeInclusive<f64> = 0.4..=1.0;

/// Inter-impulse gaps vary uniformly over this fraction of the mean interval.
const INTERVAL_SPREAD: std::ops::RangeInclusive<f64> = 0.5..=1.5;

/// Timing and strength of the impulse train.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstConfig {
    /// Average seconds between impulse onsets.
    pub mean_interval: f64,
    /// Peak contribution of a full-strength impulse, in invariant units.
    pub gain: f64,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            mean_interval: 4.0,
            gain: 0.05,
        }
    }
}

/// A decaying impulse train driven by an external clock and RNG.
///
/// The process itself is deliberately clock-free: callers feed it the current
/// elapsed time and the frame delta, which keeps replays with a seeded RNG
/// bit-identical regardless of wall-clock jitter.
#[derive(Debug)]
pub struct BurstProcess {
    config: BurstConfig,
    level: f64,
    next_at: f64,
}

impl BurstProcess {
    /// Creates an idle process and schedules its first impulse.
    pub fn new(config: BurstConfig, rng: &mut impl Rng) -> Self {
        let next_at = config.mean_interval * rng.gen_range(INTERVAL_SPREAD);
        Self {
            config,
            level: 0.0,
            next_at,
        }
    }

    /// Decays the level across `dt` seconds, fires an impulse if one is due
    /// at elapsed time `t`, and returns the resulting level.
    pub fn advance(&mut self, t: f64, dt: f64, rng: &mut impl Rng) -> f64 {
        self.level *= (-dt.max(0.0) / DECAY_TAU_SECONDS).exp();
        if t >= self.next_at {
            self.level += self.config.gain * rng.gen_range(IMPULSE_SPREAD);
            self.next_at = t + self.config.mean_interval * rng.gen_range(INTERVAL_SPREAD);
        }
        self.level
    }

    /// The current level without advancing time.
    pub fn level(&self) -> f64 {
        self.level
    }
}
