use thiserror::Error;

use super::burst::BurstConfig;
use crate::core::catalog::Category;
use crate::core::invariants::Invariants;
use crate::core::scoring::DEFAULT_PARAM_UNCERTAINTY;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub const DEFAULT_DRIFT_AMPLITUDE: f64 = 0.02;
pub const DEFAULT_BREATH_AMPLITUDE: f64 = 0.008;
pub const DEFAULT_BREATH_FREQUENCY: f64 = 0.05;
pub const DEFAULT_FRAME_RATE: f64 = 30.0;
pub const DEFAULT_DURATION_SECONDS: f64 = 10.0;

fn ensure_in_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: format!("{value} is outside {min}..={max}"),
        });
    }
    Ok(())
}

fn ensure_positive(name: &'static str, value: f64, max: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 || value > max {
        return Err(ConfigError::InvalidParameter {
            name,
            reason: format!("{value} is not in the positive range up to {max}"),
        });
    }
    Ok(())
}

/// Tuning knobs for the perturbation driver.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverConfig {
    pub drift_amplitude: f64,
    pub breath_amplitude: f64,
    pub breath_frequency: f64,
    pub param_uncertainty: f64,
    pub bursts: Option<BurstConfig>,
    pub seed: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            drift_amplitude: DEFAULT_DRIFT_AMPLITUDE,
            breath_amplitude: DEFAULT_BREATH_AMPLITUDE,
            breath_frequency: DEFAULT_BREATH_FREQUENCY,
            param_uncertainty: DEFAULT_PARAM_UNCERTAINTY,
            bursts: Some(BurstConfig::default()),
            seed: None,
        }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_in_range("drift_amplitude", self.drift_amplitude, 0.0, 0.25)?;
        ensure_in_range("breath_amplitude", self.breath_amplitude, 0.0, 0.25)?;
        ensure_in_range("breath_frequency", self.breath_frequency, 0.0, 10.0)?;
        ensure_in_range("param_uncertainty", self.param_uncertainty, 0.0, 1.0)?;
        if let Some(bursts) = &self.bursts {
            ensure_positive("burst_mean_interval", bursts.mean_interval, 3_600.0)?;
            ensure_in_range("burst_gain", bursts.gain, 0.0, 0.5)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct DriverConfigBuilder {
    drift_amplitude: Option<f64>,
    breath_amplitude: Option<f64>,
    breath_frequency: Option<f64>,
    param_uncertainty: Option<f64>,
    bursts: Option<BurstConfig>,
    bursts_disabled: bool,
    seed: Option<u64>,
}

impl DriverConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drift_amplitude(mut self, amplitude: f64) -> Self {
        self.drift_amplitude = Some(amplitude);
        self
    }

    pub fn breath_amplitude(mut self, amplitude: f64) -> Self {
        self.breath_amplitude = Some(amplitude);
        self
    }

    pub fn breath_frequency(mut self, frequency: f64) -> Self {
        self.breath_frequency = Some(frequency);
        self
    }

    pub fn param_uncertainty(mut self, uncertainty: f64) -> Self {
        self.param_uncertainty = Some(uncertainty);
        self
    }

    pub fn bursts(mut self, bursts: BurstConfig) -> Self {
        self.bursts = Some(bursts);
        self.bursts_disabled = false;
        self
    }

    pub fn no_bursts(mut self) -> Self {
        self.bursts = None;
        self.bursts_disabled = true;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<DriverConfig, ConfigError> {
        let defaults = DriverConfig::default();
        let config = DriverConfig {
            drift_amplitude: self.drift_amplitude.unwrap_or(defaults.drift_amplitude),
            breath_amplitude: self.breath_amplitude.unwrap_or(defaults.breath_amplitude),
            breath_frequency: self.breath_frequency.unwrap_or(defaults.breath_frequency),
            param_uncertainty: self.param_uncertainty.unwrap_or(defaults.param_uncertainty),
            bursts: if self.bursts_disabled {
                None
            } else {
                self.bursts.or(defaults.bursts)
            },
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Everything a fixed-step offline run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub base: Invariants,
    pub driver: DriverConfig,
    pub duration_seconds: f64,
    pub frame_rate: f64,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.driver.validate()?;
        ensure_in_range("duration_seconds", self.duration_seconds, 0.0, 86_400.0)?;
        ensure_positive("frame_rate", self.frame_rate, 1_000.0)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SimulationConfigBuilder {
    base: Option<Invariants>,
    driver: Option<DriverConfig>,
    duration_seconds: Option<f64>,
    frame_rate: Option<f64>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(mut self, base: Invariants) -> Self {
        self.base = Some(base);
        self
    }

    pub fn driver(mut self, driver: DriverConfig) -> Self {
        self.driver = Some(driver);
        self
    }

    pub fn duration_seconds(mut self, duration: f64) -> Self {
        self.duration_seconds = Some(duration);
        self
    }

    pub fn frame_rate(mut self, rate: f64) -> Self {
        self.frame_rate = Some(rate);
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let config = SimulationConfig {
            base: self.base.ok_or(ConfigError::MissingParameter("base"))?,
            driver: self.driver.unwrap_or_default(),
            duration_seconds: self.duration_seconds.unwrap_or(DEFAULT_DURATION_SECONDS),
            frame_rate: self.frame_rate.unwrap_or(DEFAULT_FRAME_RATE),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Options for a single-shot evaluation against the preset catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluateConfig {
    pub param_uncertainty: f64,
    pub match_filter: Option<Category>,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            param_uncertainty: DEFAULT_PARAM_UNCERTAINTY,
            match_filter: None,
        }
    }
}

impl EvaluateConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_in_range("param_uncertainty", self.param_uncertainty, 0.0, 1.0)
    }
}
