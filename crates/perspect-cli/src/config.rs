use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Optional defaults loaded from the `--config` TOML file. Every field is
/// optional; CLI arguments always win over file values.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub scoring: Option<ScoringSection>,
    pub drift: Option<DriftSection>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScoringSection {
    #[serde(rename = "param-uncertainty")]
    pub param_uncertainty: Option<f64>,
    /// Catalog file used instead of the built-in presets.
    pub catalog: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct DriftSection {
    pub amplitude: Option<f64>,
    #[serde(rename = "breath-amplitude")]
    pub breath_amplitude: Option<f64>,
    #[serde(rename = "breath-frequency")]
    pub breath_frequency: Option<f64>,
    pub bursts: Option<bool>,
    #[serde(rename = "mean-interval")]
    pub mean_interval: Option<f64>,
    pub gain: Option<f64>,
    pub seed: Option<u64>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FileConfig = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        debug!(path = %path.display(), "Loaded configuration file.");
        Ok(config)
    }

    pub fn scoring(&self) -> ScoringSection {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn drift(&self) -> DriftSection {
        self.drift.clone().unwrap_or_default()
    }
}
