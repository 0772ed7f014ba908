//! TOML configuration for the CLI and library defaults.
//!
//! ```toml
//! units = "metric"
//! gravity = 9.8
//! tolerance = 0.25
//! sample_step = 0.5
//!
//! [spread]
//! num_shots = 5000
//! speed_std_dev = 0.3
//! angle_std_dev_deg = 0.8
//! seed = 42
//! ```
//!
//! Every key is optional; missing keys fall back to [`ModelConfig::default`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::constants::{DEFAULT_SAMPLE_STEP, DEFAULT_TOLERANCE, MAX_SPREAD_SHOTS};
use crate::error::ConfigError;
use crate::shot_spread::SpreadParams;
use crate::units::UnitSystem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub units: UnitSystem,
    /// Overrides the unit system's standard gravity
    pub gravity: Option<f64>,
    pub tolerance: f64,
    pub sample_step: f64,
    pub spread: SpreadConfig,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            units: UnitSystem::default(),
            gravity: None,
            tolerance: DEFAULT_TOLERANCE,
            sample_step: DEFAULT_SAMPLE_STEP,
            spread: SpreadConfig::default(),
        }
    }
}

/// `[spread]` table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadConfig {
    pub num_shots: usize,
    pub speed_std_dev: f64,
    pub angle_std_dev_deg: f64,
    pub seed: Option<u64>,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        SpreadParams::default().into()
    }
}

impl From<SpreadParams> for SpreadConfig {
    fn from(p: SpreadParams) -> Self {
        Self {
            num_shots: p.num_shots,
            speed_std_dev: p.speed_std_dev,
            angle_std_dev_deg: p.angle_std_dev_deg,
            seed: p.seed,
        }
    }
}

impl From<SpreadConfig> for SpreadParams {
    fn from(c: SpreadConfig) -> Self {
        Self {
            num_shots: c.num_shots,
            speed_std_dev: c.speed_std_dev,
            angle_std_dev_deg: c.angle_std_dev_deg,
            seed: c.seed,
        }
    }
}

impl ModelConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: ModelConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Effective gravitational acceleration
    pub fn gravity(&self) -> f64 {
        self.gravity.unwrap_or_else(|| self.units.gravity())
    }

    pub fn spread_params(&self) -> SpreadParams {
        self.spread.into()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(g) = self.gravity {
            if !g.is_finite() || g <= 0.0 {
                return Err(ConfigError::Invalid(format!("gravity must be positive, got {}", g)));
            }
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        if !self.sample_step.is_finite() || self.sample_step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "sample_step must be positive, got {}",
                self.sample_step
            )));
        }
        if self.spread.num_shots == 0 || self.spread.num_shots > MAX_SPREAD_SHOTS {
            return Err(ConfigError::Invalid(format!(
                "spread.num_shots must be between 1 and {}, got {}",
                MAX_SPREAD_SHOTS, self.spread.num_shots
            )));
        }
        for (name, value) in [
            ("spread.speed_std_dev", self.spread.speed_std_dev),
            ("spread.angle_std_dev_deg", self.spread.angle_std_dev_deg),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{} must be non-negative, got {}", name, value)));
            }
        }
        Ok(())
    }
}

/// Read and validate a TOML configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ModelConfig, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let config = ModelConfig::from_toml_str(&contents)?;
    info!(path = %path.display(), ?config, "configuration loaded");
    Ok(config)
}
