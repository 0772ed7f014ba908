//! Error types for the trajectory model, simulations and configuration.

use thiserror::Error;

/// Failures of the quadratic/trajectory model itself.
///
/// Both kinds are recoverable: the caller adjusts its inputs and retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Leading coefficient is zero, so the expression is linear, not quadratic.
    #[error("invalid coefficient: leading coefficient a must be nonzero (got {a})")]
    InvalidCoefficient { a: f64 },

    /// Launch parameters make the projectile conversion undefined.
    #[error("degenerate trajectory: {0}")]
    DegenerateTrajectory(String),
}

pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Failures of the Monte Carlo shot-spread simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid spread parameters: {0}")]
    InvalidSpread(String),

    #[error("no valid shots were produced by the simulation")]
    NoValidShots,

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Failures while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
