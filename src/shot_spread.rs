//! Monte Carlo estimate of how consistent a shot is.
//!
//! Release speed and angle are drawn from normal distributions centred on the
//! base shot; every draw is evaluated against the scenario and the makes are
//! counted.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_ANGLE_STD_DEV_DEG, DEFAULT_SPEED_STD_DEV, DEFAULT_SPREAD_SHOTS, MAX_SPREAD_SHOTS};
use crate::error::SimulationError;
use crate::projectile::ProjectileParameters;
use crate::sports::{self, ShotScenario};

/// Variability of the release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadParams {
    pub num_shots: usize,
    pub speed_std_dev: f64,
    pub angle_std_dev_deg: f64,
    /// Fixed seed for reproducible runs; entropy-seeded when `None`
    pub seed: Option<u64>,
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self {
            num_shots: DEFAULT_SPREAD_SHOTS,
            speed_std_dev: DEFAULT_SPEED_STD_DEV,
            angle_std_dev_deg: DEFAULT_ANGLE_STD_DEV_DEG,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadResults {
    /// Shots that produced a valid trajectory
    pub attempts: usize,
    pub makes: usize,
    /// Draws rejected as degenerate (non-positive speed, vertical launch)
    pub skipped: usize,
    pub mean_peak_height: f64,
    pub std_peak_height: f64,
    pub landing_distances: Vec<f64>,
}

impl SpreadResults {
    pub fn make_percentage(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            100.0 * self.makes as f64 / self.attempts as f64
        }
    }

    pub fn mean_landing_distance(&self) -> Option<f64> {
        if self.landing_distances.is_empty() {
            return None;
        }
        Some(self.landing_distances.iter().sum::<f64>() / self.landing_distances.len() as f64)
    }
}

/// Simulate `params.num_shots` releases around `base` and count successes.
pub fn simulate_shot_spread(
    scenario: &ShotScenario,
    base: &ProjectileParameters,
    params: &SpreadParams,
) -> Result<SpreadResults, SimulationError> {
    if params.num_shots == 0 {
        return Err(SimulationError::InvalidSpread("number of shots must be positive".to_string()));
    }
    if params.num_shots > MAX_SPREAD_SHOTS {
        return Err(SimulationError::InvalidSpread(format!(
            "number of shots must be at most {} (got {})",
            MAX_SPREAD_SHOTS, params.num_shots
        )));
    }
    if !params.speed_std_dev.is_finite() || !params.angle_std_dev_deg.is_finite() {
        return Err(SimulationError::InvalidSpread("standard deviations must be finite".to_string()));
    }

    let speed_dist = Normal::new(base.initial_speed, params.speed_std_dev)
        .map_err(|e| SimulationError::InvalidSpread(format!("speed distribution: {}", e)))?;
    let angle_dist = Normal::new(base.launch_angle_deg, params.angle_std_dev_deg)
        .map_err(|e| SimulationError::InvalidSpread(format!("angle distribution: {}", e)))?;

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut attempts = 0;
    let mut makes = 0;
    let mut skipped = 0;
    let mut peak_heights = Vec::with_capacity(params.num_shots);
    let mut landing_distances = Vec::with_capacity(params.num_shots);

    for _ in 0..params.num_shots {
        let shot = base
            .with_initial_speed(speed_dist.sample(&mut rng))
            .with_launch_angle(angle_dist.sample(&mut rng));

        match sports::evaluate_shot(scenario, &shot) {
            Ok(outcome) => {
                attempts += 1;
                if outcome.is_success() {
                    makes += 1;
                }
                peak_heights.push(outcome.trajectory.peak_height);
                if let Some(landing) = outcome.trajectory.landing_distance {
                    landing_distances.push(landing);
                }
            }
            Err(_) => skipped += 1,
        }
    }

    if attempts == 0 {
        return Err(SimulationError::NoValidShots);
    }

    let n = peak_heights.len() as f64;
    let mean_peak_height = peak_heights.iter().sum::<f64>() / n;
    let std_peak_height = (peak_heights
        .iter()
        .map(|h| (h - mean_peak_height).powi(2))
        .sum::<f64>()
        / n)
        .sqrt();

    let results = SpreadResults {
        attempts,
        makes,
        skipped,
        mean_peak_height,
        std_peak_height,
        landing_distances,
    };

    debug!(
        sport = %scenario.sport,
        attempts,
        makes,
        skipped,
        make_pct = results.make_percentage(),
        "shot spread simulated"
    );
    Ok(results)
}
