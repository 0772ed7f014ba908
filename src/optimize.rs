//! Launch-angle sweeps.
//!
//! Each angle is independent, so sweeps fan out over rayon's pool and are
//! collected back in angle order.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::NUMERICAL_TOLERANCE;
use crate::projectile::{self, ProjectileParameters};
use crate::sports::{self, ShotScenario};

/// One angle of a plain sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSweepPoint {
    pub launch_angle_deg: f64,
    pub peak_distance: f64,
    pub peak_height: f64,
    pub landing_distance: Option<f64>,
}

/// One angle of a sweep against a sport scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSweepPoint {
    pub launch_angle_deg: f64,
    pub success: bool,
    pub deviation: Option<f64>,
}

/// Widest contiguous range of successful launch angles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleWindow {
    pub low_deg: f64,
    pub high_deg: f64,
    /// Successful grid angle nearest the middle of the window
    pub optimal_deg: f64,
}

impl AngleWindow {
    pub fn width_deg(&self) -> f64 {
        self.high_deg - self.low_deg
    }

    pub fn contains(&self, angle_deg: f64) -> bool {
        angle_deg >= self.low_deg && angle_deg <= self.high_deg
    }
}

/// Grid of angles from `min_deg` to `max_deg` inclusive
fn angle_grid(min_deg: f64, max_deg: f64, step_deg: f64) -> Vec<f64> {
    if !step_deg.is_finite() || step_deg <= 0.0 || !min_deg.is_finite() || !max_deg.is_finite() || max_deg < min_deg {
        return Vec::new();
    }

    let steps = ((max_deg - min_deg) / step_deg - NUMERICAL_TOLERANCE).ceil().max(0.0) as usize;
    let mut angles: Vec<f64> = (0..=steps)
        .map(|i| (min_deg + i as f64 * step_deg).min(max_deg))
        .collect();
    angles.dedup();
    angles
}

/// Analyze the base launch at every angle of the grid.
///
/// Degenerate angles (vertical launches) are skipped.
pub fn sweep_launch_angles(
    base: &ProjectileParameters,
    min_deg: f64,
    max_deg: f64,
    step_deg: f64,
) -> Vec<AngleSweepPoint> {
    let angles = angle_grid(min_deg, max_deg, step_deg);
    debug!(count = angles.len(), min_deg, max_deg, "sweeping launch angles");

    angles
        .into_par_iter()
        .filter_map(|angle| {
            let params = base.with_launch_angle(angle);
            match projectile::analyze_trajectory(&params) {
                Ok(result) => Some(AngleSweepPoint {
                    launch_angle_deg: angle,
                    peak_distance: result.peak_distance,
                    peak_height: result.peak_height,
                    landing_distance: result.landing_distance,
                }),
                Err(e) => {
                    warn!(angle_deg = angle, error = %e, "skipping angle");
                    None
                }
            }
        })
        .collect()
}

/// Angle on the grid that carries the ball furthest before landing
pub fn max_range_angle(
    base: &ProjectileParameters,
    min_deg: f64,
    max_deg: f64,
    step_deg: f64,
) -> Option<AngleSweepPoint> {
    sweep_launch_angles(base, min_deg, max_deg, step_deg)
        .into_iter()
        .filter(|p| p.landing_distance.is_some())
        .max_by(|a, b| {
            let a = a.landing_distance.unwrap_or(f64::NEG_INFINITY);
            let b = b.landing_distance.unwrap_or(f64::NEG_INFINITY);
            a.total_cmp(&b)
        })
}

/// Evaluate the base launch against a scenario at every angle of the grid.
///
/// Degenerate angles stay in the sweep as failed points so they break any
/// run of successful angles around them.
pub fn sweep_scenario(
    scenario: &ShotScenario,
    base: &ProjectileParameters,
    min_deg: f64,
    max_deg: f64,
    step_deg: f64,
) -> Vec<ScenarioSweepPoint> {
    angle_grid(min_deg, max_deg, step_deg)
        .into_par_iter()
        .map(|angle| {
            let params = base.with_launch_angle(angle);
            match sports::evaluate_shot(scenario, &params) {
                Ok(outcome) => ScenarioSweepPoint {
                    launch_angle_deg: angle,
                    success: outcome.is_success(),
                    deviation: outcome.deviation,
                },
                Err(e) => {
                    warn!(angle_deg = angle, error = %e, "angle cannot be evaluated");
                    ScenarioSweepPoint {
                        launch_angle_deg: angle,
                        success: false,
                        deviation: None,
                    }
                }
            }
        })
        .collect()
}

/// Widest run of consecutive successful angles, or `None` if no angle works.
///
/// The middle of that run is the most forgiving release angle: small
/// release errors either way still succeed.
pub fn success_window(
    scenario: &ShotScenario,
    base: &ProjectileParameters,
    min_deg: f64,
    max_deg: f64,
    step_deg: f64,
) -> Option<AngleWindow> {
    let sweep = sweep_scenario(scenario, base, min_deg, max_deg, step_deg);
    let window = success_window_from(&sweep);
    debug!(sport = %scenario.sport, ?window, "searched success window");
    window
}

/// Widest run of consecutive successful points of an existing sweep
pub fn success_window_from(sweep: &[ScenarioSweepPoint]) -> Option<AngleWindow> {
    let mut best: Option<(usize, usize)> = None;
    let mut run_start: Option<usize> = None;
    for (i, point) in sweep.iter().enumerate() {
        match (point.success, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                best = wider(best, (start, i - 1));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        best = wider(best, (start, sweep.len() - 1));
    }

    let (start, end) = best?;
    Some(AngleWindow {
        low_deg: sweep[start].launch_angle_deg,
        high_deg: sweep[end].launch_angle_deg,
        optimal_deg: sweep[start + (end - start + 1) / 2].launch_angle_deg,
    })
}

fn wider(current: Option<(usize, usize)>, candidate: (usize, usize)) -> Option<(usize, usize)> {
    match current {
        Some((s, e)) if e - s >= candidate.1 - candidate.0 => current,
        _ => Some(candidate),
    }
}
