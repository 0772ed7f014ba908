//! Projectile launch parameters and the trajectory analysis built on them.
//!
//! Without air resistance, height against horizontal distance is the parabola
//!
//! ```text
//! y(x) = y₀ + x·tan θ − g·x² / (2·v₀²·cos²θ)
//! ```
//!
//! so a launch reduces to standard-form coefficients and every sports metric
//! (peak, range, clearance) comes out of the quadratic model.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::MIN_COS_THRESHOLD;
use crate::error::{ModelError, ModelResult};
use crate::quadratic::{self, QuadraticCoefficients, VertexForm};
use crate::units::UnitSystem;

/// Launch conditions of a projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileParameters {
    pub initial_height: f64,    // same distance unit as the output
    pub launch_angle_deg: f64,  // above horizontal
    pub initial_speed: f64,     // distance unit per second
    pub gravity: f64,           // distance unit per second²
}

impl ProjectileParameters {
    /// Launch with the default gravity of the given unit system
    pub fn new(initial_height: f64, launch_angle_deg: f64, initial_speed: f64, units: UnitSystem) -> Self {
        Self {
            initial_height,
            launch_angle_deg,
            initial_speed,
            gravity: units.gravity(),
        }
    }

    pub fn with_gravity(self, gravity: f64) -> Self {
        Self { gravity, ..self }
    }

    pub fn with_launch_angle(self, launch_angle_deg: f64) -> Self {
        Self { launch_angle_deg, ..self }
    }

    pub fn with_initial_speed(self, initial_speed: f64) -> Self {
        Self { initial_speed, ..self }
    }
}

/// Derived metrics of a trajectory. Holds no state beyond its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryResult {
    pub coefficients: QuadraticCoefficients,
    pub vertex: VertexForm,
    /// Horizontal distance of the peak (`h`)
    pub peak_distance: f64,
    /// Height at the peak (`k`)
    pub peak_height: f64,
    /// Symmetric range `2h`; see [`quadratic::ground_range`] for its limits
    pub ground_range: f64,
    /// Exact forward distance at which the height reaches zero
    pub landing_distance: Option<f64>,
}

impl TrajectoryResult {
    pub fn height_at(&self, distance: f64) -> f64 {
        quadratic::height_at(&self.coefficients, distance)
    }
}

/// Convert launch conditions to standard-form coefficients:
/// `a = -g / (2·v₀²·cos²θ)`, `b = tan θ`, `c = initial height`.
pub fn from_projectile(params: &ProjectileParameters) -> ModelResult<QuadraticCoefficients> {
    if !params.launch_angle_deg.is_finite() {
        return Err(ModelError::DegenerateTrajectory(format!(
            "launch angle must be finite (got {})",
            params.launch_angle_deg
        )));
    }

    let theta = params.launch_angle_deg.to_radians();
    let cos_theta = theta.cos();

    if cos_theta.abs() < MIN_COS_THRESHOLD {
        return Err(ModelError::DegenerateTrajectory(format!(
            "launch angle {}° is vertical; height is not a function of distance",
            params.launch_angle_deg
        )));
    }
    if !params.initial_speed.is_finite() || params.initial_speed <= 0.0 {
        return Err(ModelError::DegenerateTrajectory(format!(
            "initial speed must be positive (got {})",
            params.initial_speed
        )));
    }
    if !params.gravity.is_finite() || params.gravity <= 0.0 {
        return Err(ModelError::DegenerateTrajectory(format!(
            "gravity must be positive (got {})",
            params.gravity
        )));
    }

    let v0 = params.initial_speed;
    Ok(QuadraticCoefficients {
        a: -params.gravity / (2.0 * v0 * v0 * cos_theta * cos_theta),
        b: theta.tan(),
        c: params.initial_height,
    })
}

/// Full analysis of a launch: vertex, peak, symmetric and exact ranges.
pub fn analyze_trajectory(params: &ProjectileParameters) -> ModelResult<TrajectoryResult> {
    let coefficients = from_projectile(params)?;
    let result = analyze_coefficients(&coefficients)?;

    debug!(
        angle_deg = params.launch_angle_deg,
        speed = params.initial_speed,
        peak_height = result.peak_height,
        landing = ?result.landing_distance,
        "analyzed trajectory"
    );
    Ok(result)
}

/// Same analysis for a trajectory given directly in standard form
pub fn analyze_coefficients(coefficients: &QuadraticCoefficients) -> ModelResult<TrajectoryResult> {
    let vertex = quadratic::to_vertex_form(coefficients)?;
    let landing_distance = quadratic::landing_distance(coefficients, 0.0)?;

    Ok(TrajectoryResult {
        coefficients: *coefficients,
        vertex,
        peak_distance: vertex.h,
        peak_height: vertex.k,
        ground_range: 2.0 * vertex.h,
        landing_distance,
    })
}
