//! # Sports Quadratics
//!
//! Quadratic trajectory modelling for sports: vertex form, projectile
//! launches, clearance and make/miss checks, plus sport presets, launch-angle
//! sweeps, Monte Carlo shot spread and learner progress tracking.

// Re-export the main types and functions
pub use config::{load_config, ModelConfig, SpreadConfig};
pub use error::{ConfigError, ModelError, ModelResult, SimulationError};
pub use optimize::{max_range_angle, success_window, success_window_from, sweep_launch_angles, sweep_scenario, AngleSweepPoint, AngleWindow, ScenarioSweepPoint};
pub use progress::{Achievement, Level, Progress, ProgressUpdate};
pub use projectile::{analyze_coefficients, analyze_trajectory, from_projectile, ProjectileParameters, TrajectoryResult};
pub use quadratic::{
    clears, complete_the_square, ground_range, height_at, is_within_tolerance, landing_distance, real_roots,
    to_vertex_form, CompletedSquare, QuadraticCoefficients, VertexForm,
};
pub use shot_spread::{simulate_shot_spread, SpreadParams, SpreadResults};
pub use sports::{evaluate, evaluate_shot, GoalCheck, Obstacle, ShotOutcome, ShotScenario, Sport};
pub use trajectory_sampling::{sample_trajectory, sample_until_landing, TrajectoryFlag, TrajectorySample};
pub use units::UnitSystem;

// Module declarations
pub mod config;
pub mod constants;
pub mod error;
pub mod optimize;
pub mod progress;
pub mod projectile;
pub mod quadratic;
pub mod shot_spread;
pub mod sports;
pub mod trajectory_sampling;
pub mod units;
