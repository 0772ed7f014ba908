//! Physical and numerical constants used by the trajectory model.

/// Gravitational acceleration in ft/s², as used in the imperial sports examples
pub const GRAVITY_FPS2: f64 = 32.2;

/// Gravitational acceleration in m/s²
pub const GRAVITY_MPS2: f64 = 9.81;

// Numerical stability constants
/// General numerical tolerance for floating point comparisons
pub const NUMERICAL_TOLERANCE: f64 = 1e-9;

/// Below this |cos θ| a launch is treated as vertical.
///
/// `cos(90°)` evaluates to ~6.1e-17 in binary floating point rather than zero,
/// so an exact comparison would never reject a vertical launch.
pub const MIN_COS_THRESHOLD: f64 = 1e-9;

// Defaults shared by the CLI and the configuration layer

/// Default make/miss tolerance (same unit as the distances being compared)
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// Default horizontal spacing between trajectory samples
pub const DEFAULT_SAMPLE_STEP: f64 = 1.0;

/// Smallest sampling step accepted before clamping
pub const MIN_SAMPLE_STEP: f64 = 1e-3;

/// Upper bound on the number of samples produced for a single trajectory
pub const MAX_SAMPLES: usize = 100_000;

/// Default number of simulated attempts for shot-spread analysis
pub const DEFAULT_SPREAD_SHOTS: usize = 1000;

/// Largest number of simulated attempts accepted for one shot-spread run
pub const MAX_SPREAD_SHOTS: usize = 1_000_000;

/// Default release-speed standard deviation (ft/s or m/s)
pub const DEFAULT_SPEED_STD_DEV: f64 = 0.5;

/// Default launch-angle standard deviation in degrees
pub const DEFAULT_ANGLE_STD_DEV_DEG: f64 = 1.0;

/// Number of core standards tracked by the progress record
pub const CORE_STANDARDS_TOTAL: usize = 10;
