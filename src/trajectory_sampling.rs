use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::{MAX_SAMPLES, MIN_SAMPLE_STEP, NUMERICAL_TOLERANCE};
use crate::quadratic::{self, QuadraticCoefficients};

/// Trajectory flags for notable events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryFlag {
    Apex,
    GroundCrossing,
}

impl TrajectoryFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrajectoryFlag::Apex => "apex",
            TrajectoryFlag::GroundCrossing => "ground_crossing",
        }
    }
}

/// Single trajectory sample point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    /// (distance, height)
    pub position: Point2<f64>,
    pub flags: Vec<TrajectoryFlag>,
}

impl TrajectorySample {
    pub fn distance(&self) -> f64 {
        self.position.x
    }

    pub fn height(&self) -> f64 {
        self.position.y
    }
}

/// Sample the trajectory at regular horizontal intervals over `[start, end]`.
///
/// The last sample is clamped to `end` so the endpoint is always present.
/// Returns nothing for a non-positive step or an empty interval.
pub fn sample_trajectory(
    coeffs: &QuadraticCoefficients,
    start: f64,
    end: f64,
    step: f64,
) -> Vec<TrajectorySample> {
    if !step.is_finite() || step <= 0.0 || !start.is_finite() || !end.is_finite() || end < start {
        return Vec::new();
    }

    let span = end - start;
    let mut step_size = step.max(MIN_SAMPLE_STEP);
    // `n` intervals produce `n + 1` samples
    let max_intervals = (MAX_SAMPLES - 1) as f64;
    if span / step_size > max_intervals {
        step_size = span / max_intervals;
    }

    // Slack keeps a rounding error in `span` from adding a near-duplicate endpoint
    let num_steps = (span / step_size - NUMERICAL_TOLERANCE).ceil().max(0.0) as usize;
    let mut samples: Vec<TrajectorySample> = (0..=num_steps)
        .map(|i| (start + i as f64 * step_size).min(end))
        .map(|x| TrajectorySample {
            position: Point2::new(x, quadratic::height_at(coeffs, x)),
            flags: Vec::new(),
        })
        .collect();

    // Zero-width interval produces a single point
    samples.dedup_by(|later, earlier| later.position.x == earlier.position.x);

    add_trajectory_flags(&mut samples, coeffs);
    samples
}

/// Sample from the launch point to where the trajectory lands.
///
/// Falls back to the symmetric range `2h` when the path never comes back to
/// the ground (e.g. an upward-opening parabola).
pub fn sample_until_landing(coeffs: &QuadraticCoefficients, step: f64) -> Vec<TrajectorySample> {
    let end = match quadratic::landing_distance(coeffs, 0.0) {
        Ok(Some(distance)) => distance,
        Ok(None) => match quadratic::ground_range(coeffs) {
            Ok(range) if range > 0.0 => range,
            _ => return Vec::new(),
        },
        Err(_) => return Vec::new(),
    };

    sample_trajectory(coeffs, 0.0, end, step)
}

fn add_trajectory_flags(samples: &mut [TrajectorySample], coeffs: &QuadraticCoefficients) {
    detect_ground_crossings(samples, NUMERICAL_TOLERANCE);

    if let Ok(vertex) = quadratic::to_vertex_form(coeffs) {
        let in_range = samples.first().map_or(false, |s| vertex.h >= s.distance())
            && samples.last().map_or(false, |s| vertex.h <= s.distance());
        if in_range {
            if let Some(idx) = find_closest_sample_index(samples, vertex.h) {
                samples[idx].flags.push(TrajectoryFlag::Apex);
            }
        }
    }

    for sample in samples.iter_mut() {
        let mut seen = HashSet::new();
        sample.flags.retain(|flag| seen.insert(*flag));
    }
}

/// Flag samples where the height changes sign, or sits on the ground
fn detect_ground_crossings(samples: &mut [TrajectorySample], tolerance: f64) {
    let heights: Vec<f64> = samples.iter().map(|s| s.height()).collect();

    for i in 1..heights.len() {
        let previous = heights[i - 1];
        let current = heights[i];
        let crosses = (previous > tolerance && current < -tolerance)
            || (previous < -tolerance && current > tolerance);
        if crosses {
            samples[i].flags.push(TrajectoryFlag::GroundCrossing);
        }
    }

    for (i, &height) in heights.iter().enumerate() {
        if height.abs() <= tolerance {
            samples[i].flags.push(TrajectoryFlag::GroundCrossing);
        }
    }
}

/// Find the sample whose distance is closest to `target_distance`
fn find_closest_sample_index(samples: &[TrajectorySample], target_distance: f64) -> Option<usize> {
    if samples.is_empty() {
        return None;
    }

    // Samples are sorted by distance
    let idx = samples.partition_point(|s| s.distance() < target_distance);
    if idx == 0 {
        return Some(0);
    }
    if idx >= samples.len() {
        return Some(samples.len() - 1);
    }

    let before = target_distance - samples[idx - 1].distance();
    let after = samples[idx].distance() - target_distance;
    Some(if before <= after { idx - 1 } else { idx })
}
