//! Sport presets and shot evaluation.
//!
//! Each sport fixes a target (rim, crossbar, service box, green) and any
//! obstacles the ball must get over. All presets use imperial units (feet,
//! ft/s) like the lesson material they model.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelResult;
use crate::projectile::{self, ProjectileParameters, TrajectoryResult};
use crate::quadratic::{self, QuadraticCoefficients};
use crate::units::UnitSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Basketball,
    Soccer,
    Tennis,
    Football,
    Golf,
}

impl Sport {
    pub const ALL: [Sport; 5] = [
        Sport::Basketball,
        Sport::Soccer,
        Sport::Tennis,
        Sport::Football,
        Sport::Golf,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basketball" => Some(Sport::Basketball),
            "soccer" => Some(Sport::Soccer),
            "tennis" => Some(Sport::Tennis),
            "football" => Some(Sport::Football),
            "golf" => Some(Sport::Golf),
            _ => None,
        }
    }

    /// Preset target, obstacles and a reference shot for this sport
    pub fn scenario(&self) -> ShotScenario {
        let imperial = UnitSystem::Imperial;
        match self {
            Sport::Basketball => ShotScenario {
                sport: *self,
                description: "Free throw: ball must reach rim height 15 ft from the release point".to_string(),
                default_shot: ProjectileParameters::new(7.0, 52.0, 24.3, imperial),
                obstacles: Vec::new(),
                goal: GoalCheck::HeightWithin {
                    distance: 15.0,
                    target_height: 10.0,
                    tolerance: 0.5,
                },
            },
            Sport::Soccer => ShotScenario {
                sport: *self,
                description: "Free kick over a defensive wall and under the crossbar".to_string(),
                default_shot: ProjectileParameters::new(0.0, 18.0, 70.0, imperial),
                obstacles: vec![Obstacle::new("defensive wall", 30.0, 6.0)],
                goal: GoalCheck::PassesUnder {
                    distance: 60.0,
                    height: 8.0,
                },
            },
            Sport::Tennis => ShotScenario {
                sport: *self,
                description: "Serve over the net into the service box (39-60 ft)".to_string(),
                default_shot: ProjectileParameters::new(8.5, 5.0, 60.0, imperial),
                obstacles: vec![Obstacle::new("net", 39.0, 3.0)],
                goal: GoalCheck::LandsWithin {
                    target_distance: 49.5,
                    tolerance: 10.5,
                },
            },
            Sport::Football => ShotScenario {
                sport: *self,
                description: "Field goal from 40 yards over a 10 ft crossbar".to_string(),
                default_shot: ProjectileParameters::new(0.0, 35.0, 80.0, imperial),
                obstacles: Vec::new(),
                goal: GoalCheck::Clears {
                    distance: 120.0,
                    height: 10.0,
                },
            },
            Sport::Golf => ShotScenario {
                sport: *self,
                description: "Approach shot landing on a green 100 yards out".to_string(),
                default_shot: ProjectileParameters::new(0.0, 45.0, 100.0, imperial),
                obstacles: Vec::new(),
                goal: GoalCheck::LandsWithin {
                    target_distance: 300.0,
                    tolerance: 30.0,
                },
            },
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Sport::Basketball => "basketball",
            Sport::Soccer => "soccer",
            Sport::Tennis => "tennis",
            Sport::Football => "football",
            Sport::Golf => "golf",
        };
        write!(f, "{}", name)
    }
}

/// Something the ball must pass strictly above (net, wall, defender)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub name: String,
    pub distance: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn new(name: &str, distance: f64, height: f64) -> Self {
        Self {
            name: name.to_string(),
            distance,
            height,
        }
    }
}

/// What counts as a successful shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalCheck {
    /// Height at `distance` within `tolerance` of `target_height` (basket make/miss)
    HeightWithin { distance: f64, target_height: f64, tolerance: f64 },
    /// Ball lands within `tolerance` of `target_distance` (service box, green)
    LandsWithin { target_distance: f64, tolerance: f64 },
    /// Strictly above `height` at `distance` (field-goal crossbar)
    Clears { distance: f64, height: f64 },
    /// Above the ground but strictly below `height` at `distance` (soccer goal mouth)
    PassesUnder { distance: f64, height: f64 },
}

impl GoalCheck {
    /// Signed miss against the target: positive is long/high, negative short/low.
    /// `None` when the ball never lands for a landing-based goal.
    pub fn deviation(&self, trajectory: &TrajectoryResult) -> Option<f64> {
        match *self {
            GoalCheck::HeightWithin { distance, target_height, .. } => {
                Some(trajectory.height_at(distance) - target_height)
            }
            GoalCheck::LandsWithin { target_distance, .. } => {
                trajectory.landing_distance.map(|landing| landing - target_distance)
            }
            GoalCheck::Clears { distance, height } | GoalCheck::PassesUnder { distance, height } => {
                Some(trajectory.height_at(distance) - height)
            }
        }
    }

    pub fn is_met(&self, trajectory: &TrajectoryResult) -> bool {
        let coeffs = &trajectory.coefficients;
        match *self {
            GoalCheck::HeightWithin { distance, target_height, tolerance } => {
                quadratic::is_within_tolerance(quadratic::height_at(coeffs, distance), target_height, tolerance)
            }
            GoalCheck::LandsWithin { target_distance, tolerance } => trajectory
                .landing_distance
                .map_or(false, |landing| quadratic::is_within_tolerance(landing, target_distance, tolerance)),
            GoalCheck::Clears { distance, height } => quadratic::clears(coeffs, distance, height),
            GoalCheck::PassesUnder { distance, height } => {
                let at_goal = quadratic::height_at(coeffs, distance);
                at_goal > 0.0 && at_goal < height
            }
        }
    }
}

/// A sport's target layout plus a reference shot that succeeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotScenario {
    pub sport: Sport,
    pub description: String,
    pub default_shot: ProjectileParameters,
    pub obstacles: Vec<Obstacle>,
    pub goal: GoalCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleResult {
    pub name: String,
    pub height_at_obstacle: f64,
    pub cleared: bool,
}

/// Result of checking one trajectory against a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotOutcome {
    pub sport: Sport,
    pub trajectory: TrajectoryResult,
    pub obstacles: Vec<ObstacleResult>,
    pub goal_met: bool,
    pub deviation: Option<f64>,
}

impl ShotOutcome {
    pub fn clears_obstacles(&self) -> bool {
        self.obstacles.iter().all(|o| o.cleared)
    }

    pub fn is_success(&self) -> bool {
        self.goal_met && self.clears_obstacles()
    }
}

/// Evaluate a trajectory given in standard form against a scenario
pub fn evaluate(scenario: &ShotScenario, coeffs: &QuadraticCoefficients) -> ModelResult<ShotOutcome> {
    let trajectory = projectile::analyze_coefficients(coeffs)?;

    let obstacles = scenario
        .obstacles
        .iter()
        .map(|obstacle| ObstacleResult {
            name: obstacle.name.clone(),
            height_at_obstacle: trajectory.height_at(obstacle.distance),
            cleared: quadratic::clears(coeffs, obstacle.distance, obstacle.height),
        })
        .collect();

    let outcome = ShotOutcome {
        sport: scenario.sport,
        obstacles,
        goal_met: scenario.goal.is_met(&trajectory),
        deviation: scenario.goal.deviation(&trajectory),
        trajectory,
    };

    debug!(
        sport = %scenario.sport,
        success = outcome.is_success(),
        deviation = ?outcome.deviation,
        "evaluated shot"
    );
    Ok(outcome)
}

/// Evaluate a launch against a scenario
pub fn evaluate_shot(scenario: &ShotScenario, params: &ProjectileParameters) -> ModelResult<ShotOutcome> {
    let coeffs = projectile::from_projectile(params)?;
    evaluate(scenario, &coeffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    #[test]
    fn test_sport_from_str_and_display() {
        for sport in Sport::ALL {
            assert_eq!(Sport::from_str(&sport.to_string()), Some(sport));
        }
        assert_eq!(Sport::from_str("GOLF"), Some(Sport::Golf));
        assert_eq!(Sport::from_str("Basketball"), Some(Sport::Basketball));
        assert_eq!(Sport::from_str("curling"), None);
        assert_eq!(Sport::from_str(""), None);
    }

    #[test]
    fn test_default_shots_succeed() {
        for sport in Sport::ALL {
            let scenario = sport.scenario();
            let outcome = evaluate_shot(&scenario, &scenario.default_shot).unwrap();
            assert!(outcome.is_success(), "{} default shot should succeed: {:?}", sport, outcome);
        }
    }

    #[test]
    fn test_free_throw_falls_short_of_rim() {
        // Peaks at 7.8 ft, well below the 10 ft rim
        let scenario = Sport::Basketball.scenario();
        let outcome = evaluate(&scenario, &QuadraticCoefficients::new(-0.05, 0.6, 6.0)).unwrap();
        assert!(!outcome.goal_met);
        assert!(!outcome.is_success());
        assert!(outcome.deviation.unwrap() < 0.0);
        assert!((outcome.trajectory.peak_height - 7.8).abs() < 1e-9);
    }

    #[test]
    fn test_tennis_net_blocks_low_serve() {
        let scenario = Sport::Tennis.scenario();
        let low = scenario.default_shot.with_launch_angle(-8.0);
        let outcome = evaluate_shot(&scenario, &low).unwrap();
        assert!(!outcome.clears_obstacles());
        assert_eq!(outcome.obstacles[0].name, "net");
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_soccer_over_the_bar() {
        let scenario = Sport::Soccer.scenario();
        let high = scenario.default_shot.with_launch_angle(30.0);
        let outcome = evaluate_shot(&scenario, &high).unwrap();
        assert!(outcome.clears_obstacles());
        assert!(!outcome.goal_met);
        assert!(outcome.deviation.unwrap() > 0.0);
    }

    #[test]
    fn test_soccer_ball_on_the_ground_before_goal() {
        // Lands around 16 ft out, so it is below the ground line at 60 ft
        let scenario = Sport::Soccer.scenario();
        let weak = scenario.default_shot.with_initial_speed(30.0);
        let outcome = evaluate_shot(&scenario, &weak).unwrap();
        assert!(outcome.trajectory.landing_distance.unwrap() < 60.0);
        assert!(outcome.trajectory.height_at(60.0) < 0.0);
        assert!(!outcome.goal_met);
        assert!(outcome.deviation.unwrap() < 0.0);
    }

    #[test]
    fn test_golf_short_of_green() {
        let scenario = Sport::Golf.scenario();
        let weak = scenario.default_shot.with_initial_speed(80.0);
        let outcome = evaluate_shot(&scenario, &weak).unwrap();
        assert!(!outcome.goal_met);
        assert!(outcome.deviation.unwrap() < -30.0);
    }

    #[test]
    fn test_vertical_shot_is_rejected() {
        let scenario = Sport::Football.scenario();
        let vertical = scenario.default_shot.with_launch_angle(90.0);
        assert!(matches!(
            evaluate_shot(&scenario, &vertical),
            Err(ModelError::DegenerateTrajectory(_))
        ));
    }

    #[test]
    fn test_linear_input_is_rejected() {
        let scenario = Sport::Basketball.scenario();
        let err = evaluate(&scenario, &QuadraticCoefficients::new(0.0, 0.5, 6.0)).unwrap_err();
        assert_eq!(err, ModelError::InvalidCoefficient { a: 0.0 });
    }
}
