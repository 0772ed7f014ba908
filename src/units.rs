use serde::{Deserialize, Serialize};

use crate::constants::{GRAVITY_FPS2, GRAVITY_MPS2};

/// Unit system for inputs and outputs.
///
/// The model is unit-agnostic; the unit system only selects the default
/// gravitational acceleration and the labels used when rendering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

impl UnitSystem {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "imperial" | "ft" | "feet" => Some(UnitSystem::Imperial),
            "metric" | "m" | "meters" | "si" => Some(UnitSystem::Metric),
            _ => None,
        }
    }

    /// Default gravitational acceleration for this unit system
    pub fn gravity(&self) -> f64 {
        match self {
            UnitSystem::Imperial => GRAVITY_FPS2,
            UnitSystem::Metric => GRAVITY_MPS2,
        }
    }

    pub fn distance_label(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "ft",
            UnitSystem::Metric => "m",
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "ft/s",
            UnitSystem::Metric => "m/s",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitSystem::Imperial => write!(f, "imperial"),
            UnitSystem::Metric => write!(f, "metric"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_system_from_str() {
        assert_eq!(UnitSystem::from_str("imperial"), Some(UnitSystem::Imperial));
        assert_eq!(UnitSystem::from_str("Metric"), Some(UnitSystem::Metric));
        assert_eq!(UnitSystem::from_str("FT"), Some(UnitSystem::Imperial));
        assert_eq!(UnitSystem::from_str("si"), Some(UnitSystem::Metric));
        assert_eq!(UnitSystem::from_str("furlongs"), None);
        assert_eq!(UnitSystem::from_str(""), None);
    }

    #[test]
    fn test_default_gravity() {
        assert_eq!(UnitSystem::Imperial.gravity(), 32.2);
        assert_eq!(UnitSystem::Metric.gravity(), 9.81);
        assert_eq!(UnitSystem::default(), UnitSystem::Imperial);
    }

    #[test]
    fn test_labels_and_display() {
        assert_eq!(UnitSystem::Imperial.distance_label(), "ft");
        assert_eq!(UnitSystem::Metric.speed_label(), "m/s");
        assert_eq!(format!("{}", UnitSystem::Metric), "metric");
        // Display output parses back
        for units in [UnitSystem::Imperial, UnitSystem::Metric] {
            assert_eq!(UnitSystem::from_str(&units.to_string()), Some(units));
        }
    }
}
