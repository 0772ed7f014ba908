use approx::{assert_abs_diff_eq, assert_relative_eq};
use sports_quadratics::{
    clears, complete_the_square, from_projectile, height_at, is_within_tolerance, max_range_angle,
    simulate_shot_spread, to_vertex_form, evaluate_shot, ModelError, ProjectileParameters,
    QuadraticCoefficients, Sport, SpreadParams, UnitSystem,
};

const SAMPLE_COEFFICIENTS: [(f64, f64, f64); 6] = [
    (1.0, 6.0, 5.0),
    (2.0, 12.0, 10.0),
    (-0.05, 0.6, 6.0),
    (-16.0, 32.0, 4.0),
    (0.25, -3.0, 1.5),
    (-0.0123, 0.9, 0.0),
];

#[test]
fn test_vertex_form_matches_standard_form() {
    for (a, b, c) in SAMPLE_COEFFICIENTS {
        let coeffs = QuadraticCoefficients::new(a, b, c);
        let vertex = to_vertex_form(&coeffs).unwrap();
        for x in [-20.0, -3.5, 0.0, 1.0, 7.25, 42.0] {
            assert_relative_eq!(vertex.evaluate(x), height_at(&coeffs, x), epsilon = 1e-9, max_relative = 1e-12);
        }
        assert_abs_diff_eq!(height_at(&coeffs, vertex.h), vertex.k, epsilon = 1e-9);
    }
}

#[test]
fn test_symmetry_about_the_vertex() {
    for (a, b, c) in SAMPLE_COEFFICIENTS {
        let coeffs = QuadraticCoefficients::new(a, b, c);
        let h = to_vertex_form(&coeffs).unwrap().h;
        for d in [0.5, 1.0, 3.0, 10.0] {
            assert_relative_eq!(height_at(&coeffs, h - d), height_at(&coeffs, h + d), epsilon = 1e-9, max_relative = 1e-12);
        }
    }
}

#[test]
fn test_completed_square_agrees_with_vertex() {
    for (a, b, c) in SAMPLE_COEFFICIENTS {
        let coeffs = QuadraticCoefficients::new(a, b, c);
        let vertex = to_vertex_form(&coeffs).unwrap();
        let square = complete_the_square(&coeffs).unwrap();
        assert_abs_diff_eq!(square.p, vertex.h, epsilon = 1e-12);
        assert_relative_eq!(square.q, -vertex.k / a, epsilon = 1e-9, max_relative = 1e-12);
    }
}

#[test]
fn test_linear_input_rejected() {
    let coeffs = QuadraticCoefficients::new(0.0, 3.0, 1.0);
    assert_eq!(to_vertex_form(&coeffs), Err(ModelError::InvalidCoefficient { a: 0.0 }));
    assert!(complete_the_square(&coeffs).is_err());
}

#[test]
fn test_worked_examples() {
    let simple = QuadraticCoefficients::new(1.0, 6.0, 5.0);
    let vertex = to_vertex_form(&simple).unwrap();
    assert_eq!((vertex.h, vertex.k), (-3.0, -4.0));
    assert_eq!(height_at(&simple, -3.0), -4.0);
    assert_eq!(height_at(&simple, 0.0), 5.0);

    let scaled = to_vertex_form(&QuadraticCoefficients::new(2.0, 12.0, 10.0)).unwrap();
    assert_eq!((scaled.h, scaled.k), (-3.0, -8.0));

    let free_throw = QuadraticCoefficients::new(-0.05, 0.6, 6.0);
    let vertex = to_vertex_form(&free_throw).unwrap();
    assert_abs_diff_eq!(vertex.h, 6.0, epsilon = 1e-9);
    assert_abs_diff_eq!(vertex.k, 7.8, epsilon = 1e-9);
    assert!(!clears(&free_throw, 15.0, 10.0));

    assert!(is_within_tolerance(9.6, 10.0, 0.5));
    assert!(!is_within_tolerance(8.0, 10.0, 0.5));
}

#[test]
fn test_projectile_starts_at_release_height() {
    for units in [UnitSystem::Imperial, UnitSystem::Metric] {
        for (height, angle, speed) in [(0.0, 30.0, 20.0), (7.0, 52.0, 24.3), (2.5, -5.0, 40.0), (1.0, 89.0, 5.0)] {
            let params = ProjectileParameters::new(height, angle, speed, units);
            let coeffs = from_projectile(&params).unwrap();
            assert_eq!(height_at(&coeffs, 0.0), height);
            assert!(coeffs.a < 0.0);
        }
    }
}

#[test]
fn test_vertical_launch_is_degenerate() {
    let params = ProjectileParameters::new(0.0, 90.0, 20.0, UnitSystem::Metric);
    assert!(matches!(from_projectile(&params), Err(ModelError::DegenerateTrajectory(_))));
}

#[test]
fn test_forty_five_degrees_from_ground_level() {
    let base = ProjectileParameters::new(0.0, 0.0, 30.0, UnitSystem::Imperial);
    let best = max_range_angle(&base, 5.0, 85.0, 0.5).unwrap();
    assert_eq!(best.launch_angle_deg, 45.0);
    // v² / g
    assert_relative_eq!(best.landing_distance.unwrap(), 900.0 / 32.2, max_relative = 1e-9);
}

#[test]
fn test_presets_and_zero_spread() {
    let scenario = Sport::Basketball.scenario();
    assert!(evaluate_shot(&scenario, &scenario.default_shot).unwrap().is_success());

    let params = SpreadParams {
        num_shots: 100,
        speed_std_dev: 0.0,
        angle_std_dev_deg: 0.0,
        seed: Some(2024),
    };
    let results = simulate_shot_spread(&scenario, &scenario.default_shot, &params).unwrap();
    assert_eq!(results.make_percentage(), 100.0);
}
