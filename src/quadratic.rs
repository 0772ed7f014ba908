//! Standard form, vertex form and completing the square.
//!
//! Every function here is pure: inputs are plain value records and nothing is
//! cached between calls.

use serde::{Deserialize, Serialize};

use crate::constants::NUMERICAL_TOLERANCE;
use crate::error::{ModelError, ModelResult};

/// Standard-form coefficients of `f(x) = a·x² + b·x + c`.
///
/// Construction does not validate `a`; operations that need a parabola
/// reject `a == 0` with [`ModelError::InvalidCoefficient`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadraticCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl QuadraticCoefficients {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Reject a zero leading coefficient
    pub fn validate(&self) -> ModelResult<()> {
        if self.a == 0.0 || !self.a.is_finite() {
            return Err(ModelError::InvalidCoefficient { a: self.a });
        }
        Ok(())
    }

    /// Evaluate `a·x² + b·x + c` (Horner form)
    pub fn evaluate(&self, x: f64) -> f64 {
        (self.a * x + self.b) * x + self.c
    }

    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4.0 * self.a * self.c
    }

    /// True when the parabola opens upward (vertex is a minimum)
    pub fn opens_upward(&self) -> bool {
        self.a > 0.0
    }
}

impl std::fmt::Display for QuadraticCoefficients {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x² {} {}x {} {}",
            self.a,
            sign(self.b), self.b.abs(),
            sign(self.c), self.c.abs())
    }
}

/// Vertex form `a·(x - h)² + k`; `(h, k)` is the turning point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexForm {
    pub a: f64,
    pub h: f64,
    pub k: f64,
}

impl VertexForm {
    pub fn evaluate(&self, x: f64) -> f64 {
        let dx = x - self.h;
        self.a * dx * dx + self.k
    }

    /// The vertical line `x = h` the parabola is symmetric about
    pub fn axis_of_symmetry(&self) -> f64 {
        self.h
    }

    /// Expand back into standard form: `a·x² - 2ah·x + (ah² + k)`
    pub fn to_standard_form(&self) -> QuadraticCoefficients {
        QuadraticCoefficients {
            a: self.a,
            b: -2.0 * self.a * self.h,
            c: self.a * self.h * self.h + self.k,
        }
    }
}

impl std::fmt::Display for VertexForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // a(x - h)² + k, written with the sign folded in: h = -3 reads "(x + 3)"
        write!(f, "{}(x {} {})² {} {}",
            self.a,
            sign(-self.h), self.h.abs(),
            sign(self.k), self.k.abs())
    }
}

/// The equation `a·x² + b·x + c = 0` rewritten as `(x - p)² = q`.
///
/// The intermediate terms are the ones a student writes down: divide through
/// by `a`, take half the linear coefficient, square it and add it to both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletedSquare {
    /// Half of the linear coefficient after dividing by `a`: `b / 2a`
    pub half_linear: f64,
    /// The term added to both sides: `(b / 2a)²`
    pub square_term: f64,
    pub p: f64,
    pub q: f64,
}

/// Convert standard form to vertex form.
///
/// `h = -b / 2a`, `k = a·h² + b·h + c`. Fails when `a == 0`.
pub fn to_vertex_form(coeffs: &QuadraticCoefficients) -> ModelResult<VertexForm> {
    coeffs.validate()?;

    let h = -coeffs.b / (2.0 * coeffs.a);
    let k = coeffs.a * h * h + coeffs.b * h + coeffs.c;

    Ok(VertexForm { a: coeffs.a, h, k })
}

/// Height of the trajectory at a horizontal distance. May be negative.
pub fn height_at(coeffs: &QuadraticCoefficients, distance: f64) -> f64 {
    coeffs.evaluate(distance)
}

/// Horizontal range assuming the parabola is symmetric about its vertex.
///
/// Returns `2h` (= `-b/a`), the second root of `a·x² + b·x = 0`. This is exact
/// only when launch and landing heights coincide (`c == 0` in a frame measured
/// from the ground). For an elevated release (`c != 0`) it is an approximation
/// that ignores the extra drop below launch height; use [`landing_distance`]
/// for the exact ground contact point.
pub fn ground_range(coeffs: &QuadraticCoefficients) -> ModelResult<f64> {
    let vertex = to_vertex_form(coeffs)?;
    Ok(2.0 * vertex.h)
}

/// Strictly above `threshold_height` at `distance` (net, crossbar, defenders).
pub fn clears(coeffs: &QuadraticCoefficients, distance: f64, threshold_height: f64) -> bool {
    height_at(coeffs, distance) > threshold_height
}

/// `|value - target| <= tolerance`; used for make/miss and lands-in-box checks.
pub fn is_within_tolerance(value: f64, target: f64, tolerance: f64) -> bool {
    (value - target).abs() <= tolerance
}

/// Complete the square for `a·x² + b·x + c = 0`.
pub fn complete_the_square(coeffs: &QuadraticCoefficients) -> ModelResult<CompletedSquare> {
    coeffs.validate()?;

    let half_linear = coeffs.b / (2.0 * coeffs.a);
    let square_term = half_linear * half_linear;

    Ok(CompletedSquare {
        half_linear,
        square_term,
        p: -half_linear,
        q: square_term - coeffs.c / coeffs.a,
    })
}

/// Real roots of `a·x² + b·x + c = 0`, smallest first. `None` when the
/// parabola never touches zero.
pub fn real_roots(coeffs: &QuadraticCoefficients) -> ModelResult<Option<(f64, f64)>> {
    let square = complete_the_square(coeffs)?;

    // Double roots can land a hair below zero after rounding
    let q = if square.q < 0.0 && square.q > -NUMERICAL_TOLERANCE {
        0.0
    } else {
        square.q
    };
    if q < 0.0 {
        return Ok(None);
    }

    let s = q.sqrt();
    Ok(Some((square.p - s, square.p + s)))
}

/// Furthest non-negative distance at which the trajectory is at
/// `landing_height`, or `None` if it never gets there going forward.
pub fn landing_distance(
    coeffs: &QuadraticCoefficients,
    landing_height: f64,
) -> ModelResult<Option<f64>> {
    let shifted = QuadraticCoefficients {
        c: coeffs.c - landing_height,
        ..*coeffs
    };

    Ok(match real_roots(&shifted)? {
        Some((_, far)) if far >= 0.0 => Some(far),
        _ => None,
    })
}

fn sign(value: f64) -> char {
    if value.is_sign_negative() { '-' } else { '+' }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_vertex_form_basic() {
        let coeffs = QuadraticCoefficients::new(1.0, 6.0, 5.0);
        let vertex = to_vertex_form(&coeffs).unwrap();
        assert_abs_diff_eq!(vertex.h, -3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vertex.k, -4.0, epsilon = 1e-12);
        assert_eq!(vertex.a, 1.0);
        assert_abs_diff_eq!(height_at(&coeffs, -3.0), -4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(height_at(&coeffs, 0.0), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vertex_form_scaled_leading_coefficient() {
        let vertex = to_vertex_form(&QuadraticCoefficients::new(2.0, 12.0, 10.0)).unwrap();
        assert_abs_diff_eq!(vertex.h, -3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vertex.k, -8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vertex_form_rejects_linear() {
        let err = to_vertex_form(&QuadraticCoefficients::new(0.0, 3.0, 1.0)).unwrap_err();
        assert_eq!(err, ModelError::InvalidCoefficient { a: 0.0 });
        assert!(ground_range(&QuadraticCoefficients::new(0.0, 1.0, 0.0)).is_err());
        assert!(complete_the_square(&QuadraticCoefficients::new(-0.0, 1.0, 0.0)).is_err());
    }

    #[test]
    fn test_vertex_round_trip_to_standard_form() {
        let coeffs = QuadraticCoefficients::new(-0.05, 0.6, 6.0);
        let back = to_vertex_form(&coeffs).unwrap().to_standard_form();
        assert_abs_diff_eq!(back.a, coeffs.a, epsilon = 1e-12);
        assert_abs_diff_eq!(back.b, coeffs.b, epsilon = 1e-12);
        assert_abs_diff_eq!(back.c, coeffs.c, epsilon = 1e-12);
    }

    #[test]
    fn test_basketball_free_throw() {
        let coeffs = QuadraticCoefficients::new(-0.05, 0.6, 6.0);
        let vertex = to_vertex_form(&coeffs).unwrap();
        assert_abs_diff_eq!(vertex.h, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(vertex.k, 7.8, epsilon = 1e-12);

        // Already descending below rim height 15 ft out
        assert!(!clears(&coeffs, 15.0, 10.0));
        assert!(clears(&coeffs, 6.0, 7.0));
    }

    #[test]
    fn test_clears_is_strict() {
        let coeffs = QuadraticCoefficients::new(1.0, 0.0, 0.0);
        // height_at(2) == 4 exactly, so equality does not clear
        assert!(!clears(&coeffs, 2.0, 4.0));
        assert!(clears(&coeffs, 2.0, 3.999));
    }

    #[test]
    fn test_is_within_tolerance() {
        assert!(is_within_tolerance(9.6, 10.0, 0.5));
        assert!(!is_within_tolerance(8.0, 10.0, 0.5));
        assert!(is_within_tolerance(10.5, 10.0, 0.5));
        assert!(is_within_tolerance(3.0, 3.0, 0.0));
    }

    #[test]
    fn test_ground_range_symmetric_launch() {
        // Launched from the ground: roots at 0 and 2h
        let coeffs = QuadraticCoefficients::new(-0.01, 1.0, 0.0);
        let range = ground_range(&coeffs).unwrap();
        assert_abs_diff_eq!(range, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(height_at(&coeffs, range), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ground_range_underestimates_elevated_release() {
        let coeffs = QuadraticCoefficients::new(-0.05, 0.6, 6.0);
        let symmetric = ground_range(&coeffs).unwrap();
        let exact = landing_distance(&coeffs, 0.0).unwrap().unwrap();
        assert_abs_diff_eq!(symmetric, 12.0, epsilon = 1e-9);
        // Ball released 6 ft up keeps falling past 2h
        assert!(exact > symmetric);
        assert_abs_diff_eq!(height_at(&coeffs, exact), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_complete_the_square_steps() {
        // x² + 6x + 5 = 0  ->  (x + 3)² = 4
        let square = complete_the_square(&QuadraticCoefficients::new(1.0, 6.0, 5.0)).unwrap();
        assert_abs_diff_eq!(square.half_linear, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(square.square_term, 9.0, epsilon = 1e-12);
        assert_abs_diff_eq!(square.p, -3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(square.q, 4.0, epsilon = 1e-12);

        // q == -k/a
        let coeffs = QuadraticCoefficients::new(2.0, 12.0, 10.0);
        let square = complete_the_square(&coeffs).unwrap();
        let vertex = to_vertex_form(&coeffs).unwrap();
        assert_abs_diff_eq!(square.q, -vertex.k / vertex.a, epsilon = 1e-12);
    }

    #[test]
    fn test_real_roots() {
        let roots = real_roots(&QuadraticCoefficients::new(1.0, 6.0, 5.0)).unwrap().unwrap();
        assert_abs_diff_eq!(roots.0, -5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(roots.1, -1.0, epsilon = 1e-12);

        // Double root
        let roots = real_roots(&QuadraticCoefficients::new(1.0, -4.0, 4.0)).unwrap().unwrap();
        assert_abs_diff_eq!(roots.0, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(roots.1, 2.0, epsilon = 1e-9);

        // Never touches zero
        assert_eq!(real_roots(&QuadraticCoefficients::new(1.0, 0.0, 1.0)).unwrap(), None);
    }

    #[test]
    fn test_landing_distance_never_reached() {
        // Parabola peaks at 7.8, so it never reaches 9
        let coeffs = QuadraticCoefficients::new(-0.05, 0.6, 6.0);
        assert_eq!(landing_distance(&coeffs, 9.0).unwrap(), None);
        // Both crossings of y = 10 are behind the launch point
        let behind = QuadraticCoefficients::new(-1.0, -10.0, 0.0);
        assert_eq!(landing_distance(&behind, 10.0).unwrap(), None);
    }

    #[test]
    fn test_discriminant_and_direction() {
        let coeffs = QuadraticCoefficients::new(1.0, 6.0, 5.0);
        assert_eq!(coeffs.discriminant(), 16.0);
        assert!(coeffs.opens_upward());
        assert!(!QuadraticCoefficients::new(-0.05, 0.6, 6.0).opens_upward());
    }

    #[test]
    fn test_display() {
        let coeffs = QuadraticCoefficients::new(1.0, 6.0, 5.0);
        assert_eq!(format!("{}", coeffs), "1x² + 6x + 5");
        let vertex = to_vertex_form(&coeffs).unwrap();
        assert_eq!(format!("{}", vertex), "1(x + 3)² - 4");
    }
}
