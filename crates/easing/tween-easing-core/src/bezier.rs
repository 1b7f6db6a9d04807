//! Cubic-bezier easing solver.
//!
//! The curve runs from `(0, 0)` to `(1, 1)` through the control points
//! `(x1, y1)` and `(x2, y2)`. Solving for a given `x` inverts the x polynomial
//! (sample table guess, Newton-Raphson, binary subdivision fallback) and
//! evaluates y at the recovered parameter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const NEWTON_ITERATIONS: usize = 4;
const NEWTON_MIN_SLOPE: f64 = 0.001;
const SUBDIVISION_PRECISION: f64 = 0.000_000_1;
const SUBDIVISION_MAX_ITERATIONS: usize = 10;

const SAMPLE_TABLE_SIZE: usize = 11;
const SAMPLE_STEP: f64 = 1.0 / (SAMPLE_TABLE_SIZE as f64 - 1.0);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BezierError {
    #[error("bezier x values must be in [0, 1], got x1 = {x1}, x2 = {x2}")]
    XOutOfRange { x1: f64, x2: f64 },
    #[error("bezier control points must be finite")]
    NonFinite,
}

/// Raw control points, also the serialized form of a [`BezierCurve`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoints {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// A validated cubic-bezier easing curve with its precomputed x samples.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ControlPoints", into = "ControlPoints")]
pub struct BezierCurve {
    points: ControlPoints,
    samples: [f64; SAMPLE_TABLE_SIZE],
}

#[inline]
fn coeff_a(a1: f64, a2: f64) -> f64 {
    1.0 - 3.0 * a2 + 3.0 * a1
}

#[inline]
fn coeff_b(a1: f64, a2: f64) -> f64 {
    3.0 * a2 - 6.0 * a1
}

#[inline]
fn coeff_c(a1: f64) -> f64 {
    3.0 * a1
}

/// x(t) or y(t) given the two inner control coordinates (Horner form).
#[inline]
fn calc_bezier(t: f64, a1: f64, a2: f64) -> f64 {
    ((coeff_a(a1, a2) * t + coeff_b(a1, a2)) * t + coeff_c(a1)) * t
}

/// dx/dt or dy/dt.
#[inline]
fn slope(t: f64, a1: f64, a2: f64) -> f64 {
    3.0 * coeff_a(a1, a2) * t * t + 2.0 * coeff_b(a1, a2) * t + coeff_c(a1)
}

impl BezierCurve {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, BezierError> {
        if !(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite()) {
            return Err(BezierError::NonFinite);
        }
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(BezierError::XOutOfRange { x1, x2 });
        }
        let mut samples = [0.0; SAMPLE_TABLE_SIZE];
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample = calc_bezier(i as f64 * SAMPLE_STEP, x1, x2);
        }
        Ok(Self {
            points: ControlPoints { x1, y1, x2, y2 },
            samples,
        })
    }

    pub fn control_points(&self) -> ControlPoints {
        self.points
    }

    /// `x1 == y1 && x2 == y2` describes the straight line y = x.
    pub fn is_linear(&self) -> bool {
        let p = self.points;
        p.x1 == p.y1 && p.x2 == p.y2
    }

    /// Eased y for progress `x`.
    pub fn solve(&self, x: f64) -> f64 {
        if self.is_linear() {
            return x;
        }
        // Exact at the boundaries; the numeric solve would drift by float error.
        if x == 0.0 {
            return 0.0;
        }
        if x == 1.0 {
            return 1.0;
        }
        let t = self.t_for_x(x);
        calc_bezier(t, self.points.y1, self.points.y2)
    }

    fn t_for_x(&self, x: f64) -> f64 {
        let ControlPoints { x1, x2, .. } = self.points;
        let last = SAMPLE_TABLE_SIZE - 1;

        let mut interval_start = 0.0;
        let mut current = 1;
        while current != last && self.samples[current] <= x {
            interval_start += SAMPLE_STEP;
            current += 1;
        }
        current -= 1;

        let span = self.samples[current + 1] - self.samples[current];
        let dist = if span != 0.0 {
            (x - self.samples[current]) / span
        } else {
            0.0
        };
        let guess = interval_start + dist * SAMPLE_STEP;

        let initial_slope = slope(guess, x1, x2);
        if initial_slope >= NEWTON_MIN_SLOPE {
            self.newton_raphson(x, guess)
        } else if initial_slope == 0.0 {
            guess
        } else {
            self.binary_subdivide(x, interval_start, interval_start + SAMPLE_STEP)
        }
    }

    fn newton_raphson(&self, x: f64, mut guess: f64) -> f64 {
        let ControlPoints { x1, x2, .. } = self.points;
        for _ in 0..NEWTON_ITERATIONS {
            let current_slope = slope(guess, x1, x2);
            if current_slope == 0.0 {
                return guess;
            }
            let current_x = calc_bezier(guess, x1, x2) - x;
            guess -= current_x / current_slope;
        }
        guess
    }

    fn binary_subdivide(&self, x: f64, mut lo: f64, mut hi: f64) -> f64 {
        let ControlPoints { x1, x2, .. } = self.points;
        let mut t = lo;
        for _ in 0..SUBDIVISION_MAX_ITERATIONS {
            t = lo + (hi - lo) / 2.0;
            let current_x = calc_bezier(t, x1, x2) - x;
            if current_x > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            if current_x.abs() <= SUBDIVISION_PRECISION {
                break;
            }
        }
        t
    }
}

impl TryFrom<ControlPoints> for BezierCurve {
    type Error = BezierError;

    fn try_from(p: ControlPoints) -> Result<Self, Self::Error> {
        BezierCurve::new(p.x1, p.y1, p.x2, p.y2)
    }
}

impl From<BezierCurve> for ControlPoints {
    fn from(curve: BezierCurve) -> Self {
        curve.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn rejects_x_outside_unit_interval() {
        assert_eq!(
            BezierCurve::new(1.5, 0.0, 0.5, 1.0),
            Err(BezierError::XOutOfRange { x1: 1.5, x2: 0.5 })
        );
        assert!(BezierCurve::new(0.5, 0.0, -0.1, 1.0).is_err());
        assert_eq!(
            BezierCurve::new(f64::NAN, 0.0, 0.5, 1.0),
            Err(BezierError::NonFinite)
        );
        // y may overshoot
        assert!(BezierCurve::new(0.5, -2.0, 0.5, 3.0).is_ok());
    }

    #[test]
    fn boundaries_are_exact() {
        let curve = BezierCurve::new(0.68, -0.6, 0.32, 1.6).unwrap();
        assert_eq!(curve.solve(0.0), 0.0);
        assert_eq!(curve.solve(1.0), 1.0);
    }

    #[test]
    fn linear_control_points_are_identity() {
        let curve = BezierCurve::new(0.3, 0.3, 0.7, 0.7).unwrap();
        for i in 0..=20 {
            let x = i as f64 / 20.0;
            assert_eq!(curve.solve(x), x);
        }
    }

    #[test]
    fn ease_matches_reference_points() {
        // CSS `ease-in-out`
        let curve = BezierCurve::new(0.42, 0.0, 0.58, 1.0).unwrap();
        approx(curve.solve(0.5), 0.5, 1e-6);
        assert!(curve.solve(0.25) < 0.25);
        assert!(curve.solve(0.75) > 0.75);
        // symmetric curve
        approx(curve.solve(0.3) + curve.solve(0.7), 1.0, 1e-6);
    }

    #[test]
    fn solved_parameter_reproduces_x() {
        let curve = BezierCurve::new(0.25, 0.1, 0.25, 1.0).unwrap();
        for i in 1..100 {
            let x = i as f64 / 100.0;
            let t = curve.t_for_x(x);
            approx(calc_bezier(t, 0.25, 0.25), x, 1e-5);
        }
    }

    #[test]
    fn flat_start_stays_in_range() {
        // x1 = x2 = 0 gives x(t) = t^3, nearly flat at the origin
        let curve = BezierCurve::new(0.0, 0.5, 0.0, 0.5).unwrap();
        let y = curve.solve(0.001);
        assert!(y.is_finite());
        assert!((0.0..=1.0).contains(&y));
        let t = curve.binary_subdivide(0.001, 0.0, SAMPLE_STEP);
        approx(t * t * t, 0.001, 1e-4);
    }
}
