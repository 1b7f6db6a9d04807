//! Named easing curves and their in/out combinators.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::bezier::{BezierCurve, BezierError};

/// An easing curve. Evaluate with [`Easing::apply`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Easing {
    #[default]
    Linear,
    Quad,
    Cubic,
    Poly {
        n: f64,
    },
    Sin,
    Circle,
    Exp,
    /// Spring-like overshoot; `bounciness` 1 oscillates once.
    Elastic {
        bounciness: f64,
    },
    /// Pulls back before moving forward.
    Back {
        overshoot: f64,
    },
    Bounce,
    Bezier(BezierCurve),
    In {
        easing: Box<Easing>,
    },
    Out {
        easing: Box<Easing>,
    },
    InOut {
        easing: Box<Easing>,
    },
}

impl Easing {
    /// Standard `ease`: bezier(0.42, 0, 1, 1).
    pub fn ease() -> Self {
        match BezierCurve::new(0.42, 0.0, 1.0, 1.0) {
            Ok(curve) => Easing::Bezier(curve),
            Err(_) => Easing::Linear,
        }
    }

    pub fn bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, BezierError> {
        BezierCurve::new(x1, y1, x2, y2).map(Easing::Bezier)
    }

    pub fn poly(n: f64) -> Self {
        Easing::Poly { n }
    }

    pub fn elastic(bounciness: f64) -> Self {
        Easing::Elastic { bounciness }
    }

    pub fn back(overshoot: f64) -> Self {
        Easing::Back { overshoot }
    }

    /// Runs `easing` forwards.
    pub fn ease_in(easing: Easing) -> Self {
        Easing::In {
            easing: Box::new(easing),
        }
    }

    /// Runs `easing` backwards.
    pub fn ease_out(easing: Easing) -> Self {
        Easing::Out {
            easing: Box::new(easing),
        }
    }

    /// Forwards for the first half, backwards for the second.
    pub fn ease_in_out(easing: Easing) -> Self {
        Easing::InOut {
            easing: Box::new(easing),
        }
    }

    pub fn apply(&self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::Quad => t * t,
            Easing::Cubic => t * t * t,
            Easing::Poly { n } => t.powf(*n),
            Easing::Sin => 1.0 - (t * PI / 2.0).cos(),
            Easing::Circle => 1.0 - (1.0 - t * t).sqrt(),
            Easing::Exp => 2f64.powf(10.0 * (t - 1.0)),
            Easing::Elastic { bounciness } => {
                let p = bounciness * PI;
                1.0 - (t * PI / 2.0).cos().powi(3) * (t * p).cos()
            }
            Easing::Back { overshoot } => t * t * ((overshoot + 1.0) * t - overshoot),
            Easing::Bounce => bounce(t),
            Easing::Bezier(curve) => curve.solve(t),
            Easing::In { easing } => easing.apply(t),
            Easing::Out { easing } => 1.0 - easing.apply(1.0 - t),
            Easing::InOut { easing } => {
                if t < 0.5 {
                    easing.apply(t * 2.0) / 2.0
                } else {
                    1.0 - easing.apply((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }
}

fn bounce(t: f64) -> f64 {
    if t < 1.0 / 2.75 {
        return 7.5625 * t * t;
    }
    if t < 2.0 / 2.75 {
        let t2 = t - 1.5 / 2.75;
        return 7.5625 * t2 * t2 + 0.75;
    }
    if t < 2.5 / 2.75 {
        let t2 = t - 2.25 / 2.75;
        return 7.5625 * t2 * t2 + 0.9375;
    }
    let t2 = t - 2.625 / 2.75;
    7.5625 * t2 * t2 + 0.984375
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    #[test]
    fn curves_start_at_zero_and_end_at_one() {
        let curves = [
            Easing::Linear,
            Easing::Quad,
            Easing::Cubic,
            Easing::poly(4.0),
            Easing::Sin,
            Easing::Circle,
            Easing::elastic(1.0),
            Easing::back(1.70158),
            Easing::Bounce,
            Easing::ease(),
            Easing::ease_out(Easing::Quad),
            Easing::ease_in_out(Easing::Cubic),
        ];
        for curve in &curves {
            approx(curve.apply(0.0), 0.0, 1e-9);
            approx(curve.apply(1.0), 1.0, 1e-9);
        }
        // exp only approaches zero
        approx(Easing::Exp.apply(0.0), 2f64.powi(-10), 1e-12);
    }

    #[test]
    fn out_mirrors_in() {
        let quad_out = Easing::ease_out(Easing::Quad);
        approx(quad_out.apply(0.25), 1.0 - 0.75 * 0.75, 1e-12);
        let in_out = Easing::ease_in_out(Easing::Quad);
        approx(in_out.apply(0.5), 0.5, 1e-12);
        approx(in_out.apply(0.25), 0.125, 1e-12);
    }

    #[test]
    fn back_dips_below_zero() {
        assert!(Easing::back(1.70158).apply(0.2) < 0.0);
    }

    #[test]
    fn serde_uses_type_tags() {
        let easing = Easing::ease_in_out(Easing::bezier(0.25, 0.1, 0.25, 1.0).unwrap());
        let json = serde_json::to_value(&easing).unwrap();
        assert_eq!(json["type"], "inOut");
        assert_eq!(json["easing"]["type"], "bezier");
        assert_eq!(json["easing"]["x1"], 0.25);
        let back: Easing = serde_json::from_value(json).unwrap();
        assert_eq!(back, easing);

        let bad = serde_json::json!({"type": "bezier", "x1": 2.0, "y1": 0.0, "x2": 0.5, "y2": 1.0});
        assert!(serde_json::from_value::<Easing>(bad).is_err());
    }
}
