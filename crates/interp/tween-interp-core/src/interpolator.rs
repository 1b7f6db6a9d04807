//! Config-driven interpolator used by interpolation nodes.

use tween_api_core::Value;

use crate::config::{InterpolationConfig, OutputRange};
use crate::context::InterpContext;
use crate::error::InterpError;
use crate::numeric::NumericInterpolator;
use crate::string::StringInterpolator;

#[derive(Clone, Debug, PartialEq)]
pub enum Interpolator {
    Numeric(NumericInterpolator),
    Text(StringInterpolator),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Interpolated {
    Number(f64),
    Text(String),
}

impl From<Interpolated> for Value {
    fn from(i: Interpolated) -> Self {
        match i {
            Interpolated::Number(n) => Value::Number(n),
            Interpolated::Text(s) => Value::Text(s),
        }
    }
}

impl Interpolator {
    /// Validate `config` and compile it against `ctx`.
    pub fn new(config: &InterpolationConfig, ctx: &InterpContext) -> Result<Self, InterpError> {
        let easing = config.easing.clone().unwrap_or_default();
        let extrapolate = config.extrapolation();
        match &config.output_range {
            OutputRange::Numbers(out) => Ok(Interpolator::Numeric(NumericInterpolator::new(
                config.input_range.clone(),
                out.clone(),
                easing,
                extrapolate,
            )?)),
            OutputRange::Strings(out) => Ok(Interpolator::Text(StringInterpolator::new(
                ctx,
                config.input_range.clone(),
                out,
                easing,
                extrapolate,
            )?)),
        }
    }

    pub fn evaluate(&self, x: f64) -> Interpolated {
        match self {
            Interpolator::Numeric(f) => Interpolated::Number(f.evaluate(x)),
            Interpolator::Text(f) => Interpolated::Text(f.evaluate(x)),
        }
    }
}
