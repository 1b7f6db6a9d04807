//! Piecewise numeric interpolation.

use tween_easing_core::Easing;

use crate::error::InterpError;
use crate::extrapolate::{ExtrapolateConfig, Extrapolation};

/// One-shot interpolation of `x`. Validates the ranges on every call; build a
/// [`NumericInterpolator`] to validate once and evaluate many times.
pub fn interpolate(
    x: f64,
    input_range: &[f64],
    output_range: &[f64],
    extrapolate: impl Into<ExtrapolateConfig>,
) -> Result<f64, InterpError> {
    validate_input_range(input_range)?;
    validate_numeric_output(input_range, output_range)?;
    Ok(evaluate_ranges(
        x,
        input_range,
        output_range,
        &Easing::Linear,
        extrapolate.into(),
    ))
}

/// Validated numeric interpolator.
#[derive(Clone, Debug, PartialEq)]
pub struct NumericInterpolator {
    input_range: Vec<f64>,
    output_range: Vec<f64>,
    easing: Easing,
    extrapolate: ExtrapolateConfig,
}

impl NumericInterpolator {
    pub fn new(
        input_range: Vec<f64>,
        output_range: Vec<f64>,
        easing: Easing,
        extrapolate: ExtrapolateConfig,
    ) -> Result<Self, InterpError> {
        validate_input_range(&input_range)?;
        validate_numeric_output(&input_range, &output_range)?;
        Ok(NumericInterpolator {
            input_range,
            output_range,
            easing,
            extrapolate,
        })
    }

    pub fn input_range(&self) -> &[f64] {
        &self.input_range
    }

    pub fn output_range(&self) -> &[f64] {
        &self.output_range
    }

    pub fn extrapolate(&self) -> ExtrapolateConfig {
        self.extrapolate
    }

    #[inline]
    pub fn evaluate(&self, x: f64) -> f64 {
        evaluate_ranges(
            x,
            &self.input_range,
            &self.output_range,
            &self.easing,
            self.extrapolate,
        )
    }
}

/// Length, monotonicity and infinity checks on an input range.
pub(crate) fn validate_input_range(input_range: &[f64]) -> Result<(), InterpError> {
    check_stops("inputRange", input_range.len())?;
    check_infinite("inputRange", input_range)?;
    for (index, pair) in input_range.windows(2).enumerate() {
        let (prev, next) = (pair[0], pair[1]);
        // also rejects NaN stops
        if !(next >= prev) {
            return Err(InterpError::NonMonotonic {
                index: index + 1,
                prev,
                next,
            });
        }
    }
    Ok(())
}

pub(crate) fn check_stops(name: &'static str, len: usize) -> Result<(), InterpError> {
    if len < 2 {
        return Err(InterpError::TooFewStops { name, len });
    }
    Ok(())
}

pub(crate) fn check_lengths(input: usize, output: usize) -> Result<(), InterpError> {
    if input != output {
        return Err(InterpError::LengthMismatch { input, output });
    }
    Ok(())
}

fn validate_numeric_output(input_range: &[f64], output_range: &[f64]) -> Result<(), InterpError> {
    check_stops("outputRange", output_range.len())?;
    check_infinite("outputRange", output_range)?;
    check_lengths(input_range.len(), output_range.len())
}

fn check_infinite(name: &'static str, range: &[f64]) -> Result<(), InterpError> {
    if range.len() == 2 && range[0] == f64::NEG_INFINITY && range[1] == f64::INFINITY {
        return Err(InterpError::InfiniteRange { name });
    }
    Ok(())
}

/// Index of the segment `[i, i + 1]` used for `x`; the outermost segments
/// cover everything beyond the range.
pub(crate) fn find_range(x: f64, input_range: &[f64]) -> usize {
    let last = input_range.len() - 1;
    let mut i = 1;
    while i < last {
        if input_range[i] >= x {
            break;
        }
        i += 1;
    }
    i - 1
}

/// Unchecked evaluation; ranges must already be validated.
pub(crate) fn evaluate_ranges(
    x: f64,
    input_range: &[f64],
    output_range: &[f64],
    easing: &Easing,
    extrapolate: ExtrapolateConfig,
) -> f64 {
    let i = find_range(x, input_range);
    interpolate_segment(
        x,
        (input_range[i], input_range[i + 1]),
        (output_range[i], output_range[i + 1]),
        easing,
        extrapolate,
    )
}

fn interpolate_segment(
    x: f64,
    (input_min, input_max): (f64, f64),
    (output_min, output_max): (f64, f64),
    easing: &Easing,
    extrapolate: ExtrapolateConfig,
) -> f64 {
    let mut result = x;

    if result < input_min {
        match extrapolate.extrapolate_left {
            Extrapolation::Identity => return result,
            Extrapolation::Clamp => result = input_min,
            Extrapolation::Extend => {}
        }
    }
    if result > input_max {
        match extrapolate.extrapolate_right {
            Extrapolation::Identity => return result,
            Extrapolation::Clamp => result = input_max,
            Extrapolation::Extend => {}
        }
    }

    if output_min == output_max {
        return output_min;
    }
    if input_min == input_max {
        return if x <= input_min { output_min } else { output_max };
    }

    // normalize
    if input_min == f64::NEG_INFINITY {
        result = -result;
    } else if input_max == f64::INFINITY {
        result -= input_min;
    } else {
        result = (result - input_min) / (input_max - input_min);
    }

    result = easing.apply(result);

    // scale
    if output_min == f64::NEG_INFINITY {
        -result
    } else if output_max == f64::INFINITY {
        result + output_min
    } else {
        result * (output_max - output_min) + output_min
    }
}
