//! Interpolation of numbers embedded in strings: `"0deg"` → `"90deg"`,
//! `"rgba(0, 0, 0, 1)"` → `"#ff0000"`, shadow offsets and the like.

use tween_api_core::coercion::format_number;
use tween_color_core::Rgba;
use tween_easing_core::Easing;

use crate::context::InterpContext;
use crate::error::InterpError;
use crate::extrapolate::ExtrapolateConfig;
use crate::numeric::{check_lengths, check_stops, validate_input_range, NumericInterpolator};

/// Each output stop is split into literal text and numeric slots; the
/// literals must agree across stops and every slot is interpolated on its
/// own.
#[derive(Clone, Debug, PartialEq)]
pub struct StringInterpolator {
    /// `slots.len() + 1` pieces surrounding the numbers.
    literals: Vec<String>,
    slots: Vec<NumericInterpolator>,
    round_rgb: bool,
}

impl StringInterpolator {
    pub fn new(
        ctx: &InterpContext,
        input_range: Vec<f64>,
        output_range: &[String],
        easing: Easing,
        extrapolate: ExtrapolateConfig,
    ) -> Result<Self, InterpError> {
        validate_input_range(&input_range)?;
        check_stops("outputRange", output_range.len())?;
        check_lengths(input_range.len(), output_range.len())?;

        let normalized: Vec<String> = output_range
            .iter()
            .map(|s| color_to_rgba(ctx, s))
            .collect();

        let (literals, first_numbers) = decompose(ctx, &normalized[0]);
        let mut per_stop = vec![first_numbers];
        for other in &normalized[1..] {
            let (other_literals, numbers) = decompose(ctx, other);
            if other_literals != literals {
                return Err(InterpError::PatternMismatch {
                    first: normalized[0].clone(),
                    other: other.clone(),
                });
            }
            per_stop.push(numbers);
        }

        let slot_count = literals.len() - 1;
        let mut slots = Vec::with_capacity(slot_count);
        for j in 0..slot_count {
            let outputs: Vec<f64> = per_stop.iter().map(|numbers| numbers[j]).collect();
            slots.push(NumericInterpolator::new(
                input_range.clone(),
                outputs,
                easing.clone(),
                extrapolate,
            )?);
        }

        Ok(StringInterpolator {
            literals,
            slots,
            round_rgb: normalized[0].starts_with("rgb"),
        })
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn evaluate(&self, x: f64) -> String {
        let mut out = String::new();
        for (i, slot) in self.slots.iter().enumerate() {
            out.push_str(&self.literals[i]);
            let mut v = slot.evaluate(x);
            if self.round_rgb {
                // color channels are integers, alpha keeps 3 decimals
                v = if i < 3 {
                    v.round()
                } else {
                    (v * 1000.0).round() / 1000.0
                };
            }
            out.push_str(&format_number(v));
        }
        if let Some(tail) = self.literals.last() {
            out.push_str(tail);
        }
        out
    }
}

/// Colors become `rgba(R, G, B, A)`; anything else passes through.
fn color_to_rgba(ctx: &InterpContext, s: &str) -> String {
    match ctx.colors().normalize(s) {
        Some(packed) => Rgba::from_packed(packed).to_rgba_string(),
        None => s.to_owned(),
    }
}

fn decompose(ctx: &InterpContext, s: &str) -> (Vec<String>, Vec<f64>) {
    let mut literals = Vec::new();
    let mut numbers = Vec::new();
    let mut last = 0;
    for m in ctx.numbers().find_iter(s) {
        let Ok(n) = m.as_str().parse::<f64>() else {
            continue;
        };
        literals.push(s[last..m.start()].to_owned());
        numbers.push(n);
        last = m.end();
    }
    literals.push(s[last..].to_owned());
    (literals, numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrapolate::Extrapolation;

    fn build(input: &[f64], output: &[&str]) -> Result<StringInterpolator, InterpError> {
        let ctx = InterpContext::new();
        let output: Vec<String> = output.iter().map(|s| s.to_string()).collect();
        StringInterpolator::new(
            &ctx,
            input.to_vec(),
            &output,
            Easing::Linear,
            ExtrapolateConfig::default(),
        )
    }

    #[test]
    fn units_survive() {
        let f = build(&[0.0, 1.0], &["0deg", "90deg"]).unwrap();
        assert_eq!(f.slot_count(), 1);
        assert_eq!(f.evaluate(0.5), "45deg");
        assert_eq!(f.evaluate(0.0), "0deg");
    }

    #[test]
    fn several_slots_interpolate_independently() {
        let f = build(&[0.0, 1.0], &["0px 10px 2px", "10px -10px 4px"]).unwrap();
        assert_eq!(f.evaluate(0.5), "5px 0px 3px");
    }

    #[test]
    fn colors_round_channels_and_alpha() {
        let f = build(&[0.0, 1.0], &["#000000", "rgba(255, 255, 255, 0)"]).unwrap();
        assert_eq!(f.evaluate(0.0), "rgba(0, 0, 0, 1)");
        assert_eq!(f.evaluate(0.5), "rgba(128, 128, 128, 0.5)");
        assert_eq!(f.evaluate(1.0), "rgba(255, 255, 255, 0)");
        assert_eq!(f.evaluate(1.0 / 3.0), "rgba(85, 85, 85, 0.667)");

        let named = build(&[0.0, 1.0], &["red", "blue"]).unwrap();
        assert_eq!(named.evaluate(0.5), "rgba(128, 0, 128, 1)");
    }

    #[test]
    fn extrapolation_applies_per_slot() {
        let ctx = InterpContext::new();
        let f = StringInterpolator::new(
            &ctx,
            vec![0.0, 1.0],
            &["0%".to_string(), "100%".to_string()],
            Easing::Linear,
            Extrapolation::Clamp.into(),
        )
        .unwrap();
        assert_eq!(f.evaluate(2.0), "100%");
        assert_eq!(f.evaluate(-1.0), "0%");
    }

    #[test]
    fn mismatched_patterns_are_rejected() {
        assert!(matches!(
            build(&[0.0, 1.0], &["0deg", "1rad"]),
            Err(InterpError::PatternMismatch { .. })
        ));
        assert!(matches!(
            build(&[0.0, 1.0], &["1 2", "12"]),
            Err(InterpError::PatternMismatch { .. })
        ));
        assert!(matches!(
            build(&[0.0, 1.0, 2.0], &["0", "1"]),
            Err(InterpError::LengthMismatch { input: 3, output: 2 })
        ));
    }

    #[test]
    fn decompose_number_shapes() {
        let ctx = InterpContext::new();
        let (lits, nums) = decompose(&ctx, "translate(-1.5e2px, .25)");
        assert_eq!(nums, vec![-150.0, 0.25]);
        assert_eq!(lits, vec!["translate(", "px, ", ")"]);
    }
}
