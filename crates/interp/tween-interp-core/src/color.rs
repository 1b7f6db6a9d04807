//! Channel-wise color interpolation in RGB or HSV space.
//!
//! Channels always clamp at the ends of the input range. RGB may blend in
//! linear light (`gamma != 1`); HSV may take the short way around the hue
//! wheel.

use serde::{Deserialize, Serialize};
use tween_api_core::coercion::format_number;
use tween_color_core::{ColorSource, Hsv, Rgba};
use tween_easing_core::Easing;

use crate::context::InterpContext;
use crate::error::InterpError;
use crate::extrapolate::ExtrapolateConfig;
use crate::numeric::{check_lengths, check_stops, evaluate_ranges, validate_input_range};

/// Offset of the synthetic stop inserted when the hue wraps.
const HUE_WRAP_EPSILON: f64 = 1e-5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSpace {
    #[default]
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "HSV")]
    Hsv,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorInterpolationOptions {
    pub gamma: f64,
    pub use_corrected_hsv_interpolation: bool,
}

impl Default for ColorInterpolationOptions {
    fn default() -> Self {
        ColorInterpolationOptions {
            gamma: 2.2,
            use_corrected_hsv_interpolation: true,
        }
    }
}

impl ColorInterpolationOptions {
    /// Straight sRGB blending; hue still takes the short way round.
    pub fn plain() -> Self {
        ColorInterpolationOptions {
            gamma: 1.0,
            use_corrected_hsv_interpolation: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Channels {
    /// r, g, b already in linear space when `gamma != 1`.
    Rgb {
        r: Vec<f64>,
        g: Vec<f64>,
        b: Vec<f64>,
        gamma: f64,
    },
    Hsv {
        /// Input stops for the hue channel, with wrap breakpoints inserted.
        hue_input: Vec<f64>,
        h: Vec<f64>,
        s: Vec<f64>,
        v: Vec<f64>,
    },
}

/// Validated color interpolator; evaluation is infallible.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorInterpolator {
    input_range: Vec<f64>,
    alpha: Vec<f64>,
    channels: Channels,
}

impl ColorInterpolator {
    pub fn new(
        input_range: Vec<f64>,
        colors: &[Rgba],
        space: ColorSpace,
        options: ColorInterpolationOptions,
    ) -> Result<Self, InterpError> {
        validate_input_range(&input_range)?;
        check_stops("outputRange", colors.len())?;
        check_lengths(input_range.len(), colors.len())?;

        let alpha = colors.iter().map(|c| c.a).collect();
        let channels = match space {
            ColorSpace::Rgb => {
                let gamma = options.gamma;
                let linear = |c: f64| if gamma == 1.0 { c } else { (c / 255.0).powf(gamma) };
                Channels::Rgb {
                    r: colors.iter().map(|c| linear(c.r)).collect(),
                    g: colors.iter().map(|c| linear(c.g)).collect(),
                    b: colors.iter().map(|c| linear(c.b)).collect(),
                    gamma,
                }
            }
            ColorSpace::Hsv => {
                let hsv: Vec<Hsv> = colors.iter().map(Rgba::to_hsv).collect();
                let h: Vec<f64> = hsv.iter().map(|c| c.h).collect();
                let (hue_input, h) = if options.use_corrected_hsv_interpolation {
                    correct_hue(&input_range, &h)
                } else {
                    (input_range.clone(), h)
                };
                Channels::Hsv {
                    hue_input,
                    h,
                    s: hsv.iter().map(|c| c.s).collect(),
                    v: hsv.iter().map(|c| c.v).collect(),
                }
            }
        };

        Ok(ColorInterpolator {
            input_range,
            alpha,
            channels,
        })
    }

    /// Parse every output entry with the context's color parser first.
    pub fn from_sources<'a, S>(
        ctx: &InterpContext,
        input_range: Vec<f64>,
        output_range: impl IntoIterator<Item = S>,
        space: ColorSpace,
        options: ColorInterpolationOptions,
    ) -> Result<Self, InterpError>
    where
        S: Into<ColorSource<'a>>,
    {
        let colors = output_range
            .into_iter()
            .map(|entry| {
                let source = entry.into();
                ctx.colors()
                    .normalize(source)
                    .map(Rgba::from_packed)
                    .ok_or_else(|| InterpError::NotAColor {
                        value: describe(source),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(input_range, &colors, space, options)
    }

    pub fn evaluate(&self, x: f64) -> Rgba {
        let clamp = ExtrapolateConfig::clamp();
        let channel = |input: &[f64], output: &[f64]| {
            evaluate_ranges(x, input, output, &Easing::Linear, clamp)
        };
        let a = channel(&self.input_range, &self.alpha);

        match &self.channels {
            Channels::Rgb { r, g, b, gamma } => {
                let (r, g, b) = (
                    channel(&self.input_range, r),
                    channel(&self.input_range, g),
                    channel(&self.input_range, b),
                );
                if *gamma == 1.0 {
                    Rgba::new(r, g, b, a)
                } else {
                    let back = |c: f64| (c.powf(1.0 / gamma) * 255.0).round();
                    Rgba::new(back(r), back(g), back(b), a)
                }
            }
            Channels::Hsv { hue_input, h, s, v } => {
                let h = (channel(hue_input, h) + 1.0) % 1.0;
                let hsv = Hsv {
                    h,
                    s: channel(&self.input_range, s),
                    v: channel(&self.input_range, v),
                };
                Rgba::from_hsv(hsv, a)
            }
        }
    }
}

/// Insert a breakpoint wherever consecutive hues are more than half the
/// wheel apart, so the hue travels the short way and wraps through 0/1.
fn correct_hue(input_range: &[f64], hues: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut input = vec![input_range[0]];
    let mut out = vec![hues[0]];
    for i in 1..hues.len() {
        let d = hues[i] - hues[i - 1];
        // never past the following stop
        let wrap = match input_range.get(i + 1) {
            Some(&next) => (input_range[i] + HUE_WRAP_EPSILON).min(next),
            None => input_range[i] + HUE_WRAP_EPSILON,
        };
        if d > 0.5 {
            input.extend([input_range[i], wrap]);
            out.extend([hues[i] - 1.0, hues[i]]);
        } else if d < -0.5 {
            input.extend([input_range[i], wrap]);
            out.extend([hues[i] + 1.0, hues[i]]);
        } else {
            input.push(input_range[i]);
            out.push(hues[i]);
        }
    }
    (input, out)
}

fn describe(source: ColorSource<'_>) -> String {
    match source {
        ColorSource::Packed(n) => format_number(n),
        ColorSource::Css(s) => s.to_owned(),
    }
}

/// Interpolate between colors with plain (gamma 1) RGB blending or
/// hue-corrected HSV.
pub fn interpolate_color<'a, S>(
    ctx: &InterpContext,
    value: f64,
    input_range: &[f64],
    output_range: impl IntoIterator<Item = S>,
    space: ColorSpace,
) -> Result<Rgba, InterpError>
where
    S: Into<ColorSource<'a>>,
{
    interpolate_color_with(
        ctx,
        value,
        input_range,
        output_range,
        space,
        &ColorInterpolationOptions::plain(),
    )
}

pub fn interpolate_color_with<'a, S>(
    ctx: &InterpContext,
    value: f64,
    input_range: &[f64],
    output_range: impl IntoIterator<Item = S>,
    space: ColorSpace,
    options: &ColorInterpolationOptions,
) -> Result<Rgba, InterpError>
where
    S: Into<ColorSource<'a>>,
{
    let f = ColorInterpolator::from_sources(ctx, input_range.to_vec(), output_range, space, *options)?;
    Ok(f.evaluate(value))
}
