//! tween-interp-core
//!
//! Maps an input scalar through a piecewise input/output range:
//! - [`numeric`]: per-segment linear mapping with easing and per-side
//!   extrapolation (extend, clamp, identity).
//! - [`string`]: interpolates every number embedded in a string template
//!   (colors are normalized to `rgba(...)` first).
//! - [`color`]: channel-wise RGB (optionally gamma corrected) or HSV
//!   interpolation between colors.
//!
//! Validation happens when an interpolator is built; evaluation never fails.

pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod extrapolate;
pub mod interpolator;
pub mod numeric;
pub mod string;

pub use color::{ColorInterpolationOptions, ColorInterpolator, ColorSpace};
pub use config::{InterpolationConfig, OutputRange};
pub use context::InterpContext;
pub use error::InterpError;
pub use extrapolate::{ExtrapolateConfig, Extrapolation};
pub use interpolator::{Interpolated, Interpolator};
pub use numeric::{interpolate, NumericInterpolator};
pub use string::StringInterpolator;
pub use tween_easing_core::Easing;
