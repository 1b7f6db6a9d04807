//! tween-easing-core
//!
//! Easing curves mapping normalized progress in `[0, 1]` to eased progress,
//! including a cubic-bezier solver with a cached sample table per curve.

pub mod bezier;
pub mod easing;

pub use bezier::{BezierCurve, BezierError};
pub use easing::Easing;
