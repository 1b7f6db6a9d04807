//! Frame-driven animations of value nodes.
//!
//! - [`timing`]: eased tween over a fixed duration.
//! - [`spring`]: analytic damped harmonic oscillator.
//! - [`decay`]: exponential deceleration from an initial velocity.
//! - [`driver`]: starting, stopping and stepping animations on a
//!   [`NodeGraph`](crate::NodeGraph).

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

pub mod decay;
pub mod driver;
pub mod spring;
pub mod timing;

pub use decay::DecayConfig;
pub use driver::FrameRequests;
pub use spring::SpringConfig;
pub use timing::TimingConfig;

use decay::DecayState;
use spring::SpringState;
use timing::TimingState;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnimationConfig {
    Timing(TimingConfig),
    Spring(SpringConfig),
    Decay(DecayConfig),
}

impl AnimationConfig {
    /// Same animation aimed at `to_value`. Decay has no target and is
    /// returned unchanged.
    pub fn with_to_value(&self, to_value: f64) -> Self {
        match self {
            AnimationConfig::Timing(c) => AnimationConfig::Timing(TimingConfig { to_value, ..c.clone() }),
            AnimationConfig::Spring(c) => AnimationConfig::Spring(SpringConfig { to_value, ..c.clone() }),
            AnimationConfig::Decay(c) => AnimationConfig::Decay(c.clone()),
        }
    }

    /// Reject parameters that would never settle or would produce NaN.
    pub fn validate(&self) -> Result<(), GraphError> {
        match self {
            AnimationConfig::Timing(c) => {
                let check = Check("timing");
                check.finite("toValue", c.to_value)?;
                check.non_negative("duration", c.duration)?;
                check.non_negative("delay", c.delay)
            }
            AnimationConfig::Spring(c) => {
                let check = Check("spring");
                check.finite("toValue", c.to_value)?;
                check.finite("velocity", c.velocity)?;
                check.positive("stiffness", c.stiffness)?;
                check.positive("damping", c.damping)?;
                check.positive("mass", c.mass)?;
                check.non_negative("restDisplacementThreshold", c.rest_displacement_threshold)?;
                check.non_negative("restSpeedThreshold", c.rest_speed_threshold)?;
                check.non_negative("delay", c.delay)
            }
            AnimationConfig::Decay(c) => {
                let check = Check("decay");
                check.finite("velocity", c.velocity)?;
                if c.deceleration > 0.0 && c.deceleration < 1.0 {
                    Ok(())
                } else {
                    Err(check.fail("deceleration", "between 0 and 1 exclusive", c.deceleration))
                }
            }
        }
    }
}

struct Check(&'static str);

impl Check {
    fn fail(&self, field: &'static str, rule: &'static str, value: f64) -> GraphError {
        GraphError::InvalidAnimation {
            kind: self.0,
            field,
            rule,
            value,
        }
    }

    fn finite(&self, field: &'static str, value: f64) -> Result<(), GraphError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(self.fail(field, "finite", value))
        }
    }

    fn positive(&self, field: &'static str, value: f64) -> Result<(), GraphError> {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(self.fail(field, "a positive finite number", value))
        }
    }

    fn non_negative(&self, field: &'static str, value: f64) -> Result<(), GraphError> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(self.fail(field, "a non-negative finite number", value))
        }
    }
}

impl From<TimingConfig> for AnimationConfig {
    fn from(c: TimingConfig) -> Self {
        AnimationConfig::Timing(c)
    }
}

impl From<SpringConfig> for AnimationConfig {
    fn from(c: SpringConfig) -> Self {
        AnimationConfig::Spring(c)
    }
}

impl From<DecayConfig> for AnimationConfig {
    fn from(c: DecayConfig) -> Self {
        AnimationConfig::Decay(c)
    }
}

/// Passed to the completion callback exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationResult {
    /// `false` when stopped, replaced or detached before completing.
    pub finished: bool,
    /// Value of the node when the animation ended.
    pub value: f64,
}

pub type EndCallback = Box<dyn FnOnce(AnimationResult)>;

/// Outcome of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// New node value; `None` while waiting out a delay.
    pub value: Option<f64>,
    pub finished: bool,
}

impl Step {
    fn running(value: f64) -> Self {
        Step {
            value: Some(value),
            finished: false,
        }
    }

    fn done(value: f64) -> Self {
        Step {
            value: Some(value),
            finished: true,
        }
    }

    fn waiting() -> Self {
        Step {
            value: None,
            finished: false,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum AnimationState {
    Timing(TimingState),
    Spring(SpringState),
    Decay(DecayState),
}

impl AnimationState {
    pub(crate) fn new(config: &AnimationConfig, from: f64) -> Self {
        match config {
            AnimationConfig::Timing(c) => AnimationState::Timing(TimingState::new(c.clone(), from)),
            AnimationConfig::Spring(c) => AnimationState::Spring(SpringState::new(c.clone(), from)),
            AnimationConfig::Decay(c) => AnimationState::Decay(DecayState::new(c.clone(), from)),
        }
    }

    /// Finishes without any frame (zero-duration timing).
    pub(crate) fn immediate(&self) -> Option<f64> {
        match self {
            AnimationState::Timing(t) => t.immediate(),
            _ => None,
        }
    }

    pub(crate) fn step(&mut self, now_ms: f64, max_step_ms: f64) -> Step {
        match self {
            AnimationState::Timing(t) => t.step(now_ms),
            AnimationState::Spring(s) => s.step(now_ms, max_step_ms),
            AnimationState::Decay(d) => d.step(now_ms),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            AnimationState::Timing(_) => "timing",
            AnimationState::Spring(_) => "spring",
            AnimationState::Decay(_) => "decay",
        }
    }
}
