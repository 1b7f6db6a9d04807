use serde::{Deserialize, Serialize};
use tween_easing_core::Easing;

use super::Step;

fn default_duration() -> f64 {
    500.0
}

fn default_easing() -> Easing {
    Easing::ease_in_out(Easing::ease())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingConfig {
    pub to_value: f64,
    /// Milliseconds.
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default = "default_easing")]
    pub easing: Easing,
    /// Milliseconds before the tween starts.
    #[serde(default)]
    pub delay: f64,
}

impl TimingConfig {
    pub fn to(to_value: f64) -> Self {
        TimingConfig {
            to_value,
            duration: default_duration(),
            easing: default_easing(),
            delay: 0.0,
        }
    }

    pub fn duration(mut self, ms: f64) -> Self {
        self.duration = ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn delay(mut self, ms: f64) -> Self {
        self.delay = ms;
        self
    }
}

#[derive(Clone, Debug)]
pub(crate) struct TimingState {
    config: TimingConfig,
    from: f64,
    start: Option<f64>,
}

impl TimingState {
    pub(crate) fn new(config: TimingConfig, from: f64) -> Self {
        TimingState {
            config,
            from,
            start: None,
        }
    }

    pub(crate) fn immediate(&self) -> Option<f64> {
        (self.config.duration <= 0.0 && self.config.delay <= 0.0).then_some(self.config.to_value)
    }

    pub(crate) fn step(&mut self, now: f64) -> Step {
        let start = *self.start.get_or_insert(now + self.config.delay);
        if now < start {
            return Step::waiting();
        }
        let TimingConfig {
            to_value, duration, ..
        } = self.config;
        if duration <= 0.0 {
            return Step::done(to_value);
        }
        let span = to_value - self.from;
        if now >= start + duration {
            return Step::done(self.from + self.config.easing.apply(1.0) * span);
        }
        let progress = (now - start) / duration;
        Step::running(self.from + self.config.easing.apply(progress) * span)
    }
}
