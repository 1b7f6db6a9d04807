use serde::{Deserialize, Serialize};

use super::Step;

fn default_deceleration() -> f64 {
    0.998
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayConfig {
    /// Initial velocity, units per millisecond.
    pub velocity: f64,
    #[serde(default = "default_deceleration")]
    pub deceleration: f64,
}

impl DecayConfig {
    pub fn new(velocity: f64) -> Self {
        DecayConfig {
            velocity,
            deceleration: default_deceleration(),
        }
    }
}

/// Finished once a frame moves less than this.
const MIN_FRAME_DELTA: f64 = 0.1;

#[derive(Clone, Debug)]
pub(crate) struct DecayState {
    config: DecayConfig,
    from: f64,
    start: Option<f64>,
    last_value: f64,
}

impl DecayState {
    pub(crate) fn new(config: DecayConfig, from: f64) -> Self {
        DecayState {
            config,
            from,
            start: None,
            last_value: from,
        }
    }

    pub(crate) fn step(&mut self, now: f64) -> Step {
        let Some(start) = self.start else {
            self.start = Some(now);
            return Step::running(self.from);
        };
        let k = 1.0 - self.config.deceleration;
        let value = self.from + (self.config.velocity / k) * (1.0 - (-k * (now - start)).exp());
        if (self.last_value - value).abs() < MIN_FRAME_DELTA {
            return Step::done(value);
        }
        self.last_value = value;
        Step::running(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decelerates_towards_asymptote() {
        let mut d = DecayState::new(DecayConfig::new(1.0), 0.0);
        assert_eq!(d.step(0.0), Step::running(0.0));
        let mut now = 0.0;
        let mut last = 0.0;
        let mut deltas = Vec::new();
        loop {
            now += 16.0;
            let step = d.step(now);
            let v = step.value.unwrap();
            deltas.push(v - last);
            last = v;
            if step.finished {
                break;
            }
            assert!(now < 60_000.0, "decay never settled");
        }
        // asymptote is v / (1 - deceleration) = 500
        assert!(last < 500.0 && last > 450.0, "{last}");
        assert!(deltas.windows(2).all(|w| w[1] <= w[0]));
    }
}
