//! Spring animation using the closed-form solution of a damped harmonic
//! oscillator, so results do not depend on frame rate.

use serde::{Deserialize, Serialize};

use super::Step;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpringConfig {
    pub to_value: f64,
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Initial velocity, units per second.
    pub velocity: f64,
    /// Finish as soon as the target is crossed.
    pub overshoot_clamping: bool,
    pub rest_displacement_threshold: f64,
    pub rest_speed_threshold: f64,
    /// Milliseconds before the spring starts.
    pub delay: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        SpringConfig {
            to_value: 0.0,
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            velocity: 0.0,
            overshoot_clamping: false,
            rest_displacement_threshold: 0.001,
            rest_speed_threshold: 0.001,
            delay: 0.0,
        }
    }
}

impl SpringConfig {
    pub fn to(to_value: f64) -> Self {
        SpringConfig {
            to_value,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SpringState {
    config: SpringConfig,
    from: f64,
    start: Option<f64>,
    last_time: Option<f64>,
    /// Seconds integrated so far.
    elapsed: f64,
}

impl SpringState {
    pub(crate) fn new(config: SpringConfig, from: f64) -> Self {
        SpringState {
            config,
            from,
            start: None,
            last_time: None,
            elapsed: 0.0,
        }
    }

    pub(crate) fn step(&mut self, now: f64, max_step_ms: f64) -> Step {
        let start = *self.start.get_or_insert(now + self.config.delay);
        if now < start {
            return Step::waiting();
        }
        let last = self.last_time.unwrap_or(start);
        let now = now.min(last + max_step_ms);
        self.elapsed += (now - last) / 1000.0;
        self.last_time = Some(now);

        let (position, velocity) = self.solve(self.elapsed);
        let SpringConfig {
            to_value,
            stiffness,
            ..
        } = self.config;

        let overshooting = self.config.overshoot_clamping
            && stiffness != 0.0
            && if self.from < to_value {
                position > to_value
            } else {
                position < to_value
            };
        let at_rest_speed = velocity.abs() <= self.config.rest_speed_threshold;
        let at_rest_position = stiffness == 0.0
            || (to_value - position).abs() <= self.config.rest_displacement_threshold;

        if overshooting || (at_rest_speed && at_rest_position) {
            let settled = if stiffness != 0.0 { to_value } else { position };
            return Step::done(settled);
        }
        Step::running(position)
    }

    /// Position and velocity `t` seconds after release.
    fn solve(&self, t: f64) -> (f64, f64) {
        let SpringConfig {
            to_value,
            stiffness: k,
            damping: c,
            mass: m,
            velocity,
            ..
        } = self.config;
        let v0 = -velocity;
        let zeta = c / (2.0 * (k * m).sqrt());
        let omega0 = (k / m).sqrt();
        let x0 = to_value - self.from;

        if zeta < 1.0 {
            // under-damped
            let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega0 * t).exp();
            let a = (v0 + zeta * omega0 * x0) / omega1;
            let (sin, cos) = (omega1 * t).sin_cos();
            let position = to_value - envelope * (a * sin + x0 * cos);
            let velocity = zeta * omega0 * envelope * (sin * a + x0 * cos)
                - envelope * (cos * (v0 + zeta * omega0 * x0) - omega1 * x0 * sin);
            (position, velocity)
        } else {
            // critically damped
            let envelope = (-omega0 * t).exp();
            let position = to_value - envelope * (x0 + (v0 + omega0 * x0) * t);
            let velocity = envelope * (v0 * (t * omega0 - 1.0) + t * x0 * omega0 * omega0);
            (position, velocity)
        }
    }
}
