//! Declarative interpolation description, as received from a host or
//! embedded in a native config.

use serde::{Deserialize, Serialize};
use tween_easing_core::Easing;

use crate::extrapolate::{ExtrapolateConfig, Extrapolation};

/// Output stops are either all numbers or all strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputRange {
    Numbers(Vec<f64>),
    Strings(Vec<String>),
}

impl OutputRange {
    pub fn len(&self) -> usize {
        match self {
            OutputRange::Numbers(v) => v.len(),
            OutputRange::Strings(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<f64>> for OutputRange {
    fn from(v: Vec<f64>) -> Self {
        OutputRange::Numbers(v)
    }
}

impl From<Vec<String>> for OutputRange {
    fn from(v: Vec<String>) -> Self {
        OutputRange::Strings(v)
    }
}

impl From<Vec<&str>> for OutputRange {
    fn from(v: Vec<&str>) -> Self {
        OutputRange::Strings(v.into_iter().map(str::to_owned).collect())
    }
}

/// `extrapolate` is the shorthand for both sides; a side-specific policy
/// takes precedence over it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolationConfig {
    pub input_range: Vec<f64>,
    pub output_range: OutputRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extrapolate: Option<Extrapolation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extrapolate_left: Option<Extrapolation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extrapolate_right: Option<Extrapolation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Easing>,
}

impl InterpolationConfig {
    pub fn new(input_range: Vec<f64>, output_range: impl Into<OutputRange>) -> Self {
        InterpolationConfig {
            input_range,
            output_range: output_range.into(),
            extrapolate: None,
            extrapolate_left: None,
            extrapolate_right: None,
            easing: None,
        }
    }

    pub fn with_extrapolate(mut self, both: Extrapolation) -> Self {
        self.extrapolate = Some(both);
        self
    }

    pub fn with_extrapolate_left(mut self, left: Extrapolation) -> Self {
        self.extrapolate_left = Some(left);
        self
    }

    pub fn with_extrapolate_right(mut self, right: Extrapolation) -> Self {
        self.extrapolate_right = Some(right);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Effective per-side policies.
    pub fn extrapolation(&self) -> ExtrapolateConfig {
        let both = self.extrapolate.unwrap_or_default();
        ExtrapolateConfig::new(
            self.extrapolate_left.unwrap_or(both),
            self.extrapolate_right.unwrap_or(both),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_policy_beats_shorthand() {
        let cfg = InterpolationConfig::new(vec![0.0, 1.0], vec![0.0, 1.0])
            .with_extrapolate(Extrapolation::Clamp)
            .with_extrapolate_right(Extrapolation::Identity);
        let ex = cfg.extrapolation();
        assert_eq!(ex.extrapolate_left, Extrapolation::Clamp);
        assert_eq!(ex.extrapolate_right, Extrapolation::Identity);
        assert_eq!(
            InterpolationConfig::new(vec![0.0, 1.0], vec![0.0, 1.0]).extrapolation(),
            ExtrapolateConfig::default()
        );
    }

    #[test]
    fn deserializes_numeric_and_string_outputs() {
        let cfg: InterpolationConfig = serde_json::from_str(
            r#"{"inputRange":[0,1],"outputRange":[0,100],"extrapolateLeft":"clamp"}"#,
        )
        .unwrap();
        assert_eq!(cfg.output_range, OutputRange::Numbers(vec![0.0, 100.0]));
        assert_eq!(cfg.extrapolation().extrapolate_left, Extrapolation::Clamp);
        assert_eq!(cfg.extrapolation().extrapolate_right, Extrapolation::Extend);

        let cfg: InterpolationConfig = serde_json::from_str(
            r#"{"inputRange":[0,1],"outputRange":["0deg","90deg"],"easing":{"type":"quad"}}"#,
        )
        .unwrap();
        assert_eq!(cfg.output_range.len(), 2);
        assert!(matches!(cfg.output_range, OutputRange::Strings(_)));
        assert_eq!(cfg.easing, Some(Easing::Quad));
    }
}
