//! Graph-wide configuration.

use serde::{Deserialize, Serialize};
use tween_interp_core::ColorInterpolationOptions;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Options used by color interpolation nodes.
    pub color: ColorInterpolationOptions,
    /// Longest wall-clock step a spring integrates in one frame, in ms.
    pub spring_max_step_ms: f64,
    pub diagnostics: DiagnosticsCfg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsCfg {
    /// Record warnings in [`Diagnostics`](crate::Diagnostics). Logging is
    /// unaffected.
    pub enabled: bool,
    /// Oldest records are dropped past this many.
    pub max_records: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            color: ColorInterpolationOptions::default(),
            spring_max_step_ms: 64.0,
            diagnostics: DiagnosticsCfg::default(),
        }
    }
}

impl Default for DiagnosticsCfg {
    fn default() -> Self {
        Self {
            enabled: true,
            max_records: 256,
        }
    }
}

impl GraphConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GraphConfig::from_json(r#"{"spring_max_step_ms": 32, "diagnostics": {"max_records": 4}}"#)
            .unwrap();
        assert_eq!(cfg.spring_max_step_ms, 32.0);
        assert_eq!(cfg.diagnostics.max_records, 4);
        assert!(cfg.diagnostics.enabled);
        assert_eq!(cfg.color, ColorInterpolationOptions::default());
    }
}
