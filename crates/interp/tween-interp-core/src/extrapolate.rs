use serde::{Deserialize, Serialize};

/// What to do with inputs beyond one end of the input range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extrapolation {
    /// Keep extrapolating the outermost segment linearly.
    #[default]
    Extend,
    /// Pin the input to the range edge.
    Clamp,
    /// Return the input unchanged.
    Identity,
}

/// Left and right policies, applied independently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrapolateConfig {
    #[serde(default)]
    pub extrapolate_left: Extrapolation,
    #[serde(default)]
    pub extrapolate_right: Extrapolation,
}

impl ExtrapolateConfig {
    pub fn new(left: Extrapolation, right: Extrapolation) -> Self {
        ExtrapolateConfig {
            extrapolate_left: left,
            extrapolate_right: right,
        }
    }

    pub fn clamp() -> Self {
        Extrapolation::Clamp.into()
    }
}

/// Shorthand: one policy for both sides.
impl From<Extrapolation> for ExtrapolateConfig {
    fn from(both: Extrapolation) -> Self {
        ExtrapolateConfig::new(both, both)
    }
}
