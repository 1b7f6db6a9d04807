use thiserror::Error;
use tween_api_core::ValueKind;
use tween_interp_core::InterpError;

use crate::ids::NodeId;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    #[error("node {node:?} is a {found} node, expected {expected}")]
    WrongKind {
        node: NodeId,
        expected: &'static str,
        found: &'static str,
    },
    #[error("node {node:?} produced a {found} value where a number is required")]
    NotANumber { node: NodeId, found: ValueKind },
    #[error("modulus must be a non-zero finite number, got {0}")]
    InvalidModulus(f64),
    #[error("diff clamp bounds are inverted (min {min} > max {max})")]
    InvalidBounds { min: f64, max: f64 },
    #[error("invalid {kind} animation: {field} must be {rule}, got {value}")]
    InvalidAnimation {
        kind: &'static str,
        field: &'static str,
        rule: &'static str,
        value: f64,
    },
    #[error("invalid interpolation: {0}")]
    Interpolation(#[from] InterpError),
    #[error("native config references unknown tag {0}")]
    UnknownTag(u64),
    #[error("native config tag {0} appears more than once")]
    DuplicateTag(u64),
    #[error("cycle detected in graph")]
    Cycle,
}
