//! Construction-time validation errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpError {
    #[error("{name} must have at least 2 elements, got {len}")]
    TooFewStops { name: &'static str, len: usize },
    #[error("inputRange ({input}) and outputRange ({output}) must be the same length")]
    LengthMismatch { input: usize, output: usize },
    #[error("inputRange must be monotonically non-decreasing (index {index}: {prev} then {next})")]
    NonMonotonic { index: usize, prev: f64, next: f64 },
    #[error("{name} cannot be ]-infinity;+infinity[")]
    InfiniteRange { name: &'static str },
    #[error("invalid pattern {first:?} and {other:?}")]
    PatternMismatch { first: String, other: String },
    #[error("output range entry {value:?} is not a color")]
    NotAColor { value: String },
}
