//! Per-context compiled state shared by interpolators built in one graph.

use regex::Regex;
use tween_color_core::ColorParser;

/// Any decimal literal, with optional sign, fraction and exponent.
const NUMBER_SHAPE: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";

#[derive(Debug, Clone)]
pub struct InterpContext {
    colors: ColorParser,
    numbers: Regex,
}

impl Default for InterpContext {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpContext {
    pub fn new() -> Self {
        InterpContext {
            colors: ColorParser::new(),
            numbers: Regex::new(NUMBER_SHAPE)
                .unwrap_or_else(|e| panic!("invalid number pattern {NUMBER_SHAPE}: {e}")),
        }
    }

    pub fn colors(&self) -> &ColorParser {
        &self.colors
    }

    pub(crate) fn numbers(&self) -> &Regex {
        &self.numbers
    }
}
