//! Color normalization.
//!
//! The compiled patterns live in a [`ColorParser`] owned by the evaluation
//! context, so independent contexts never share mutable state.

use regex::Regex;

use crate::named::named_color;

const NUMBER: &str = r"[-+]?\d*\.?\d+";

/// Anything that may describe a color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorSource<'a> {
    /// Already packed `0xRRGGBBAA`; must be an integer in `0..=0xffff_ffff`.
    Packed(f64),
    /// CSS-like text.
    Css(&'a str),
}

impl<'a> From<&'a str> for ColorSource<'a> {
    fn from(s: &'a str) -> Self {
        ColorSource::Css(s)
    }
}

impl From<u32> for ColorSource<'_> {
    fn from(p: u32) -> Self {
        ColorSource::Packed(p as f64)
    }
}

impl From<f64> for ColorSource<'_> {
    fn from(p: f64) -> Self {
        ColorSource::Packed(p)
    }
}

#[derive(Debug, Clone)]
pub struct ColorParser {
    rgb: Regex,
    rgba: Regex,
    hsl: Regex,
    hsla: Regex,
    hex3: Regex,
    hex4: Regex,
    hex6: Regex,
    hex8: Regex,
}

/// `name(a, b, c)` with each argument captured.
fn call_pattern(name: &str, args: &[&str]) -> String {
    let inner: Vec<String> = args.iter().map(|a| format!("({a})")).collect();
    format!(r"^{name}\(\s*{}\s*\)$", inner.join(r"\s*,\s*"))
}

fn compile(pattern: &str) -> Regex {
    // patterns are constants
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid color pattern {pattern}: {e}"))
}

impl Default for ColorParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorParser {
    pub fn new() -> Self {
        ColorParser {
            rgb: compile(&call_pattern("rgb", &[NUMBER, NUMBER, NUMBER])),
            rgba: compile(&call_pattern("rgba", &[NUMBER, NUMBER, NUMBER, NUMBER])),
            hsl: compile(&percent_call("hsl", 3)),
            hsla: compile(&percent_call("hsla", 4)),
            hex3: compile(r"^#([0-9a-fA-F]{3})$"),
            hex4: compile(r"^#([0-9a-fA-F]{4})$"),
            hex6: compile(r"^#([0-9a-fA-F]{6})$"),
            hex8: compile(r"^#([0-9a-fA-F]{8})$"),
        }
    }

    /// Normalize to packed `0xRRGGBBAA`, or `None` when `source` is not a color.
    pub fn normalize<'a>(&self, source: impl Into<ColorSource<'a>>) -> Option<u32> {
        match source.into() {
            ColorSource::Packed(n) => normalize_packed(n),
            ColorSource::Css(text) => self.normalize_css(text.trim()),
        }
    }

    fn normalize_css(&self, text: &str) -> Option<u32> {
        if let Some(caps) = self.hex6.captures(text) {
            return u32::from_str_radix(&format!("{}ff", &caps[1]), 16).ok();
        }
        if let Some(packed) = named_color(text) {
            return Some(packed);
        }
        if let Some(caps) = self.rgb.captures(text) {
            return Some(
                (parse_255(&caps[1]) << 24)
                    | (parse_255(&caps[2]) << 16)
                    | (parse_255(&caps[3]) << 8)
                    | 0x0000_00ff,
            );
        }
        if let Some(caps) = self.rgba.captures(text) {
            return Some(
                (parse_255(&caps[1]) << 24)
                    | (parse_255(&caps[2]) << 16)
                    | (parse_255(&caps[3]) << 8)
                    | parse_1(&caps[4]),
            );
        }
        if let Some(caps) = self.hex3.captures(text) {
            return u32::from_str_radix(&format!("{}ff", double_digits(&caps[1])), 16).ok();
        }
        if let Some(caps) = self.hex8.captures(text) {
            return u32::from_str_radix(&caps[1], 16).ok();
        }
        if let Some(caps) = self.hex4.captures(text) {
            return u32::from_str_radix(&double_digits(&caps[1]), 16).ok();
        }
        if let Some(caps) = self.hsl.captures(text) {
            return Some(
                hsl_to_rgb(
                    parse_360(&caps[1]),
                    parse_percentage(&caps[2]),
                    parse_percentage(&caps[3]),
                ) | 0x0000_00ff,
            );
        }
        if let Some(caps) = self.hsla.captures(text) {
            return Some(
                hsl_to_rgb(
                    parse_360(&caps[1]),
                    parse_percentage(&caps[2]),
                    parse_percentage(&caps[3]),
                ) | parse_1(&caps[4]),
            );
        }
        None
    }
}

/// `hsl(h, s%, l%)` / `hsla(h, s%, l%, a)`.
fn percent_call(name: &str, arity: usize) -> String {
    let mut pattern = format!(r"^{name}\(\s*({NUMBER})");
    pattern.push_str(&format!(r"\s*,\s*({NUMBER})%"));
    pattern.push_str(&format!(r"\s*,\s*({NUMBER})%"));
    if arity == 4 {
        pattern.push_str(&format!(r"\s*,\s*({NUMBER})"));
    }
    pattern.push_str(r"\s*\)$");
    pattern
}

fn normalize_packed(n: f64) -> Option<u32> {
    if n.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&n) {
        Some(n as u32)
    } else {
        None
    }
}

fn double_digits(hex: &str) -> String {
    hex.chars().flat_map(|c| [c, c]).collect()
}

fn parse_f64(s: &str) -> f64 {
    s.parse::<f64>().unwrap_or(0.0)
}

/// Integer channel, truncated and clamped to `0..=255`.
fn parse_255(s: &str) -> u32 {
    parse_f64(s).trunc().clamp(0.0, 255.0) as u32
}

/// Hue in degrees, wrapped into `[0, 1)`.
fn parse_360(s: &str) -> f64 {
    let deg = parse_f64(s);
    ((deg % 360.0) + 360.0) % 360.0 / 360.0
}

/// Alpha in `[0, 1]` scaled to a byte.
fn parse_1(s: &str) -> u32 {
    (parse_f64(s).clamp(0.0, 1.0) * 255.0).round() as u32
}

fn parse_percentage(s: &str) -> f64 {
    parse_f64(s).clamp(0.0, 100.0) / 100.0
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

/// Packed `0xRRGGBB00` for the given hue/saturation/lightness in `[0, 1]`.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> u32 {
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);
    let byte = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u32;
    (byte(r) << 24) | (byte(g) << 16) | (byte(b) << 8)
}
