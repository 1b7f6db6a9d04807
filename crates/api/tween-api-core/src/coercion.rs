//! Number formatting shared by string interpolation and color output.

/// Format a number the way the renderer expects it inside strings:
/// integral values without a fractional part, `-0` printed as `0`.
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_matches_renderer_conventions() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-12.25), "-12.25");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }
}
