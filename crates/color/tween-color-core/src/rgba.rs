//! RGBA and HSV channel models.

use serde::{Deserialize, Serialize};
use tween_api_core::coercion::format_number;

/// Color channels: r, g, b in `[0, 255]`, a in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// Hue, saturation and value, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

#[inline]
fn byte(c: f64) -> u32 {
    c.round().clamp(0.0, 255.0) as u32
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Rgba { r, g, b, a }
    }

    /// Unpack `0xRRGGBBAA`.
    pub fn from_packed(packed: u32) -> Self {
        Rgba {
            r: ((packed >> 24) & 0xff) as f64,
            g: ((packed >> 16) & 0xff) as f64,
            b: ((packed >> 8) & 0xff) as f64,
            a: (packed & 0xff) as f64 / 255.0,
        }
    }

    /// Pack to `0xRRGGBBAA`, rounding and clamping every channel.
    pub fn to_packed(&self) -> u32 {
        (byte(self.r) << 24) | (byte(self.g) << 16) | (byte(self.b) << 8) | byte(self.a * 255.0)
    }

    /// Platform packing used by native renderers: `0xAARRGGBB`.
    pub fn to_argb(&self) -> u32 {
        (byte(self.a * 255.0) << 24) | (byte(self.r) << 16) | (byte(self.g) << 8) | byte(self.b)
    }

    /// `rgba(R, G, B, A)` with integer color channels.
    pub fn to_rgba_string(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            format_number(self.a.clamp(0.0, 1.0))
        )
    }

    pub fn to_hsv(&self) -> Hsv {
        rgb_to_hsv(self.r, self.g, self.b)
    }

    pub fn from_hsv(hsv: Hsv, a: f64) -> Self {
        let (r, g, b) = hsv_to_rgb(hsv.h, hsv.s, hsv.v);
        Rgba { r, g, b, a }
    }
}

/// Channels in `[0, 255]` to HSV in `[0, 1]`.
pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;
    let s = if max == 0.0 { 0.0 } else { d / max };
    let v = max / 255.0;

    let h = if d == 0.0 {
        0.0
    } else if max == r {
        ((g - b) + d * if g < b { 6.0 } else { 0.0 }) / (6.0 * d)
    } else if max == g {
        ((b - r) + d * 2.0) / (6.0 * d)
    } else {
        ((r - g) + d * 4.0) / (6.0 * d)
    };
    Hsv { h, s, v }
}

/// HSV in `[0, 1]` to rounded channels in `[0, 255]`.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    ((r * 255.0).round(), (g * 255.0).round(), (b * 255.0).round())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_round_trip_and_strings() {
        let c = Rgba::from_packed(0xff800080);
        assert_eq!((c.r, c.g, c.b), (255.0, 128.0, 0.0));
        assert_eq!(c.to_packed(), 0xff800080);
        assert_eq!(c.to_argb(), 0x80ff8000);
        assert_eq!(Rgba::new(255.0, 0.0, 0.0, 1.0).to_rgba_string(), "rgba(255, 0, 0, 1)");
        assert_eq!(Rgba::new(12.4, 0.6, 300.0, 0.5).to_rgba_string(), "rgba(12, 1, 255, 0.5)");
    }

    #[test]
    fn hsv_primary_colors() {
        let red = rgb_to_hsv(255.0, 0.0, 0.0);
        assert_eq!((red.h, red.s, red.v), (0.0, 1.0, 1.0));
        let green = rgb_to_hsv(0.0, 255.0, 0.0);
        assert!((green.h - 1.0 / 3.0).abs() < 1e-12);
        let blue = rgb_to_hsv(0.0, 0.0, 255.0);
        assert!((blue.h - 2.0 / 3.0).abs() < 1e-12);
        let gray = rgb_to_hsv(128.0, 128.0, 128.0);
        assert_eq!((gray.h, gray.s), (0.0, 0.0));
    }

    #[test]
    fn hsv_round_trips_through_rgb() {
        for packed in [0x336699ffu32, 0xff00ffff, 0x10e0a0ff, 0xfefefeff] {
            let c = Rgba::from_packed(packed);
            let back = Rgba::from_hsv(c.to_hsv(), c.a);
            assert_eq!(back.to_packed(), packed, "{packed:#x}");
        }
    }
}
