//! tween-color-core
//!
//! Normalizes CSS-like color representations (hex, `rgb()`/`rgba()`,
//! `hsl()`/`hsla()`, named colors, packed integers) into a packed
//! `0xRRGGBBAA` value and converts between RGBA and HSV channels.
//! Unparseable input is reported as `None`, never as an error.

pub mod named;
pub mod parser;
pub mod rgba;

pub use named::named_color;
pub use parser::{ColorParser, ColorSource};
pub use rgba::{hsv_to_rgb, rgb_to_hsv, Hsv, Rgba};
