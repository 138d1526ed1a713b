// Frame colors: hex parsing, the shade helper, and straight-alpha paint colors.
// Visual: every border, corner and glow you see gets its RGB from here.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An opaque sRGB color as picked from the swatches or the color wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Saddle brown, the frame color every session starts with.
pub const DEFAULT_FRAME_COLOR: Rgb = Rgb::new(0x8B, 0x45, 0x13);

/// The six quick-pick swatches, in the order the preview cycles through them.
pub const PRESET_SWATCHES: [Rgb; 6] = [
    DEFAULT_FRAME_COLOR,
    Rgb::new(0x00, 0x00, 0x00),
    Rgb::new(0xFF, 0xFF, 0xFF),
    Rgb::new(0xFF, 0xD7, 0x00),
    Rgb::new(0xC0, 0xC0, 0xC0),
    Rgb::new(0x2F, 0x4F, 0x4F),
];

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Shift every channel by round(2.55 * percent), clamped to 0..=255.
    /// Negative percent darkens, positive lightens; 0 is the identity.
    pub fn shade(self, percent: i32) -> Self {
        // Half-up rounding: -25.5 -> -25, 25.5 -> 26
        let amt = (2.55 * percent as f64 + 0.5).floor() as i32;
        let shift = |c: u8| (c as i32 + amt).clamp(0, 255) as u8;
        Self { r: shift(self.r), g: shift(self.g), b: shift(self.b) }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Accepts `#RRGGBB` or `#RGB`, `#` optional, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || Error::InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let num = u32::from_str_radix(hex, 16).map_err(|_| bad())?;
        match hex.len() {
            6 => Ok(Self::new((num >> 16) as u8, (num >> 8) as u8, num as u8)),
            3 => {
                // #abc -> #aabbcc
                let expand = |n: u32| ((n & 0xF) * 0x11) as u8;
                Ok(Self::new(expand(num >> 8), expand(num >> 4), expand(num)))
            }
            _ => Err(bad()),
        }
    }
}

/// A straight-alpha color: 8-bit RGB plus opacity in [0,1].
/// Visual: translucent strokes, shadow tints and gradient stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque hex color.
    pub const fn opaque(c: Rgb) -> Self {
        Self::new(c.r, c.g, c.b, 1.0)
    }

    /// Black at the given opacity, the usual shadow/darkening tint.
    pub const fn black(a: f32) -> Self {
        Self::new(0, 0, 0, a)
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        Self::opaque(c)
    }
}
