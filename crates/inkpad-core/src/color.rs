//! Color values, the preset palette, and gradient descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Color must start with '#': {0}")]
    MissingHash(String),
    #[error("Unsupported color length {len} in {input}")]
    BadLength { input: String, len: usize },
    #[error("Invalid hex digit in {0}")]
    BadDigit(String),
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(input.to_string()))?;
        if !hex.is_ascii() {
            return Err(ColorParseError::BadDigit(input.to_string()));
        }

        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ColorParseError::BadDigit(input.to_string()))
        };

        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = byte(0..1)? * 17;
                let g = byte(1..2)? * 17;
                let b = byte(2..3)? * 17;
                Ok(Self::rgb(r, g, b))
            }
            6 => Ok(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?)),
            len => Err(ColorParseError::BadLength {
                input: input.to_string(),
                len,
            }),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    /// Packed `0x00RRGGBB`, the layout window framebuffers expect.
    pub fn to_0rgb(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<tiny_skia::ColorU8> for Rgba {
    fn from(color: tiny_skia::ColorU8) -> Self {
        Self::new(color.red(), color.green(), color.blue(), color.alpha())
    }
}

/// Preset palette offered next to the color picker.
pub const PALETTE: [Rgba; 7] = [
    Rgba::rgb(0x00, 0x00, 0x00),
    Rgba::rgb(0xFF, 0x00, 0x00),
    Rgba::rgb(0x00, 0xFF, 0x00),
    Rgba::rgb(0x00, 0x00, 0xFF),
    Rgba::rgb(0xFF, 0xFF, 0x00),
    Rgba::rgb(0xFF, 0x00, 0xFF),
    Rgba::rgb(0x00, 0xFF, 0xFF),
];

/// A color stop along a gradient ramp, `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// A linear gradient ramp.
///
/// The ramp is always laid across the whole surface, from the top-left corner
/// to the bottom-right corner, so where a stroke lands decides which slice of
/// the ramp it shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientDescriptor {
    pub stops: Vec<GradientStop>,
}

impl GradientDescriptor {
    pub fn new(stops: Vec<GradientStop>) -> Self {
        Self { stops }
    }

    /// Red → green → blue.
    pub fn rgb_ramp() -> Self {
        Self::new(vec![
            GradientStop::new(0.0, Rgba::rgb(0xFF, 0x00, 0x00)),
            GradientStop::new(0.5, Rgba::rgb(0x00, 0xFF, 0x00)),
            GradientStop::new(1.0, Rgba::rgb(0x00, 0x00, 0xFF)),
        ])
    }

    /// First stop's color, used when the ramp cannot be built as a shader.
    pub fn fallback_color(&self) -> Rgba {
        self.stops.first().map(|s| s.color).unwrap_or(Rgba::BLACK)
    }

    pub(crate) fn to_skia_stops(&self) -> Vec<tiny_skia::GradientStop> {
        self.stops
            .iter()
            .map(|s| tiny_skia::GradientStop::new(s.offset.clamp(0.0, 1.0), s.color.to_skia()))
            .collect()
    }
}

impl Default for GradientDescriptor {
    fn default() -> Self {
        Self::rgb_ramp()
    }
}
