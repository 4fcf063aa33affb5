//! Cell and annotation colors.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color parsing error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid color {input:?}: {reason}")]
pub struct ColorParseError {
    pub input: String,
    pub reason: String,
}

/// RGBA8 color as stored on cells and annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Swatches offered by the color picker.
pub const PALETTE: [CellColor; 10] = [
    CellColor::rgb(0x3B, 0x82, 0xF6), // blue
    CellColor::rgb(0xEF, 0x44, 0x44), // red
    CellColor::rgb(0x10, 0xB9, 0x81), // green
    CellColor::rgb(0xF5, 0x9E, 0x0B), // yellow
    CellColor::rgb(0x8B, 0x5C, 0xF6), // purple
    CellColor::rgb(0xEC, 0x48, 0x99), // pink
    CellColor::rgb(0x14, 0xB8, 0xA6), // teal
    CellColor::rgb(0xF9, 0x73, 0x16), // orange
    CellColor::rgb(0x00, 0x00, 0x00), // black
    CellColor::rgb(0xFF, 0xFF, 0xFF), // white
];

impl CellColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Same color at a different opacity (0.0 to 1.0).
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Translucent tint used to outline the brush footprint before commit.
    pub fn preview_tint(self) -> Self {
        self.with_alpha(0.25)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for CellColor {
    fn default() -> Self {
        PALETTE[0]
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for CellColor {
    type Err = ColorParseError;

    /// Parse any CSS color: hex (`#rgb`, `#rrggbb`, `#rrggbbaa`), named
    /// colors, and the `rgb()` / `hsl()` family.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Color>().map(Self::from).map_err(|e| ColorParseError {
            input: s.to_string(),
            reason: e.to_string(),
        })
    }
}

impl From<Color> for CellColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<CellColor> for Color {
    fn from(color: CellColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}
