//! Color conversion utilities for design-token values
//!
//! Supports the following conversions:
//! - Float channels (`0.0..=1.0`) to hex: `#rrggbb`
//! - Hex parsing: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - RGB <-> HSL
//!
//! Extracted colors can be re-rendered in another notation with [`ColorFormat`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for hex color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// A color in HSL space. Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl std::fmt::Display for Hsl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hsl({} {}% {}%)",
            self.h.round() as i64,
            (self.s * 100.0).round() as i64,
            (self.l * 100.0).round() as i64
        )
    }
}

/// Notation used for colors extracted from token values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// Hex strings, left exactly as extracted
    #[default]
    Hex,
    /// `rgb(r, g, b)` / `rgba(r, g, b, a)`
    Rgb,
    /// `hsl(h s% l%)`
    Hsl,
}

impl ColorFormat {
    /// Re-render a hex color in this notation.
    ///
    /// Strings that are not valid hex colors are returned unchanged.
    pub fn render(self, hex: &str) -> String {
        if self == ColorFormat::Hex {
            return hex.to_string();
        }
        let Ok(color) = parse_hex(hex) else {
            return hex.to_string();
        };
        match self {
            ColorFormat::Hex => hex.to_string(),
            ColorFormat::Rgb if color.a == 255 => {
                format!("rgb({}, {}, {})", color.r, color.g, color.b)
            }
            ColorFormat::Rgb => format!(
                "rgba({}, {}, {}, {})",
                color.r,
                color.g,
                color.b,
                round2(color.a as f64 / 255.0)
            ),
            ColorFormat::Hsl => {
                let hsl = rgb_to_hsl(color.r, color.g, color.b);
                if color.a == 255 {
                    hsl.to_string()
                } else {
                    let base = hsl.to_string();
                    format!("{} / {})", base.trim_end_matches(')'), round2(color.a as f64 / 255.0))
                }
            }
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Convert a unit float channel to an 8-bit value.
///
/// Values outside `[0, 1]` are clamped; NaN maps to 0.
pub fn channel_to_u8(channel: f64) -> u8 {
    if channel.is_nan() {
        return 0;
    }
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert unit float channels to a `#rrggbb` hex string (no alpha).
///
/// # Examples
///
/// ```
/// use tokensrc::color::channels_to_hex;
///
/// assert_eq!(channels_to_hex(1.0, 0.4, 0.0), "#ff6600");
/// ```
pub fn channels_to_hex(r: f64, g: f64, b: f64) -> String {
    rgb8_to_hex(channel_to_u8(r), channel_to_u8(g), channel_to_u8(b))
}

/// Format 8-bit channels as `#rrggbb`.
pub fn rgb8_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Parse a hex color string (#RGB, #RGBA, #RRGGBB, #RRGGBBAA)
pub fn parse_hex(s: &str) -> Result<Rgba8, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    // All characters are ASCII hex digits past this point
    let digits: Vec<u8> = hex.bytes().map(hex_digit).collect();

    match digits.len() {
        3 => Ok(Rgba8 { r: digits[0] * 17, g: digits[1] * 17, b: digits[2] * 17, a: 255 }),
        4 => Ok(Rgba8 {
            r: digits[0] * 17,
            g: digits[1] * 17,
            b: digits[2] * 17,
            a: digits[3] * 17,
        }),
        6 => Ok(Rgba8 {
            r: digits[0] * 16 + digits[1],
            g: digits[2] * 16 + digits[3],
            b: digits[4] * 16 + digits[5],
            a: 255,
        }),
        8 => Ok(Rgba8 {
            r: digits[0] * 16 + digits[1],
            g: digits[2] * 16 + digits[3],
            b: digits[4] * 16 + digits[5],
            a: digits[6] * 16 + digits[7],
        }),
        len => Err(ColorError::InvalidLength(len)),
    }
}

fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

/// Convert 8-bit RGB to HSL.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta == 0.0 {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let s = if l > 0.5 { delta / (2.0 - max - min) } else { delta / (max + min) };

    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl { h: (h * 60.0).rem_euclid(360.0), s, l }
}

/// Convert HSL to 8-bit RGB.
pub fn hsl_to_rgb(hsl: Hsl) -> (u8, u8, u8) {
    let s = hsl.s.clamp(0.0, 1.0);
    let l = hsl.l.clamp(0.0, 1.0);
    let h = hsl.h.rem_euclid(360.0) / 60.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (channel_to_u8(r + m), channel_to_u8(g + m), channel_to_u8(b + m))
}
