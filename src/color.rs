//! RGB colors for the selection/mark backdrop.
//!
//! The engine does not paint anything itself; it hands `(Region, Color)`
//! pairs to the consumer's painter and tags selected widgets' background
//! style slot. Colors parse from the same textual forms the styling layer
//! uses: named colors and `#rgb`/`#rrggbb` hex.

use std::fmt;
use std::str::FromStr;

/// Error produced when a color string cannot be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("unknown color name: {0:?}")]
    UnknownName(String),
    #[error("malformed hex color: {0:?}")]
    MalformedHex(String),
}

/// An opaque RGB color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale each channel towards black by `amount` in `[0.0, 1.0]`.
    ///
    /// `0.0` returns the color unchanged, `1.0` returns black. Used for the
    /// mark backdrop, which draws as a darkened selection color.
    pub fn darken(self, amount: f32) -> Color {
        let f = (1.0 - amount).clamp(0.0, 1.0);
        Color {
            r: (self.r as f32 * f).round() as u8,
            g: (self.g as f32 * f).round() as u8,
            b: (self.b as f32 * f).round() as u8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse `#rgb`, `#rrggbb`, or a small set of named colors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ParseColorError::MalformedHex(s.to_string()));
        }
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Color::new(0x00, 0x00, 0x00)),
            "white" => Ok(Color::new(0xff, 0xff, 0xff)),
            "red" => Ok(Color::new(0xcc, 0x00, 0x00)),
            "green" => Ok(Color::new(0x4e, 0x9a, 0x06)),
            "blue" => Ok(Color::new(0x34, 0x65, 0xa4)),
            "yellow" => Ok(Color::new(0xc4, 0xa0, 0x00)),
            "magenta" => Ok(Color::new(0x75, 0x50, 0x7b)),
            "cyan" => Ok(Color::new(0x06, 0x98, 0x9a)),
            "gray" | "grey" => Ok(Color::new(0x80, 0x80, 0x80)),
            other => Err(ParseColorError::UnknownName(other.to_string())),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    let nibble = |c: u8| -> Option<u8> {
        match c {
            b'0'..=b'9' => Some(c - b'0'),
            b'a'..=b'f' => Some(c - b'a' + 10),
            b'A'..=b'F' => Some(c - b'A' + 10),
            _ => None,
        }
    };
    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => {
            let r = nibble(bytes[0])?;
            let g = nibble(bytes[1])?;
            let b = nibble(bytes[2])?;
            Some(Color::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        6 => {
            let r = nibble(bytes[0])? << 4 | nibble(bytes[1])?;
            let g = nibble(bytes[2])? << 4 | nibble(bytes[3])?;
            let b = nibble(bytes[4])? << 4 | nibble(bytes[5])?;
            Some(Color::new(r, g, b))
        }
        _ => None,
    }
}
