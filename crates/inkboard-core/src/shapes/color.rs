//! Hex color strings used for element strokes and the canvas background.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a color string is not a recognised hex form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color: {0:?}")]
pub struct ColorParseError(pub String);

/// An RGBA8 color that serializes as a `#rrggbb` / `#rrggbbaa` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::black()
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    /// Accepts `#rgb`, `#rrggbb` and `#rrggbbaa` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| err());

        match hex.len() {
            3 => {
                let nibble = |i: usize| byte(i..i + 1).map(|v| v * 17);
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::rgba(byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!("#ff0000".parse::<HexColor>().unwrap(), HexColor::rgb(255, 0, 0));
        assert_eq!("#F0A".parse::<HexColor>().unwrap(), HexColor::rgb(255, 0, 170));
        assert_eq!(
            "#11223380".parse::<HexColor>().unwrap(),
            HexColor::rgba(0x11, 0x22, 0x33, 0x80)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("red".parse::<HexColor>().is_err());
        assert!("#12345".parse::<HexColor>().is_err());
        assert!("#gg0000".parse::<HexColor>().is_err());
        assert!("#+1+2+3".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(HexColor::rgb(139, 92, 246).to_string(), "#8b5cf6");
        assert_eq!(HexColor::rgba(0, 0, 0, 0).to_string(), "#00000000");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&HexColor::rgb(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
        let back: HexColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, HexColor::rgb(255, 0, 0));
        assert!(serde_json::from_str::<HexColor>("\"nope\"").is_err());
    }
}
