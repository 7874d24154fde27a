use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static NAMED_COLORS: Map<&'static str, u32> = phf_map! {
    "black" => 0x000000,
    "white" => 0xffffff,
    "red" => 0xff0000,
    "green" => 0x008000,
    "blue" => 0x0000ff,
    "yellow" => 0xffff00,
    "cyan" => 0x00ffff,
    "magenta" => 0xff00ff,
    "gray" => 0x808080,
    "grey" => 0x808080,
    "orange" => 0xffa500,
    "deeppink" => 0xff1493,
};

/// An opaque sRGB color, serialized as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::from_hex(0x000000);
    pub const WHITE: Color = Color::from_hex(0xffffff);

    pub const fn from_hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    pub fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Components scaled to `[0, 1]`.
    pub fn to_rgb_f64(self) -> [f64; 3] {
        [self.r, self.g, self.b].map(|c| c as f64 / 255.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{0}', expected '#rgb', '#rrggbb' or a color name")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseColorError(s.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(err());
            }
            let value = u32::from_str_radix(hex, 16).map_err(|_| err())?;
            return match hex.len() {
                3 => {
                    let expand = |nibble: u32| (nibble << 4) | nibble;
                    Ok(Color::from_hex(
                        (expand((value >> 8) & 0xf) << 16)
                            | (expand((value >> 4) & 0xf) << 8)
                            | expand(value & 0xf),
                    ))
                }
                6 => Ok(Color::from_hex(value)),
                _ => Err(err()),
            };
        }

        NAMED_COLORS
            .get(trimmed.to_ascii_lowercase().as_str())
            .map(|&value| Color::from_hex(value))
            .ok_or_else(err)
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
