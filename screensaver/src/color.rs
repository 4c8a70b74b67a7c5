//! Color values and the fixed gradient palette.
//!
//! Colors travel as canonical lowercase `#rrggbb` strings on the wire and in
//! stored configs; [`Rgb`] is the typed form used everywhere else.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string is not a `#RGB` / `#RRGGBB` color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color: {0:?}")]
pub struct ColorError(pub String);

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical lowercase `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Scale every channel by `factor` (clamped to `0.0..=1.0`).
    ///
    /// Used for the side and bevel faces, which render darker than the face.
    #[must_use]
    pub fn darken(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let scaled = (f64::from(c) * factor).round() as u8;
            scaled
        };
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_rgb(s)
            .map(|(r, g, b)| Self::new(r, g, b))
            .ok_or_else(|| ColorError(s.to_owned()))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1].repeat(2))?;
            let g = channel(&hex[1..2].repeat(2))?;
            let b = channel(&hex[2..3].repeat(2))?;
            Some((r, g, b))
        }
        6 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            Some((r, g, b))
        }
        _ => None,
    }
}

fn channel(pair: &str) -> Option<u8> {
    match u8::from_str_radix(pair, 16) {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

/// The fixed palette offered by the texture picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientId {
    Sunset,
    Ocean,
    Rainbow,
    Fire,
    Forest,
    Chrome,
}

impl GradientId {
    pub const ALL: [Self; 6] = [Self::Sunset, Self::Ocean, Self::Rainbow, Self::Fire, Self::Forest, Self::Chrome];

    /// Wire name of the gradient.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sunset => "sunset",
            Self::Ocean => "ocean",
            Self::Rainbow => "rainbow",
            Self::Fire => "fire",
            Self::Forest => "forest",
            Self::Chrome => "chrome",
        }
    }

    /// Look up a gradient by wire name. Case-sensitive, like the rest of the query keys.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == raw)
    }

    /// Top and bottom stops of the gradient texture.
    #[must_use]
    pub fn stops(self) -> (Rgb, Rgb) {
        match self {
            Self::Sunset => (Rgb::new(0xff, 0x7e, 0x5f), Rgb::new(0xfe, 0xb4, 0x7b)),
            Self::Ocean => (Rgb::new(0x00, 0x77, 0xb6), Rgb::new(0x90, 0xe0, 0xef)),
            Self::Rainbow => (Rgb::new(0xff, 0x00, 0x80), Rgb::new(0x00, 0xc8, 0xff)),
            Self::Fire => (Rgb::new(0xff, 0xd2, 0x00), Rgb::new(0xf7, 0x1b, 0x00)),
            Self::Forest => (Rgb::new(0x13, 0x4e, 0x5e), Rgb::new(0x71, 0xb2, 0x80)),
            Self::Chrome => (Rgb::new(0xf5, 0xf5, 0xf5), Rgb::new(0x6e, 0x6e, 0x6e)),
        }
    }
}
