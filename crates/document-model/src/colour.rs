//! RGBA colour value used for fills and strokes.

use std::fmt;
use std::str::FromStr;

use gtcompose_common::error::{GtError, GtResult};
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA colour.
///
/// Immutable: derived colours are produced with [`Colour::with_alpha`].
/// `Display` renders the package form `#AARRGGBB`; [`Colour::to_hex`]
/// renders the `#RRGGBBAA` form accepted by [`Colour::from_hex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Colour {
    /// Fully transparent black, the default fill and stroke of every object.
    pub const TRANSPARENT: Colour = Colour::rgba(0, 0, 0, 0);
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::rgb(255, 255, 255);
    pub const RED: Colour = Colour::rgb(255, 0, 0);
    pub const GREEN: Colour = Colour::rgb(0, 255, 0);
    pub const BLUE: Colour = Colour::rgb(0, 0, 255);
    pub const CYAN: Colour = Colour::rgb(0, 255, 255);
    pub const MAGENTA: Colour = Colour::rgb(255, 0, 255);
    pub const YELLOW: Colour = Colour::rgb(255, 255, 0);
    pub const ORANGE: Colour = Colour::rgb(255, 165, 0);
    pub const GRAY: Colour = Colour::rgb(127, 127, 127);

    /// Opaque colour from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn from_hex(input: &str) -> GtResult<Self> {
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        let well_formed = (digits.len() == 6 || digits.len() == 8)
            && digits.bytes().all(|b| b.is_ascii_hexdigit());
        if !well_formed {
            return Err(GtError::invalid_format(format!(
                "colour '{input}' must be 6 or 8 hexadecimal digits"
            )));
        }

        let channel = |offset: usize| {
            u8::from_str_radix(&digits[offset..offset + 2], 16).map_err(|_| {
                GtError::invalid_format(format!("colour '{input}' contains non-hex digits"))
            })
        };

        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }

    /// Same RGB with alpha replaced. `alpha` is a fraction in `[0, 1]`.
    pub fn with_alpha(&self, alpha: f64) -> GtResult<Self> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(GtError::out_of_range(format!(
                "alpha {alpha} is outside [0, 1]"
            )));
        }
        Ok(Self {
            a: (alpha * 255.0) as u8,
            ..*self
        })
    }

    pub fn red(&self) -> u8 {
        self.r
    }

    pub fn green(&self) -> u8 {
        self.g
    }

    pub fn blue(&self) -> u8 {
        self.b
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn alpha(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    pub fn alpha_u8(&self) -> u8 {
        self.a
    }

    /// `#RRGGBBAA`, uppercase.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.a, self.r, self.g, self.b
        )
    }
}

impl FromStr for Colour {
    type Err = GtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = GtError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_hex()
    }
}
