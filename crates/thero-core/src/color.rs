//! Color roles and hex color values.
//!
//! Every color token is stored as an sRGB triple and rendered as a
//! lowercase `#rrggbb` string. Roles form a closed set: the token set
//! always carries exactly one value per role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TheroError;

/// Semantic purpose of a color token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Success,
    Error,
    Warning,
    Background,
    Surface,
    Text,
    MutedText,
}

impl ColorRole {
    pub const ALL: &[ColorRole] = &[
        Self::Primary,
        Self::Secondary,
        Self::Accent,
        Self::Success,
        Self::Error,
        Self::Warning,
        Self::Background,
        Self::Surface,
        Self::Text,
        Self::MutedText,
    ];

    /// Roles overwritten by a light/dark mode switch.
    pub const MODE_ROLES: &[ColorRole] =
        &[Self::Background, Self::Surface, Self::Text, Self::MutedText];

    /// Stable identifier used by callers and persisted state.
    pub fn id(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Background => "background",
            Self::Surface => "surface",
            Self::Text => "text",
            Self::MutedText => "mutedText",
        }
    }

    /// CSS custom property name, without the leading `--`.
    pub fn css_var(self) -> &'static str {
        match self {
            Self::Primary => "primary-color",
            Self::Secondary => "secondary-color",
            Self::Accent => "accent-color",
            Self::Success => "success-color",
            Self::Error => "error-color",
            Self::Warning => "warning-color",
            Self::Background => "background-color",
            Self::Surface => "surface-color",
            Self::Text => "text-color",
            Self::MutedText => "muted-text-color",
        }
    }

    /// Parse a role id. Accepts the `<role>Color` spelling as well.
    pub fn from_id(s: &str) -> Option<Self> {
        let s = s.strip_suffix("Color").unwrap_or(s);
        Self::ALL.iter().copied().find(|role| role.id() == s)
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The six lowercase hex digits, without `#`.
    pub fn digits(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = TheroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TheroError::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| TheroError::InvalidColor(e.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for HexColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Convert HSL to a color. `h` is in degrees, `s` and `l` in percent.
///
/// Out-of-range inputs are wrapped (hue) or clamped (saturation, lightness).
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> HexColor {
    let h = h.rem_euclid(360.0);
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);
    let a = s * l.min(1.0 - l);

    let channel = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        let value = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    };

    HexColor::rgb(channel(0.0), channel(8.0), channel(4.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_colors() {
        assert_eq!(hsl_to_hex(0.0, 100.0, 50.0).to_string(), "#ff0000");
        assert_eq!(hsl_to_hex(120.0, 100.0, 50.0).to_string(), "#00ff00");
        assert_eq!(hsl_to_hex(240.0, 100.0, 50.0).to_string(), "#0000ff");
    }

    #[test]
    fn greys_ignore_hue() {
        assert_eq!(hsl_to_hex(200.0, 0.0, 0.0).to_string(), "#000000");
        assert_eq!(hsl_to_hex(17.0, 0.0, 100.0).to_string(), "#ffffff");
        assert_eq!(hsl_to_hex(300.0, 0.0, 50.0).to_string(), "#808080");
    }

    #[test]
    fn always_six_lowercase_digits() {
        for h in (0..360).step_by(7) {
            for s in (0..=100).step_by(10) {
                for l in (0..=100).step_by(10) {
                    let digits = hsl_to_hex(h as f64, s as f64, l as f64).digits();
                    assert_eq!(digits.len(), 6, "h={h} s={s} l={l}");
                    assert!(digits
                        .chars()
                        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
                }
            }
        }
    }

    #[test]
    fn parse_accepts_optional_hash_and_uppercase() {
        assert_eq!("#4F46E5".parse::<HexColor>().unwrap(), HexColor::rgb(0x4f, 0x46, 0xe5));
        assert_eq!("ec4899".parse::<HexColor>().unwrap().to_string(), "#ec4899");
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!("#fff".parse::<HexColor>().is_err());
        assert!("#gggggg".parse::<HexColor>().is_err());
        assert!("".parse::<HexColor>().is_err());
    }

    #[test]
    fn role_ids_roundtrip() {
        for role in ColorRole::ALL {
            assert_eq!(ColorRole::from_id(role.id()), Some(*role));
        }
        assert_eq!(ColorRole::from_id("mutedTextColor"), Some(ColorRole::MutedText));
        assert_eq!(ColorRole::from_id("chartreuse"), None);
    }
}
