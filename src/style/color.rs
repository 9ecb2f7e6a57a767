//! Color configuration.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

/// A validated `#RRGGBB` color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse a color, reporting failures against `field`.
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        if HEX_COLOR.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(Error::validation(field, value, "expected a color in #RRGGBB format"))
        }
    }

    /// The color as written, including the leading `#`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalized RGB components in `0.0..=1.0`.
    pub fn to_rgb(&self) -> (f32, f32, f32) {
        let channel = |range: std::ops::Range<usize>| {
            // The pattern guarantees six hex digits after '#'.
            u8::from_str_radix(&self.0[range], 16).unwrap_or(0) as f32 / 255.0
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        HexColor::parse("color", &value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

/// The five colors used by a style.
///
/// Immutable once built. Use [`ColorSet::builder`] to derive a changed copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorSet {
    primary: HexColor,
    secondary: HexColor,
    text: HexColor,
    background: HexColor,
    accent: HexColor,
}

impl ColorSet {
    /// Create a color set, validating every field.
    pub fn new(
        primary: &str,
        secondary: &str,
        text: &str,
        background: &str,
        accent: &str,
    ) -> Result<Self> {
        Ok(Self {
            primary: HexColor::parse("primary", primary)?,
            secondary: HexColor::parse("secondary", secondary)?,
            text: HexColor::parse("text", text)?,
            background: HexColor::parse("background", background)?,
            accent: HexColor::parse("accent", accent)?,
        })
    }

    /// Start a builder seeded with this set's values.
    pub fn builder(&self) -> ColorSetBuilder {
        ColorSetBuilder {
            primary: self.primary.as_str().to_string(),
            secondary: self.secondary.as_str().to_string(),
            text: self.text.as_str().to_string(),
            background: self.background.as_str().to_string(),
            accent: self.accent.as_str().to_string(),
        }
    }

    /// Headings and titles.
    pub fn primary(&self) -> &HexColor {
        &self.primary
    }

    /// Subtitles.
    pub fn secondary(&self) -> &HexColor {
        &self.secondary
    }

    /// Body text.
    pub fn text(&self) -> &HexColor {
        &self.text
    }

    /// Page background.
    pub fn background(&self) -> &HexColor {
        &self.background
    }

    /// Links and highlights.
    pub fn accent(&self) -> &HexColor {
        &self.accent
    }
}

impl Default for ColorSet {
    fn default() -> Self {
        Self {
            primary: HexColor("#1a73e8".into()),
            secondary: HexColor("#5f6368".into()),
            text: HexColor("#202124".into()),
            background: HexColor("#ffffff".into()),
            accent: HexColor("#1967d2".into()),
        }
    }
}

/// Unvalidated field values for a [`ColorSet`].
#[derive(Debug, Clone)]
pub struct ColorSetBuilder {
    primary: String,
    secondary: String,
    text: String,
    background: String,
    accent: String,
}

impl ColorSetBuilder {
    pub fn primary(mut self, value: impl Into<String>) -> Self {
        self.primary = value.into();
        self
    }

    pub fn secondary(mut self, value: impl Into<String>) -> Self {
        self.secondary = value.into();
        self
    }

    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.text = value.into();
        self
    }

    pub fn background(mut self, value: impl Into<String>) -> Self {
        self.background = value.into();
        self
    }

    pub fn accent(mut self, value: impl Into<String>) -> Self {
        self.accent = value.into();
        self
    }

    /// Validate and build the color set.
    pub fn build(self) -> Result<ColorSet> {
        ColorSet::new(
            &self.primary,
            &self.secondary,
            &self.text,
            &self.background,
            &self.accent,
        )
    }
}
