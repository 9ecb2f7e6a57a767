//! Font configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest accepted font size in points.
pub const MAX_FONT_SIZE: f32 = 72.0;

/// Accepted line-height multipliers.
pub const LINE_HEIGHT_RANGE: std::ops::RangeInclusive<f32> = 1.0..=3.0;

/// Font families every renderer is expected to provide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Helvetica,
    #[serde(rename = "Times-Roman", alias = "Times")]
    Times,
    Courier,
}

impl FontFamily {
    /// Standard PostScript name of the family.
    pub fn postscript_name(&self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Times => "Times-Roman",
            FontFamily::Courier => "Courier",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.postscript_name())
    }
}

impl FromStr for FontFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "helvetica" => Ok(FontFamily::Helvetica),
            "times" | "times-roman" | "times new roman" => Ok(FontFamily::Times),
            "courier" => Ok(FontFamily::Courier),
            _ => Err(Error::validation(
                "font_family",
                s,
                "expected one of Helvetica, Times-Roman, Courier",
            )),
        }
    }
}

/// Font family, sizes and line height.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSet {
    family: FontFamily,
    size_title: f32,
    size_heading: f32,
    size_body: f32,
    size_small: f32,
    line_height: f32,
}

impl FontSet {
    /// Create a font set. Sizes must be in `(0, 72]`, line height in `[1.0, 3.0]`.
    pub fn new(
        family: FontFamily,
        size_title: f32,
        size_heading: f32,
        size_body: f32,
        size_small: f32,
        line_height: f32,
    ) -> Result<Self> {
        check_size("size_title", size_title)?;
        check_size("size_heading", size_heading)?;
        check_size("size_body", size_body)?;
        check_size("size_small", size_small)?;
        if !LINE_HEIGHT_RANGE.contains(&line_height) {
            return Err(Error::validation(
                "line_height",
                line_height,
                "must be between 1.0 and 3.0",
            ));
        }

        Ok(Self {
            family,
            size_title,
            size_heading,
            size_body,
            size_small,
            line_height,
        })
    }

    /// Start a builder seeded with this set's values.
    pub fn builder(&self) -> FontSetBuilder {
        FontSetBuilder {
            family: self.family,
            size_title: self.size_title,
            size_heading: self.size_heading,
            size_body: self.size_body,
            size_small: self.size_small,
            line_height: self.line_height,
        }
    }

    pub fn family(&self) -> FontFamily {
        self.family
    }

    pub fn size_title(&self) -> f32 {
        self.size_title
    }

    pub fn size_heading(&self) -> f32 {
        self.size_heading
    }

    pub fn size_body(&self) -> f32 {
        self.size_body
    }

    pub fn size_small(&self) -> f32 {
        self.size_small
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Baseline-to-baseline distance for body text, in points.
    pub fn body_leading(&self) -> f32 {
        self.size_body * self.line_height
    }
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            family: FontFamily::Helvetica,
            size_title: 24.0,
            size_heading: 16.0,
            size_body: 10.0,
            size_small: 8.0,
            line_height: 1.2,
        }
    }
}

fn check_size(field: &str, value: f32) -> Result<()> {
    // Written so that NaN fails too.
    if value > 0.0 && value <= MAX_FONT_SIZE {
        Ok(())
    } else {
        Err(Error::validation(
            field,
            value,
            "font size must be greater than 0 and at most 72pt",
        ))
    }
}

/// Unvalidated field values for a [`FontSet`].
#[derive(Debug, Clone)]
pub struct FontSetBuilder {
    family: FontFamily,
    size_title: f32,
    size_heading: f32,
    size_body: f32,
    size_small: f32,
    line_height: f32,
}

impl FontSetBuilder {
    pub fn family(mut self, family: FontFamily) -> Self {
        self.family = family;
        self
    }

    pub fn size_title(mut self, size: f32) -> Self {
        self.size_title = size;
        self
    }

    pub fn size_heading(mut self, size: f32) -> Self {
        self.size_heading = size;
        self
    }

    pub fn size_body(mut self, size: f32) -> Self {
        self.size_body = size;
        self
    }

    pub fn size_small(mut self, size: f32) -> Self {
        self.size_small = size;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Validate and build the font set.
    pub fn build(self) -> Result<FontSet> {
        FontSet::new(
            self.family,
            self.size_title,
            self.size_heading,
            self.size_body,
            self.size_small,
            self.line_height,
        )
    }
}
