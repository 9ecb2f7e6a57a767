//! Visual style for rendered documents.
//!
//! A [`Style`] groups three self-validating value objects: [`ColorSet`],
//! [`FontSet`] and [`MarginSet`]. Styles are immutable; changes go through
//! [`resolve`], which merges a partial [`StyleOverrides`] onto a base style
//! and returns a new, fully validated style.
//!
//! Three named presets are built once per process and shared by reference:
//!
//! ```
//! use reportkit::style::{Preset, Style};
//!
//! let style: &'static Style = Preset::Professional.style();
//! assert_eq!(style.fonts().size_body(), 11.0);
//! ```

mod color;
mod font;
mod margin;
mod resolve;

pub use color::{ColorSet, ColorSetBuilder, HexColor};
pub use font::{FontFamily, FontSet, FontSetBuilder, LINE_HEIGHT_RANGE, MAX_FONT_SIZE};
pub use margin::{MarginSet, MAX_MARGIN, POINTS_PER_CM, POINTS_PER_INCH};
pub use resolve::{resolve, StyleOverrides};

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Complete visual configuration handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    colors: ColorSet,
    fonts: FontSet,
    margins: MarginSet,
}

impl Style {
    /// Compose a style from already validated groups.
    pub fn new(colors: ColorSet, fonts: FontSet, margins: MarginSet) -> Self {
        Self {
            colors,
            fonts,
            margins,
        }
    }

    /// The shared `default` preset.
    pub fn default_preset() -> &'static Style {
        Preset::Default.style()
    }

    pub fn colors(&self) -> &ColorSet {
        &self.colors
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    pub fn margins(&self) -> &MarginSet {
        &self.margins
    }

    /// Width available for content on a page of the given width.
    pub fn content_width(&self, page_width: f32) -> f32 {
        (page_width - self.margins.horizontal()).max(0.0)
    }

    /// Height available for content on a page of the given height.
    pub fn content_height(&self, page_height: f32) -> f32 {
        (page_height - self.margins.vertical()).max(0.0)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(ColorSet::default(), FontSet::default(), MarginSet::default())
    }
}

/// Named, pre-built styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Blue headings, Helvetica, one-inch margins
    #[default]
    Default,
    /// Black and grey, smaller type, 1.5 cm margins
    Minimal,
    /// Corporate palette, Times, wider side margins
    Professional,
}

static DEFAULT_STYLE: Lazy<Style> = Lazy::new(Style::default);

static MINIMAL_STYLE: Lazy<Style> = Lazy::new(|| {
    build_preset(|| {
        let colors = ColorSet::default()
            .builder()
            .primary("#000000")
            .secondary("#666666")
            .text("#000000")
            .build()?;
        let fonts = FontSet::default()
            .builder()
            .size_body(9.0)
            .size_heading(12.0)
            .build()?;
        let margins = MarginSet::from_cm(1.5, 1.5, 1.5, 1.5)?;
        Ok(Style::new(colors, fonts, margins))
    })
});

static PROFESSIONAL_STYLE: Lazy<Style> = Lazy::new(|| {
    build_preset(|| {
        let colors = ColorSet::default()
            .builder()
            .primary("#2c3e50")
            .secondary("#7f8c8d")
            .text("#2c3e50")
            .accent("#3498db")
            .build()?;
        let fonts = FontSet::default()
            .builder()
            .family(FontFamily::Times)
            .size_body(11.0)
            .size_heading(14.0)
            .size_title(22.0)
            .build()?;
        let margins = MarginSet::from_inches(1.0, 1.0, 1.25, 1.25)?;
        Ok(Style::new(colors, fonts, margins))
    })
});

fn build_preset(f: impl FnOnce() -> Result<Style>) -> Style {
    // Preset values are constants; a failure here is a programming error.
    f().unwrap_or_else(|e| panic!("built-in style preset is invalid: {e}"))
}

impl Preset {
    /// All presets, in display order.
    pub const ALL: [Preset; 3] = [Preset::Default, Preset::Minimal, Preset::Professional];

    /// The shared style instance for this preset.
    pub fn style(&self) -> &'static Style {
        match self {
            Preset::Default => &DEFAULT_STYLE,
            Preset::Minimal => &MINIMAL_STYLE,
            Preset::Professional => &PROFESSIONAL_STYLE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Minimal => "minimal",
            Preset::Professional => "professional",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Preset::Default),
            "minimal" => Ok(Preset::Minimal),
            "professional" => Ok(Preset::Professional),
            _ => Err(Error::validation(
                "preset",
                s,
                "expected one of default, minimal, professional",
            )),
        }
    }
}
