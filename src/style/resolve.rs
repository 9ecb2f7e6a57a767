//! Field-level merging of partial style overrides.

use super::{ColorSet, FontFamily, FontSet, Preset, Style};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Caller-supplied style preferences. Every field is independently optional.
///
/// Keys are camelCase on the wire (`primaryColor`, `fontSize`, `marginTop`, ...).
/// `fontSize` sets the body text size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleOverrides {
    /// Preset to start from when no explicit base style is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", alias = "bodySize")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<f32>,
}

impl StyleOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = Some(preset);
        self
    }

    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = Some(color.into());
        self
    }

    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    /// Set all four margins in points.
    pub fn with_margins(mut self, top: f32, bottom: f32, left: f32, right: f32) -> Self {
        self.margin_top = Some(top);
        self.margin_bottom = Some(bottom);
        self.margin_left = Some(left);
        self.margin_right = Some(right);
        self
    }

    fn touches_colors(&self) -> bool {
        self.primary_color.is_some()
            || self.secondary_color.is_some()
            || self.text_color.is_some()
            || self.background_color.is_some()
            || self.accent_color.is_some()
    }

    fn touches_fonts(&self) -> bool {
        self.font_family.is_some()
            || self.font_size.is_some()
            || self.title_size.is_some()
            || self.heading_size.is_some()
            || self.small_size.is_some()
            || self.line_height.is_some()
    }

    fn touches_margins(&self) -> bool {
        self.margin_top.is_some()
            || self.margin_bottom.is_some()
            || self.margin_left.is_some()
            || self.margin_right.is_some()
    }

    /// Check if any style field (not counting `preset`) is set.
    pub fn has_field_overrides(&self) -> bool {
        self.touches_colors() || self.touches_fonts() || self.touches_margins()
    }
}

/// Merge `overrides` onto `base`, returning a new style.
///
/// Fields present in `overrides` replace the base value; absent fields keep it,
/// including siblings inside the same group. The base is never modified. If any
/// override is invalid the whole resolution fails and nothing is applied.
/// The `preset` field is not consulted here; it only selects a base.
pub fn resolve(base: &Style, overrides: &StyleOverrides) -> Result<Style> {
    let colors = if overrides.touches_colors() {
        merge_colors(base.colors(), overrides)?
    } else {
        base.colors().clone()
    };

    let fonts = if overrides.touches_fonts() {
        merge_fonts(base.fonts(), overrides)?
    } else {
        base.fonts().clone()
    };

    let margins = if overrides.touches_margins() {
        base.margins().with_sides(
            overrides.margin_top,
            overrides.margin_bottom,
            overrides.margin_left,
            overrides.margin_right,
        )?
    } else {
        base.margins().clone()
    };

    Ok(Style::new(colors, fonts, margins))
}

fn merge_colors(base: &ColorSet, overrides: &StyleOverrides) -> Result<ColorSet> {
    let mut builder = base.builder();
    if let Some(ref v) = overrides.primary_color {
        builder = builder.primary(v.as_str());
    }
    if let Some(ref v) = overrides.secondary_color {
        builder = builder.secondary(v.as_str());
    }
    if let Some(ref v) = overrides.text_color {
        builder = builder.text(v.as_str());
    }
    if let Some(ref v) = overrides.background_color {
        builder = builder.background(v.as_str());
    }
    if let Some(ref v) = overrides.accent_color {
        builder = builder.accent(v.as_str());
    }
    builder.build()
}

fn merge_fonts(base: &FontSet, overrides: &StyleOverrides) -> Result<FontSet> {
    let mut builder = base.builder();
    if let Some(ref family) = overrides.font_family {
        builder = builder.family(family.parse::<FontFamily>()?);
    }
    if let Some(size) = overrides.font_size {
        builder = builder.size_body(size);
    }
    if let Some(size) = overrides.title_size {
        builder = builder.size_title(size);
    }
    if let Some(size) = overrides.heading_size {
        builder = builder.size_heading(size);
    }
    if let Some(size) = overrides.small_size {
        builder = builder.size_small(size);
    }
    if let Some(lh) = overrides.line_height {
        builder = builder.line_height(lh);
    }
    builder.build()
}
