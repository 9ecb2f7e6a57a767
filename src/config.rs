//! Pipeline options and configuration.

use crate::error::{Error, Result};
use crate::model::{Orientation, PageSize, DEFAULT_AUTHOR};
use crate::style::Preset;
use crate::validate::RowLengthPolicy;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable for the default author.
pub const ENV_AUTHOR: &str = "REPORTKIT_AUTHOR";
/// Environment variable for the default page size.
pub const ENV_PAGE_SIZE: &str = "REPORTKIT_PAGE_SIZE";
/// Environment variable for the default orientation.
pub const ENV_ORIENTATION: &str = "REPORTKIT_ORIENTATION";
/// Environment variable for the default style preset.
pub const ENV_PRESET: &str = "REPORTKIT_PRESET";
/// Environment variable for the table row-length policy.
pub const ENV_ROW_POLICY: &str = "REPORTKIT_ROW_POLICY";
/// Environment variable for the file output directory.
pub const ENV_OUTPUT_DIR: &str = "REPORTKIT_OUTPUT_DIR";

/// Options for building and generating documents.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Author used when a request does not name one
    pub default_author: String,

    /// Page size used when a request does not set one
    pub default_page_size: PageSize,

    /// Orientation used when a request does not set one
    pub default_orientation: Orientation,

    /// Base style when neither the caller nor the request picks one
    pub default_preset: Preset,

    /// How table rows that don't match the header count are handled
    pub row_policy: RowLengthPolicy,

    /// Directory for file output
    pub output_dir: PathBuf,
}

impl PipelineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from `REPORTKIT_*` environment variables.
    ///
    /// Unset variables keep their defaults; unparseable ones are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(author) = lookup(ENV_AUTHOR).filter(|a| !a.trim().is_empty()) {
            options.default_author = author.trim().to_string();
        }
        if let Some(v) = lookup(ENV_PAGE_SIZE) {
            options.default_page_size = parse_setting(ENV_PAGE_SIZE, &v)?;
        }
        if let Some(v) = lookup(ENV_ORIENTATION) {
            options.default_orientation = parse_setting(ENV_ORIENTATION, &v)?;
        }
        if let Some(v) = lookup(ENV_PRESET) {
            options.default_preset = parse_setting(ENV_PRESET, &v)?;
        }
        if let Some(v) = lookup(ENV_ROW_POLICY) {
            options.row_policy = parse_setting(ENV_ROW_POLICY, &v)?;
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|d| !d.is_empty()) {
            options.output_dir = PathBuf::from(dir);
        }

        Ok(options)
    }

    /// Set the default author.
    pub fn with_default_author(mut self, author: impl Into<String>) -> Self {
        self.default_author = author.into();
        self
    }

    /// Set the default page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Set the default orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.default_orientation = orientation;
        self
    }

    /// Set the default preset.
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.default_preset = preset;
        self
    }

    /// Set the row-length policy.
    pub fn with_row_policy(mut self, policy: RowLengthPolicy) -> Self {
        self.row_policy = policy;
        self
    }

    /// Pad or truncate mismatched table rows instead of rejecting them.
    pub fn lenient_rows(mut self) -> Self {
        self.row_policy = RowLengthPolicy::Lenient;
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            default_author: DEFAULT_AUTHOR.to_string(),
            default_page_size: PageSize::A4,
            default_orientation: Orientation::Portrait,
            default_preset: Preset::Default,
            row_policy: RowLengthPolicy::Strict,
            output_dir: std::env::temp_dir().join("reportkit"),
        }
    }
}

fn parse_setting<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| Error::Config {
        key: key.to_string(),
        value: value.to_string(),
    })
}
