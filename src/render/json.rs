//! JSON rendering.

use super::{RenderError, Renderer};
use crate::model::Document;
use crate::style::Style;
use serde::Serialize;
use std::io::Write;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct Payload<'a> {
    document: &'a Document,
    style: &'a Style,
}

/// Renders `{"document": ..., "style": ...}` as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
    format: JsonFormat,
}

impl JsonRenderer {
    /// Create a pretty-printing JSON renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given format.
    pub fn with_format(format: JsonFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> JsonFormat {
        self.format
    }
}

impl Renderer for JsonRenderer {
    fn name(&self) -> &str {
        "json"
    }

    fn file_extension(&self) -> &str {
        "json"
    }

    fn render(&self, document: &Document, style: &Style) -> Result<Vec<u8>, RenderError> {
        let payload = Payload { document, style };
        let bytes = match self.format {
            JsonFormat::Pretty => serde_json::to_vec_pretty(&payload)?,
            JsonFormat::Compact => serde_json::to_vec(&payload)?,
        };
        Ok(bytes)
    }

    fn render_to_sink(
        &self,
        document: &Document,
        sink: &mut dyn Write,
        style: &Style,
    ) -> Result<(), RenderError> {
        let payload = Payload { document, style };
        match self.format {
            JsonFormat::Pretty => serde_json::to_writer_pretty(&mut *sink, &payload)?,
            JsonFormat::Compact => serde_json::to_writer(&mut *sink, &payload)?,
        }
        sink.flush()?;
        Ok(())
    }
}
