//! Rendering boundary.
//!
//! A [`Renderer`] turns a finished [`Document`] and a resolved [`Style`] into
//! output bytes. The pipeline treats it as an opaque synchronous call: it is
//! invoked once per document and never retried. Two renderers ship with the
//! crate: [`JsonRenderer`] and [`MarkdownRenderer`]. A PDF backend plugs in by
//! implementing the same trait.

mod json;
mod markdown;

pub use json::{JsonFormat, JsonRenderer};
pub use markdown::{MarkdownOptions, MarkdownRenderer};

use crate::model::Document;
use crate::style::Style;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by renderers.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document or style could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Backend-specific failure.
    #[error("{0}")]
    Backend(String),

    /// Rendering was stopped before completing.
    #[error("Rendering cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            RenderError::Io(err.into())
        } else {
            RenderError::Serialize(err.to_string())
        }
    }
}

/// Trait for output backends.
///
/// Only [`Renderer::render`] is required. The sink and file variants default to
/// rendering into memory first; streaming backends should override
/// [`Renderer::render_to_sink`]. On failure a sink may be left partially
/// written; discarding it is the caller's job.
pub trait Renderer: Send + Sync {
    /// Get the name of this renderer.
    fn name(&self) -> &str;

    /// Extension for generated files, without the leading dot.
    fn file_extension(&self) -> &str {
        "pdf"
    }

    /// Render to an in-memory buffer.
    fn render(&self, document: &Document, style: &Style) -> Result<Vec<u8>, RenderError>;

    /// Render into a writer.
    fn render_to_sink(
        &self,
        document: &Document,
        sink: &mut dyn Write,
        style: &Style,
    ) -> Result<(), RenderError> {
        let bytes = self.render(document, style)?;
        sink.write_all(&bytes)?;
        Ok(())
    }

    /// Render into a file at `path`, returning the path written.
    fn render_to_file(
        &self,
        document: &Document,
        path: &Path,
        style: &Style,
    ) -> Result<PathBuf, RenderError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.render_to_sink(document, &mut writer, style)?;
        writer.flush()?;
        Ok(path.to_path_buf())
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn file_extension(&self) -> &str {
        (**self).file_extension()
    }

    fn render(&self, document: &Document, style: &Style) -> Result<Vec<u8>, RenderError> {
        (**self).render(document, style)
    }

    fn render_to_sink(
        &self,
        document: &Document,
        sink: &mut dyn Write,
        style: &Style,
    ) -> Result<(), RenderError> {
        (**self).render_to_sink(document, sink, style)
    }

    fn render_to_file(
        &self,
        document: &Document,
        path: &Path,
        style: &Style,
    ) -> Result<PathBuf, RenderError> {
        (**self).render_to_file(document, path, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    struct FixedRenderer;

    impl Renderer for FixedRenderer {
        fn name(&self) -> &str {
            "fixed"
        }

        fn render(&self, _document: &Document, _style: &Style) -> Result<Vec<u8>, RenderError> {
            Ok(b"%PDF-1.4 fixed".to_vec())
        }
    }

    fn document() -> Document {
        let mut doc = Document::new("Doc", None).unwrap();
        doc.add_section(Section::new("One")).unwrap();
        doc
    }

    #[test]
    fn test_default_sink_writes_rendered_bytes() {
        let mut sink = Vec::new();
        FixedRenderer
            .render_to_sink(&document(), &mut sink, &Style::default())
            .unwrap();
        assert_eq!(sink, b"%PDF-1.4 fixed");
    }

    #[test]
    fn test_default_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        let written = FixedRenderer
            .render_to_file(&document(), &path, &Style::default())
            .unwrap();
        assert_eq!(written, path);
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 fixed");
    }

    #[test]
    fn test_boxed_renderer() {
        let boxed: Box<dyn Renderer> = Box::new(FixedRenderer);
        assert_eq!(boxed.name(), "fixed");
        assert_eq!(boxed.file_extension(), "pdf");
        assert!(boxed.render(&document(), &Style::default()).is_ok());
    }

    #[test]
    fn test_render_error_display() {
        assert_eq!(RenderError::Backend("font missing".into()).to_string(), "font missing");
        assert_eq!(RenderError::Cancelled.to_string(), "Rendering cancelled");
    }
}
