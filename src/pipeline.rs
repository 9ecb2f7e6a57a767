//! Request-to-output orchestration.
//!
//! A [`DocumentPipeline`] validates a request, builds the document, resolves its
//! style and hands both to a [`Renderer`]. The document is marked generated only
//! after the renderer returns successfully.
//!
//! # Example
//!
//! ```
//! use reportkit::pipeline::DocumentPipeline;
//! use reportkit::render::JsonRenderer;
//! use reportkit::request::{DocumentRequest, SectionRequest};
//!
//! let pipeline = DocumentPipeline::new(JsonRenderer::new());
//! let request = DocumentRequest::new("Quarterly Report")
//!     .with_section(SectionRequest::new("Summary").with_content("Revenue grew."));
//!
//! let output = pipeline.execute(&request)?;
//! assert!(output.filename.starts_with("Quarterly_Report_"));
//! assert!(output.filename.ends_with(".json"));
//! # Ok::<(), reportkit::Error>(())
//! ```

use crate::build::DocumentBuilder;
use crate::config::PipelineOptions;
use crate::error::{Error, Result};
use crate::model::{Document, DocumentId};
use crate::render::{RenderError, Renderer};
use crate::request::DocumentRequest;
use crate::style::{resolve, Style};
use crate::validate::RequestValidator;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// A built document paired with the style it will be rendered with.
#[derive(Debug, Clone)]
pub struct PreparedDocument<'a> {
    /// The draft document
    pub document: Document,

    /// Resolved style; borrowed when no field overrides were requested
    pub style: Cow<'a, Style>,
}

/// Result of a buffered generation.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Rendered bytes
    pub content: Vec<u8>,

    /// Suggested filename, `<sanitized title>_<id>.<ext>`
    pub filename: String,

    /// ID of the generated document
    pub document_id: DocumentId,

    /// The document, in the generated state
    pub document: Document,
}

/// Receipt returned after streaming into a caller-supplied sink.
#[derive(Debug, Clone)]
pub struct SinkReceipt {
    pub document_id: DocumentId,
    pub document: Document,
}

/// Receipt returned after writing to a file.
#[derive(Debug, Clone)]
pub struct FileReceipt {
    /// Path of the written file
    pub path: PathBuf,
    pub document_id: DocumentId,
    pub document: Document,
}

/// Validates, builds, styles and renders documents.
///
/// The pipeline holds no per-request state, so one instance can serve many
/// requests concurrently.
#[derive(Debug)]
pub struct DocumentPipeline<R: Renderer> {
    renderer: R,
    options: PipelineOptions,
    validator: RequestValidator,
    builder: DocumentBuilder,
}

impl<R: Renderer> DocumentPipeline<R> {
    /// Create a pipeline with default options.
    pub fn new(renderer: R) -> Self {
        Self::with_options(renderer, PipelineOptions::default())
    }

    /// Create a pipeline with custom options.
    pub fn with_options(renderer: R, options: PipelineOptions) -> Self {
        let validator = RequestValidator::new().with_row_policy(options.row_policy);
        let builder = DocumentBuilder::new(&options);
        Self {
            renderer,
            options,
            validator,
            builder,
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Validate and build a request, then resolve its style.
    ///
    /// The base style is `base` when given, else the preset named by the
    /// request, else the configured default preset. Request overrides are
    /// merged on top.
    pub fn prepare<'a>(
        &self,
        request: &DocumentRequest,
        base: Option<&'a Style>,
    ) -> Result<PreparedDocument<'a>> {
        self.validator.validate(request)?;
        let document = self.builder.build(request)?;
        let style = self.select_style(request, base)?;
        Ok(PreparedDocument { document, style })
    }

    fn select_style<'a>(
        &self,
        request: &DocumentRequest,
        base: Option<&'a Style>,
    ) -> Result<Cow<'a, Style>> {
        let base: &'a Style = match base {
            Some(style) => style,
            None => request
                .style
                .as_ref()
                .and_then(|s| s.preset)
                .unwrap_or(self.options.default_preset)
                .style(),
        };

        match request.style {
            Some(ref overrides) if overrides.has_field_overrides() => {
                debug!("Resolving style overrides");
                Ok(Cow::Owned(resolve(base, overrides)?))
            }
            _ => Ok(Cow::Borrowed(base)),
        }
    }

    /// Render a prepared document into memory and mark it generated.
    ///
    /// On failure the document stays in draft.
    pub fn render_prepared(&self, prepared: &mut PreparedDocument<'_>) -> Result<Vec<u8>> {
        let content = self
            .renderer
            .render(&prepared.document, &prepared.style)
            .map_err(|e| self.generation_error(&prepared.document, e))?;
        prepared.document.mark_generated()?;
        Ok(content)
    }

    /// Generate a document into memory.
    pub fn execute(&self, request: &DocumentRequest) -> Result<GenerationOutput> {
        self.execute_with_style(request, None)
    }

    /// Generate a document into memory using an explicit base style.
    pub fn execute_with_style(
        &self,
        request: &DocumentRequest,
        base: Option<&Style>,
    ) -> Result<GenerationOutput> {
        let mut prepared = self.prepare(request, base)?;
        let content = self.render_prepared(&mut prepared)?;
        let document = prepared.document;
        let filename = generate_filename(
            document.title(),
            document.id(),
            self.renderer.file_extension(),
        );

        info!(
            "Generated {} ({} bytes) with {} renderer",
            filename,
            content.len(),
            self.renderer.name()
        );
        Ok(GenerationOutput {
            content,
            filename,
            document_id: document.id(),
            document,
        })
    }

    /// Generate a document directly into `sink`.
    ///
    /// On failure the sink may hold partial output.
    pub fn execute_to_sink(
        &self,
        request: &DocumentRequest,
        sink: &mut dyn Write,
    ) -> Result<SinkReceipt> {
        self.execute_to_sink_with_style(request, sink, None)
    }

    /// Generate a document into `sink` using an explicit base style.
    pub fn execute_to_sink_with_style(
        &self,
        request: &DocumentRequest,
        sink: &mut dyn Write,
        base: Option<&Style>,
    ) -> Result<SinkReceipt> {
        let mut prepared = self.prepare(request, base)?;
        self.renderer
            .render_to_sink(&prepared.document, sink, &prepared.style)
            .map_err(|e| self.generation_error(&prepared.document, e))?;
        prepared.document.mark_generated()?;

        let document = prepared.document;
        info!("Streamed document {}", document.id());
        Ok(SinkReceipt {
            document_id: document.id(),
            document,
        })
    }

    /// Generate a document into `dir`, creating the directory if needed.
    ///
    /// A partially written file is removed when rendering fails.
    pub fn execute_to_file(&self, request: &DocumentRequest, dir: &Path) -> Result<FileReceipt> {
        self.execute_to_file_with_style(request, dir, None)
    }

    /// Generate a document into `dir` using an explicit base style.
    pub fn execute_to_file_with_style(
        &self,
        request: &DocumentRequest,
        dir: &Path,
        base: Option<&Style>,
    ) -> Result<FileReceipt> {
        let mut prepared = self.prepare(request, base)?;
        fs::create_dir_all(dir)?;

        let filename = generate_filename(
            prepared.document.title(),
            prepared.document.id(),
            self.renderer.file_extension(),
        );
        let target = dir.join(&filename);

        let path = match self
            .renderer
            .render_to_file(&prepared.document, &target, &prepared.style)
        {
            Ok(path) => path,
            Err(e) => {
                if target.exists() {
                    if let Err(cleanup) = fs::remove_file(&target) {
                        warn!(
                            "Failed to remove partial output {}: {}",
                            target.display(),
                            cleanup
                        );
                    }
                }
                return Err(self.generation_error(&prepared.document, e));
            }
        };
        prepared.document.mark_generated()?;

        let document = prepared.document;
        info!("Wrote {}", path.display());
        Ok(FileReceipt {
            path,
            document_id: document.id(),
            document,
        })
    }

    /// Generate many documents in parallel.
    ///
    /// Results are returned in input order; one failure does not affect the
    /// others.
    pub fn execute_batch(&self, requests: &[DocumentRequest]) -> Vec<Result<GenerationOutput>> {
        debug!("Executing batch of {} requests", requests.len());
        requests.par_iter().map(|r| self.execute(r)).collect()
    }

    fn generation_error(&self, document: &Document, source: RenderError) -> Error {
        warn!(
            "Renderer {} failed for document {}: {}",
            self.renderer.name(),
            document.id(),
            source
        );
        Error::Generation {
            document_id: document.id(),
            source,
        }
    }
}

/// Build a filesystem-safe filename for a document.
///
/// Keeps ASCII and Unicode alphanumerics, spaces, hyphens and underscores,
/// trims, collapses whitespace runs to a single underscore and appends
/// `_<id>.<extension>`. A title with nothing left becomes `document`.
pub fn generate_filename(title: &str, id: DocumentId, extension: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let stem = WHITESPACE_RUN.replace_all(kept.trim(), "_");
    let stem = if stem.is_empty() {
        Cow::Borrowed("document")
    } else {
        stem
    };
    format!("{}_{}.{}", stem, id, extension)
}
