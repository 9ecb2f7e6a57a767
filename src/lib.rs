//! # reportkit
//!
//! Validated report documents and layered style resolution for print-ready output.
//!
//! A JSON request describing a titled document with sections, text and tables
//! is validated, built into an immutable [`Document`], paired with a resolved
//! [`Style`] and handed to a pluggable [`Renderer`].
//!
//! ## Quick Start
//!
//! ```
//! use reportkit::{generate, MarkdownRenderer};
//!
//! fn main() -> reportkit::Result<()> {
//!     let request = r##"{
//!         "title": "Quarterly Report",
//!         "sections": [{ "title": "Summary", "content": "Revenue grew 12%." }],
//!         "style": { "preset": "professional", "primaryColor": "#003366" }
//!     }"##;
//!
//!     let output = generate(request, MarkdownRenderer::default())?;
//!     assert!(output.filename.starts_with("Quarterly_Report_"));
//!     assert!(output.document.is_generated());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Construct-or-fail style values**: colors, fonts and margins reject bad input
//! - **Named presets**: `default`, `minimal`, `professional`, shared process-wide
//! - **Field-level overrides**: only the fields a request sets replace the base
//! - **Structured errors**: every failure has a code, message and details map
//! - **Parallel batches**: uses Rayon for many independent requests
//! - **Async**: optional tokio wrapper behind the `async` feature

pub mod build;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod request;
pub mod style;
pub mod validate;

#[cfg(feature = "async")]
pub mod async_pipeline;

// Re-export commonly used types
#[cfg(feature = "async")]
pub use async_pipeline::AsyncPipeline;
pub use build::DocumentBuilder;
pub use config::PipelineOptions;
pub use error::{Error, Result};
pub use model::{
    Document, DocumentId, DocumentState, Element, HeadingLevel, Orientation, PageSize, Section,
    Table,
};
pub use pipeline::{
    generate_filename, DocumentPipeline, FileReceipt, GenerationOutput, PreparedDocument,
    SinkReceipt,
};
pub use render::{
    JsonFormat, JsonRenderer, MarkdownOptions, MarkdownRenderer, RenderError, Renderer,
};
pub use request::{DocumentRequest, SectionRequest, TableRequest};
pub use style::{
    resolve, ColorSet, FontFamily, FontSet, HexColor, MarginSet, Preset, Style, StyleOverrides,
};
pub use validate::{RequestValidator, RowLengthPolicy};

use std::path::Path;

/// Parse a JSON request and generate it with `renderer`.
///
/// # Example
///
/// ```
/// use reportkit::{generate, JsonRenderer};
///
/// let output = generate(
///     r#"{"title": "Report", "sections": [{"title": "One"}]}"#,
///     JsonRenderer::new(),
/// ).unwrap();
/// assert!(output.filename.ends_with(".json"));
/// ```
pub fn generate<R: Renderer>(request_json: &str, renderer: R) -> Result<GenerationOutput> {
    let request = DocumentRequest::from_json(request_json)?;
    DocumentPipeline::new(renderer).execute(&request)
}

/// Parse a JSON request file and generate it with `renderer`.
pub fn generate_file<P: AsRef<Path>, R: Renderer>(
    path: P,
    renderer: R,
) -> Result<GenerationOutput> {
    let file = std::fs::File::open(path)?;
    let request = DocumentRequest::from_reader(std::io::BufReader::new(file))?;
    DocumentPipeline::new(renderer).execute(&request)
}

/// Check a JSON request without building or rendering it.
///
/// # Example
///
/// ```
/// use reportkit::validate_request;
///
/// let err = validate_request(r#"{"title": "  ", "sections": []}"#).unwrap_err();
/// assert_eq!(err.details()["field"], "title");
/// ```
pub fn validate_request(request_json: &str) -> Result<DocumentRequest> {
    let request = DocumentRequest::from_json(request_json)?;
    RequestValidator::new().validate(&request)?;
    Ok(request)
}
