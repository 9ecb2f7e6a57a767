//! Integration tests for the generation pipeline.
//!
//! These use mock renderers to observe what the pipeline hands to the backend
//! and how it reacts to backend failures.

use reportkit::model::{Document, DocumentState};
use reportkit::request::{DocumentRequest, SectionRequest, TableRequest};
use reportkit::style::{Preset, Style, StyleOverrides};
use reportkit::{DocumentPipeline, Error, PipelineOptions, RenderError, Renderer};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

// ==================== Mock Renderers ====================

/// Returns fixed bytes and records what it saw.
#[derive(Default)]
struct RecordingRenderer {
    calls: AtomicUsize,
    seen_states: Mutex<Vec<DocumentState>>,
    seen_styles: Mutex<Vec<Style>>,
}

impl RecordingRenderer {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Renderer for RecordingRenderer {
    fn name(&self) -> &str {
        "recording"
    }

    fn render(&self, document: &Document, style: &Style) -> Result<Vec<u8>, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_states.lock().unwrap().push(document.state());
        self.seen_styles.lock().unwrap().push(style.clone());
        Ok(b"%PDF-1.4 ...".to_vec())
    }
}

/// Always fails.
struct FailingRenderer;

impl Renderer for FailingRenderer {
    fn name(&self) -> &str {
        "failing"
    }

    fn render(&self, _document: &Document, _style: &Style) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Backend("font table corrupt".to_string()))
    }
}

/// Writes one chunk per section, then fails if asked to.
struct ChunkedRenderer {
    fail_after_first: bool,
}

impl Renderer for ChunkedRenderer {
    fn name(&self) -> &str {
        "chunked"
    }

    fn render(&self, document: &Document, style: &Style) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Vec::new();
        self.render_to_sink(document, &mut buffer, style)?;
        Ok(buffer)
    }

    fn render_to_sink(
        &self,
        document: &Document,
        sink: &mut dyn Write,
        _style: &Style,
    ) -> Result<(), RenderError> {
        for (i, section) in document.sections().iter().enumerate() {
            if self.fail_after_first && i == 1 {
                return Err(RenderError::Backend("out of paper".to_string()));
            }
            writeln!(sink, "[{}]", section.title)?;
        }
        Ok(())
    }
}

fn quarterly_report() -> DocumentRequest {
    DocumentRequest::new("Quarterly Report")
        .with_section(SectionRequest::new("Summary").with_content("Revenue grew 12%."))
        .with_section(
            SectionRequest::new("Regional Data")
                .with_level(2)
                .with_table(TableRequest::new(
                    ["Region", "Sales"],
                    [vec!["North", "1200"], vec!["South", "950"]],
                )),
        )
}

// ==================== Validation Failures ====================

#[test]
fn test_blank_title_never_reaches_renderer() {
    let pipeline = DocumentPipeline::new(RecordingRenderer::default());

    for title in ["", "   ", "\t\n"] {
        let request = DocumentRequest::new(title).with_section(SectionRequest::new("One"));
        let err = pipeline.execute(&request).unwrap_err();

        assert!(matches!(err, Error::InvalidDocument { .. }));
        assert_eq!(err.details()["field"], "title");
    }

    let missing: DocumentRequest =
        DocumentRequest::from_json(r#"{"sections": [{"title": "One"}]}"#).unwrap();
    assert!(pipeline.execute(&missing).is_err());

    assert_eq!(pipeline.renderer().calls(), 0);
}

#[test]
fn test_empty_sections_rejected_with_count() {
    let pipeline = DocumentPipeline::new(RecordingRenderer::default());
    let err = pipeline
        .execute(&DocumentRequest::new("Quarterly Report"))
        .unwrap_err();

    assert_eq!(err.code(), "INVALID_DOCUMENT");
    assert_eq!(err.details()["field"], "sections");
    assert_eq!(err.details()["count"], 0);
    assert_eq!(pipeline.renderer().calls(), 0);
}

#[test]
fn test_heading_level_out_of_range_rejected() {
    let pipeline = DocumentPipeline::new(RecordingRenderer::default());
    for level in [0, 7, -1] {
        let request =
            DocumentRequest::new("R").with_section(SectionRequest::new("S").with_level(level));
        let err = pipeline.execute(&request).unwrap_err();
        assert_eq!(err.details()["field"], "sections[0].level");
    }
    assert_eq!(pipeline.renderer().calls(), 0);
}

#[test]
fn test_error_payload_shape() {
    let pipeline = DocumentPipeline::new(RecordingRenderer::default());
    let payload = pipeline
        .execute(&DocumentRequest::new(" "))
        .unwrap_err()
        .to_json();

    assert_eq!(payload["error"], "INVALID_DOCUMENT");
    assert!(payload["message"].is_string());
    assert_eq!(payload["details"]["field"], "title");
}

// ==================== Successful Generation ====================

#[test]
fn test_quarterly_report_success() {
    let pipeline = DocumentPipeline::new(RecordingRenderer::default());
    let output = pipeline.execute(&quarterly_report()).unwrap();

    assert_eq!(output.content, b"%PDF-1.4 ...");
    assert_eq!(
        output.filename,
        format!("Quarterly_Report_{}.pdf", output.document_id)
    );
    assert_eq!(output.document.state(), DocumentState::Generated);
    assert_eq!(output.document.author(), "System");

    // the renderer saw a draft; the state flips only after it returns
    assert_eq!(pipeline.renderer().calls(), 1);
    assert_eq!(
        *pipeline.renderer().seen_states.lock().unwrap(),
        vec![DocumentState::Draft]
    );
}

#[test]
fn test_punctuated_title_filename() {
    let pipeline = DocumentPipeline::new(RecordingRenderer::default());
    let request = DocumentRequest::new("Q1/Q2: Report!").with_section(SectionRequest::new("One"));
    let output = pipeline.execute(&request).unwrap();

    let suffix = format!("_{}.pdf", output.document_id);
    let stem = output.filename.strip_suffix(&suffix).unwrap();
    assert!(stem
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-'));
    assert_eq!(stem, "Q1Q2_Report");
}

#[test]
fn test_style_reaches_renderer() {
    let pipeline = DocumentPipeline::new(RecordingRenderer::default());
    let request = quarterly_report().with_style(
        StyleOverrides::new()
            .with_preset(Preset::Professional)
            .with_primary_color("#003366"),
    );
    pipeline.execute(&request).unwrap();

    let styles = pipeline.renderer().seen_styles.lock().unwrap();
    let professional = Preset::Professional.style();
    assert_eq!(styles[0].colors().primary().as_str(), "#003366");
    assert_eq!(styles[0].colors().secondary(), professional.colors().secondary());
    assert_eq!(styles[0].fonts(), professional.fonts());
}

#[test]
fn test_configured_default_preset() {
    let options = PipelineOptions::new().with_preset(Preset::Minimal);
    let pipeline = DocumentPipeline::with_options(RecordingRenderer::default(), options);
    pipeline.execute(&quarterly_report()).unwrap();

    let styles = pipeline.renderer().seen_styles.lock().unwrap();
    assert_eq!(&styles[0], Preset::Minimal.style());
}

#[test]
fn test_explicit_base_style() {
    let pipeline = DocumentPipeline::new(RecordingRenderer::default());
    let request =
        quarterly_report().with_style(StyleOverrides::new().with_preset(Preset::Minimal));
    pipeline
        .execute_with_style(&request, Some(Preset::Professional.style()))
        .unwrap();

    let styles = pipeline.renderer().seen_styles.lock().unwrap();
    assert_eq!(&styles[0], Preset::Professional.style());
}

#[test]
fn test_explicit_base_style_through_sink_and_file() {
    let pipeline = DocumentPipeline::new(RecordingRenderer::default());
    let request =
        quarterly_report().with_style(StyleOverrides::new().with_preset(Preset::Minimal));

    let mut sink = Vec::new();
    let receipt = pipeline
        .execute_to_sink_with_style(&request, &mut sink, Some(Preset::Professional.style()))
        .unwrap();
    assert!(receipt.document.is_generated());
    assert_eq!(sink, b"%PDF-1.4 ...");

    let dir = tempfile::tempdir().unwrap();
    pipeline
        .execute_to_file_with_style(&request, dir.path(), Some(Preset::Professional.style()))
        .unwrap();

    // without a base the request preset applies
    pipeline.execute_to_sink(&request, &mut Vec::new()).unwrap();

    let styles = pipeline.renderer().seen_styles.lock().unwrap();
    assert_eq!(styles.len(), 3);
    assert_eq!(&styles[0], Preset::Professional.style());
    assert_eq!(&styles[1], Preset::Professional.style());
    assert_eq!(&styles[2], Preset::Minimal.style());
}

// ==================== Render Failures ====================

#[test]
fn test_failing_renderer_wraps_error() {
    let pipeline = DocumentPipeline::new(FailingRenderer);
    let mut prepared = pipeline.prepare(&quarterly_report(), None).unwrap();
    let document_id = prepared.document.id();

    let err = pipeline.render_prepared(&mut prepared).unwrap_err();
    match err {
        Error::Generation {
            document_id: id,
            ref source,
        } => {
            assert_eq!(id, document_id);
            assert_eq!(source.to_string(), "font table corrupt");
        }
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.code(), "PDF_GENERATION_ERROR");
    assert_eq!(err.details()["document_id"], document_id.to_string());

    assert_eq!(prepared.document.state(), DocumentState::Draft);
    assert!(prepared.document.generated_at().is_none());
}

#[test]
fn test_failing_renderer_via_execute() {
    let pipeline = DocumentPipeline::new(FailingRenderer);
    let err = pipeline.execute(&quarterly_report()).unwrap_err();
    assert!(!err.is_validation());
    assert!(err.to_string().contains("font table corrupt"));
}

// ==================== Sink and File Output ====================

#[test]
fn test_sink_entry_point() {
    let pipeline = DocumentPipeline::new(ChunkedRenderer {
        fail_after_first: false,
    });
    let mut sink = Vec::new();
    let receipt = pipeline
        .execute_to_sink(&quarterly_report(), &mut sink)
        .unwrap();

    assert_eq!(sink, b"[Summary]\n[Regional Data]\n");
    assert_eq!(receipt.document_id, receipt.document.id());
    assert!(receipt.document.is_generated());
}

#[test]
fn test_sink_failure_leaves_partial_output() {
    let pipeline = DocumentPipeline::new(ChunkedRenderer {
        fail_after_first: true,
    });
    let mut sink = Vec::new();
    let err = pipeline
        .execute_to_sink(&quarterly_report(), &mut sink)
        .unwrap_err();

    assert!(matches!(err, Error::Generation { .. }));
    assert_eq!(sink, b"[Summary]\n");
}

#[test]
fn test_execute_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("reports");
    let pipeline = DocumentPipeline::new(RecordingRenderer::default());

    let receipt = pipeline.execute_to_file(&quarterly_report(), &out).unwrap();

    assert_eq!(receipt.path.parent().unwrap(), out);
    assert_eq!(
        receipt.path.file_name().unwrap().to_str().unwrap(),
        format!("Quarterly_Report_{}.pdf", receipt.document_id)
    );
    assert_eq!(std::fs::read(&receipt.path).unwrap(), b"%PDF-1.4 ...");
    assert!(receipt.document.is_generated());
}

#[test]
fn test_execute_to_file_failure_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = DocumentPipeline::new(ChunkedRenderer {
        fail_after_first: true,
    });

    assert!(pipeline
        .execute_to_file(&quarterly_report(), dir.path())
        .is_err());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

// ==================== Batch ====================

#[test]
fn test_batch_keeps_order_and_isolates_failures() {
    let pipeline = DocumentPipeline::new(RecordingRenderer::default());
    let requests: Vec<DocumentRequest> = (0..20)
        .map(|i| {
            if i % 5 == 3 {
                DocumentRequest::new(format!("Report {i}"))
            } else {
                DocumentRequest::new(format!("Report {i}"))
                    .with_section(SectionRequest::new("Body"))
            }
        })
        .collect();

    let results = pipeline.execute_batch(&requests);

    assert_eq!(results.len(), 20);
    for (i, result) in results.iter().enumerate() {
        if i % 5 == 3 {
            assert!(result.is_err());
        } else {
            let output = result.as_ref().unwrap();
            assert_eq!(output.document.title(), format!("Report {i}"));
        }
    }
    assert_eq!(pipeline.renderer().calls(), 16);
}

#[test]
fn test_concurrent_documents_get_unique_ids() {
    let pipeline = DocumentPipeline::new(RecordingRenderer::default());
    let requests = vec![quarterly_report(); 8];
    let mut ids: Vec<_> = pipeline
        .execute_batch(&requests)
        .into_iter()
        .map(|r| r.unwrap().document_id)
        .collect();
    ids.sort_by_key(|id| id.to_string());
    ids.dedup();
    assert_eq!(ids.len(), 8);
}
