//! Document-level types.

use super::Section;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Author recorded when the request does not name one.
pub const DEFAULT_AUTHOR: &str = "System";

/// Unique document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a fresh random ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Paper sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageSize {
    #[serde(alias = "a3")]
    A3,
    #[default]
    #[serde(alias = "a4")]
    A4,
    #[serde(alias = "a5")]
    A5,
    #[serde(alias = "letter", alias = "LETTER")]
    Letter,
    #[serde(alias = "legal", alias = "LEGAL")]
    Legal,
}

impl PageSize {
    /// Portrait width and height in points (1 point = 1/72 inch).
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A4 => (595.28, 841.89),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0), // 8.5 * 72, 11 * 72
            PageSize::Legal => (612.0, 1008.0),
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A3" => Ok(PageSize::A3),
            "A4" => Ok(PageSize::A4),
            "A5" => Ok(PageSize::A5),
            "LETTER" => Ok(PageSize::Letter),
            "LEGAL" => Ok(PageSize::Legal),
            _ => Err(Error::validation(
                "page_size",
                s,
                "expected one of A3, A4, A5, Letter, Legal",
            )),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    #[serde(alias = "Portrait", alias = "PORTRAIT")]
    Portrait,
    #[serde(alias = "Landscape", alias = "LANDSCAPE")]
    Landscape,
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            _ => Err(Error::validation(
                "orientation",
                s,
                "expected portrait or landscape",
            )),
        }
    }
}

/// Generation state. Moves from `Draft` to `Generated` exactly once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentState {
    #[default]
    Draft,
    Generated,
}

/// A report ready to be rendered.
///
/// Fields are private: a document can only gain sections while in draft and
/// can only move to [`DocumentState::Generated`], never back.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    id: DocumentId,
    title: String,
    author: String,
    page_size: PageSize,
    orientation: Orientation,
    sections: Vec<Section>,
    metadata: Map<String, Value>,
    state: DocumentState,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Create a draft document with a fresh ID.
    ///
    /// The title is trimmed and must not be empty. A missing or blank author
    /// is recorded as [`DEFAULT_AUTHOR`].
    pub fn new(title: &str, author: Option<&str>) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::invalid_document(
                "document title is required",
                json!({ "field": "title" }),
            ));
        }

        let author = author
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_AUTHOR);

        Ok(Self {
            id: DocumentId::new(),
            title: title.to_string(),
            author: author.to_string(),
            page_size: PageSize::default(),
            orientation: Orientation::default(),
            sections: Vec::new(),
            metadata: Map::new(),
            state: DocumentState::Draft,
            created_at: Utc::now(),
            generated_at: None,
        })
    }

    /// Set the page size and return self.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the orientation and return self.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set the metadata map and return self.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Append a section. Fails once the document has been generated.
    pub fn add_section(&mut self, section: Section) -> Result<()> {
        if self.state == DocumentState::Generated {
            return Err(Error::invalid_document(
                "cannot add sections to a generated document",
                json!({ "document_id": self.id.to_string(), "state": "generated" }),
            ));
        }
        self.sections.push(section);
        Ok(())
    }

    /// Move the document to `Generated`.
    ///
    /// Fails if it has no sections or was already generated.
    pub fn mark_generated(&mut self) -> Result<()> {
        if self.state == DocumentState::Generated {
            return Err(Error::invalid_document(
                "document was already generated",
                json!({ "document_id": self.id.to_string(), "state": "generated" }),
            ));
        }
        if self.sections.is_empty() {
            return Err(Error::invalid_document(
                "document must contain at least one section",
                json!({ "field": "sections", "count": 0 }),
            ));
        }
        self.state = DocumentState::Generated;
        self.generated_at = Some(Utc::now());
        Ok(())
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn is_generated(&self) -> bool {
        self.state == DocumentState::Generated
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    /// Get the number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Get the number of tables across all sections.
    pub fn table_count(&self) -> usize {
        self.sections.iter().map(|s| s.tables().count()).sum()
    }

    /// Page width and height in points, honoring orientation.
    pub fn page_dimensions(&self) -> (f32, f32) {
        let (w, h) = self.page_size.dimensions();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        std::iter::once(self.title.clone())
            .chain(self.sections.iter().map(Section::plain_text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
