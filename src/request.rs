//! Untrusted input describing a document to generate.
//!
//! Requests are deserialized from JSON with camelCase keys. Nothing here is
//! validated: a request goes through [`crate::validate::RequestValidator`]
//! before [`crate::build::DocumentBuilder`] turns it into a [`crate::Document`].
//!
//! ```
//! use reportkit::request::DocumentRequest;
//!
//! let request = DocumentRequest::from_json(r#"{
//!     "title": "Quarterly Report",
//!     "sections": [
//!         { "title": "Summary", "content": "Revenue grew." },
//!         { "title": "Data", "level": 2,
//!           "tables": [{ "headers": ["Region", "Sales"], "rows": [["North", 1200]] }] }
//!     ]
//! }"#).unwrap();
//!
//! assert_eq!(request.sections.len(), 2);
//! assert_eq!(request.sections[1].tables[0].rows[0][1], "1200");
//! ```

use crate::error::Result;
use crate::model::{Orientation, PageSize};
use crate::style::StyleOverrides;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level generation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentRequest {
    /// Document title (required, checked by the validator)
    pub title: Option<String>,

    /// Author; the builder falls back to a default when absent
    pub author: Option<String>,

    pub page_size: Option<PageSize>,

    pub orientation: Option<Orientation>,

    /// Sections in order (at least one required)
    pub sections: Vec<SectionRequest>,

    /// Style preferences merged onto the base style
    pub style: Option<StyleOverrides>,

    /// Free-form metadata passed through to the document
    pub metadata: Map<String, Value>,
}

impl DocumentRequest {
    /// Create a request with a title and no sections.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Parse a request from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a request from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a request from a reader.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    /// Append a section and return self.
    pub fn with_section(mut self, section: SectionRequest) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_style(mut self, style: StyleOverrides) -> Self {
        self.style = Some(style);
        self
    }

    /// Insert a metadata entry and return self.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// One section of a request.
///
/// Elements are taken from `elements` first, then `tables`, each in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionRequest {
    pub title: Option<String>,

    pub content: Option<String>,

    /// Heading level; checked against 1..=6 by the validator, defaults to 1
    pub level: Option<i64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<ElementRequest>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<TableRequest>,
}

impl SectionRequest {
    /// Create a section request with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_level(mut self, level: i64) -> Self {
        self.level = Some(level);
        self
    }

    /// Append a text element and return self.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.elements.push(ElementRequest::Plain(text.into()));
        self
    }

    /// Append a table and return self.
    pub fn with_table(mut self, table: TableRequest) -> Self {
        self.tables.push(table);
        self
    }
}

/// A section element, recognized by its shape.
///
/// An object with both `headers` and `rows` is a table; an object with `text`
/// or a bare string is a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementRequest {
    Table(TableRequest),
    Text(TextRequest),
    Plain(String),
}

/// A paragraph given as an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRequest {
    #[serde(alias = "content")]
    pub text: String,
}

/// A table in a request. Cells may be strings, numbers, booleans or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRequest {
    pub headers: Vec<String>,

    #[serde(deserialize_with = "deserialize_rows")]
    pub rows: Vec<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl TableRequest {
    /// Create a table request from string slices.
    pub fn new<S: Into<String>>(
        headers: impl IntoIterator<Item = S>,
        rows: impl IntoIterator<Item = Vec<S>>,
    ) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

fn deserialize_rows<'de, D>(deserializer: D) -> std::result::Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows: Vec<Vec<Value>> = Vec::deserialize(deserializer)?;
    rows.into_iter()
        .map(|row| row.into_iter().map(cell_to_string).collect())
        .collect()
}

fn cell_to_string<E: de::Error>(value: Value) -> std::result::Result<String, E> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(E::custom(
            "table cells must be strings, numbers, booleans or null",
        )),
    }
}
