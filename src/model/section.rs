//! Section-level types.

use super::Table;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A heading level between 1 and 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Create a heading level. Values outside `1..=6` are rejected, not clamped.
    pub fn new(level: i64) -> Result<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(Error::validation("level", level, "heading level must be between 1 and 6"))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for HeadingLevel {
    type Error = Error;

    fn try_from(level: i64) -> Result<Self> {
        Self::new(level)
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

/// A content element inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Element {
    /// A paragraph of text
    PlainText(String),
    /// A data table
    Table(Table),
}

impl Element {
    /// Get plain text representation of the element.
    pub fn plain_text(&self) -> String {
        match self {
            Element::PlainText(text) => text.clone(),
            Element::Table(table) => table.plain_text(),
        }
    }

    /// Get the table if this element is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Element::Table(table) => Some(table),
            Element::PlainText(_) => None,
        }
    }
}

/// An ordered subdivision of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading
    pub title: String,

    /// Introductory text rendered under the heading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Heading level
    pub level: HeadingLevel,

    /// Text and tables in order
    pub elements: Vec<Element>,
}

impl Section {
    /// Create a level-1 section with no content.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: None,
            level: HeadingLevel::default(),
            elements: Vec::new(),
        }
    }

    /// Set the content and return self.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the heading level and return self.
    pub fn with_level(mut self, level: HeadingLevel) -> Self {
        self.level = level;
        self
    }

    /// Append an element.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Append a text paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.elements.push(Element::PlainText(text.into()));
    }

    /// Append a table.
    pub fn add_table(&mut self, table: Table) {
        self.elements.push(Element::Table(table));
    }

    /// Iterate over the tables in this section.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.elements.iter().filter_map(Element::as_table)
    }

    /// Get plain text content of the section.
    pub fn plain_text(&self) -> String {
        let mut parts = vec![self.title.clone()];
        if let Some(ref content) = self.content {
            parts.push(content.clone());
        }
        parts.extend(self.elements.iter().map(Element::plain_text));
        parts.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_level_range() {
        assert_eq!(HeadingLevel::new(1).unwrap().get(), 1);
        assert_eq!(HeadingLevel::new(6).unwrap().get(), 6);
        assert!(HeadingLevel::new(0).is_err());
        assert!(HeadingLevel::new(7).is_err());
        assert!(HeadingLevel::new(-3).is_err());
        assert_eq!(HeadingLevel::default().get(), 1);
    }

    #[test]
    fn test_section_elements_keep_order() {
        let mut section = Section::new("Data").with_content("Intro");
        section.add_text("first");
        section.add_table(Table::from_strings(["A"], [vec!["1"]]));
        section.add_text("last");

        assert_eq!(section.elements.len(), 3);
        assert!(matches!(section.elements[0], Element::PlainText(ref t) if t == "first"));
        assert!(matches!(section.elements[1], Element::Table(_)));
        assert_eq!(section.tables().count(), 1);
    }

    #[test]
    fn test_plain_text() {
        let mut section = Section::new("Summary").with_content("All good.");
        section.add_text("More.");
        assert_eq!(section.plain_text(), "Summary\n\nAll good.\n\nMore.");
    }

    #[test]
    fn test_element_serialization_is_tagged() {
        let json = serde_json::to_value(Element::PlainText("hi".into())).unwrap();
        assert_eq!(json["type"], "plain_text");
        assert_eq!(json["value"], "hi");
    }
}
