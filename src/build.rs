//! Turning validated requests into documents.

use crate::config::PipelineOptions;
use crate::error::Result;
use crate::model::{Document, Element, HeadingLevel, Section, Table};
use crate::request::{DocumentRequest, ElementRequest, SectionRequest, TableRequest};
use crate::validate::RowLengthPolicy;
use log::debug;

/// Builds [`Document`]s from requests that passed validation.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    options: PipelineOptions,
}

impl DocumentBuilder {
    /// Create a builder using the given defaults.
    pub fn new(options: &PipelineOptions) -> Self {
        Self {
            options: options.clone(),
        }
    }

    /// Build a draft document with a fresh ID.
    ///
    /// Sections keep their request order. Within a section, `elements` come
    /// first and `tables` after, each in order. Missing heading levels default
    /// to 1. Under the lenient row policy, table rows are padded or truncated
    /// to the header count.
    pub fn build(&self, request: &DocumentRequest) -> Result<Document> {
        let title = request.title.as_deref().unwrap_or_default();
        let author = request
            .author
            .as_deref()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or(self.options.default_author.as_str());

        let mut document = Document::new(title, Some(author))?
            .with_page_size(request.page_size.unwrap_or(self.options.default_page_size))
            .with_orientation(
                request
                    .orientation
                    .unwrap_or(self.options.default_orientation),
            )
            .with_metadata(request.metadata.clone());

        for section in &request.sections {
            document.add_section(self.build_section(section)?)?;
        }

        debug!(
            "Built document {} with {} sections and {} tables",
            document.id(),
            document.section_count(),
            document.table_count()
        );
        Ok(document)
    }

    fn build_section(&self, request: &SectionRequest) -> Result<Section> {
        let level = match request.level {
            Some(level) => HeadingLevel::new(level)?,
            None => HeadingLevel::default(),
        };

        let mut section = Section::new(request.title.as_deref().unwrap_or_default().trim())
            .with_level(level);
        section.content = request.content.clone().filter(|c| !c.is_empty());

        for element in &request.elements {
            let element = match element {
                ElementRequest::Table(table) => Element::Table(self.build_table(table)),
                ElementRequest::Text(text) => Element::PlainText(text.text.clone()),
                ElementRequest::Plain(text) => Element::PlainText(text.clone()),
            };
            section.add_element(element);
        }

        for table in &request.tables {
            section.add_table(self.build_table(table));
        }

        Ok(section)
    }

    fn build_table(&self, request: &TableRequest) -> Table {
        let mut table = Table::new(request.headers.clone(), request.rows.clone());
        table.title = request.title.clone();
        if self.options.row_policy == RowLengthPolicy::Lenient {
            table.normalize_rows();
        }
        table
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new(&PipelineOptions::default())
    }
}
