//! Markdown preview rendering.
//!
//! Produces a readable Markdown rendition of a document, optionally preceded by
//! YAML frontmatter describing the document and its resolved style. The sink
//! variant writes one section at a time.

use super::{RenderError, Renderer};
use crate::model::{Document, Element, Section, Table};
use crate::style::Style;
use std::io::Write;

/// Options for Markdown output.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Include YAML frontmatter with document metadata and style
    pub include_frontmatter: bool,

    /// Escape special Markdown characters in text
    pub escape_special_chars: bool,

    /// Render the document title as a top-level heading
    pub title_heading: bool,
}

impl MarkdownOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Enable or disable the title heading.
    pub fn with_title_heading(mut self, title: bool) -> Self {
        self.title_heading = title;
        self
    }
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            include_frontmatter: true,
            escape_special_chars: true,
            title_heading: true,
        }
    }
}

/// Markdown renderer.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: MarkdownOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    fn frontmatter(&self, doc: &Document, style: &Style) -> String {
        let (width, height) = doc.page_dimensions();
        let margins = style.margins();
        let fonts = style.fonts();

        let mut lines = vec!["---".to_string()];
        lines.push(format!("title: \"{}\"", escape_yaml(doc.title())));
        lines.push(format!("author: \"{}\"", escape_yaml(doc.author())));
        lines.push(format!("document_id: \"{}\"", doc.id()));
        lines.push(format!("created: {}", doc.created_at().to_rfc3339()));
        lines.push(format!("page_size: {:?}", doc.page_size()));
        lines.push(format!("page_points: [{}, {}]", width, height));
        lines.push(format!("font: \"{} {}pt\"", fonts.family(), fonts.size_body()));
        lines.push(format!("line_height: {}", fonts.line_height()));
        lines.push(format!("primary_color: \"{}\"", style.colors().primary()));
        lines.push(format!("text_color: \"{}\"", style.colors().text()));
        lines.push(format!(
            "margins: [{}, {}, {}, {}]",
            margins.top(),
            margins.right(),
            margins.bottom(),
            margins.left()
        ));
        for (key, value) in doc.metadata() {
            lines.push(format!("\"{}\": {}", escape_yaml(key), value));
        }
        lines.push("---".to_string());
        lines.push(String::new());
        lines.push(String::new());
        lines.join("\n")
    }

    fn render_section(&self, output: &mut String, section: &Section) {
        // The document title takes `#`, so sections start one level down.
        let offset = usize::from(self.options.title_heading);
        let level = (section.level.get() as usize + offset).min(6);
        output.push_str(&"#".repeat(level));
        output.push(' ');
        output.push_str(&self.text(&section.title));
        output.push_str("\n\n");

        if let Some(ref content) = section.content {
            output.push_str(&self.text(content));
            output.push_str("\n\n");
        }

        for element in &section.elements {
            match element {
                Element::PlainText(text) => {
                    output.push_str(&self.text(text));
                    output.push_str("\n\n");
                }
                Element::Table(table) => self.render_table(output, table),
            }
        }
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        if table.column_count() == 0 {
            return;
        }

        if let Some(ref title) = table.title {
            output.push_str(&format!("**{}**\n\n", self.text(title)));
        }

        output.push('|');
        for header in &table.headers {
            output.push_str(&format!(" {} |", escape_cell(header)));
        }
        output.push('\n');

        output.push('|');
        for _ in &table.headers {
            output.push_str(" --- |");
        }
        output.push('\n');

        for row in &table.rows {
            output.push('|');
            for cell in row {
                output.push_str(&format!(" {} |", escape_cell(cell)));
            }
            output.push('\n');
        }

        output.push('\n');
    }

    fn text(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn name(&self) -> &str {
        "markdown"
    }

    fn file_extension(&self) -> &str {
        "md"
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
        style: &Style,
    ) -> Result<(), RenderError> {
        if self.options.include_frontmatter {
            sink.write_all(self.frontmatter(document, style).as_bytes())?;
        }

        if self.options.title_heading {
            writeln!(sink, "# {}\n", self.text(document.title()))?;
        }

        let mut block = String::new();
        for section in document.sections() {
            block.clear();
            self.render_section(&mut block, section);
            sink.write_all(block.as_bytes())?;
        }

        sink.flush()?;
        Ok(())
    }
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ").trim().to_string()
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
