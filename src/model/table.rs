//! Table types.

use serde::{Deserialize, Serialize};

/// A table with a header row and string cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Column headers
    pub headers: Vec<String>,

    /// Body rows, each an ordered list of cells
    pub rows: Vec<Vec<String>>,

    /// Table caption
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Table {
    /// Create a table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers,
            rows,
            title: None,
        }
    }

    /// Create a table from string slices.
    pub fn from_strings<S: Into<String>>(
        headers: impl IntoIterator<Item = S>,
        rows: impl IntoIterator<Item = Vec<S>>,
    ) -> Self {
        Self::new(
            headers.into_iter().map(Into::into).collect(),
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Set the caption and return self.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Get the number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on the header).
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Check if the table has no body rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Indices of rows whose length differs from the header count.
    pub fn mismatched_rows(&self) -> Vec<usize> {
        let columns = self.column_count();
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.len() != columns)
            .map(|(i, _)| i)
            .collect()
    }

    /// Pad short rows with empty cells and truncate long ones to the header count.
    pub fn normalize_rows(&mut self) {
        let columns = self.column_count();
        for row in &mut self.rows {
            row.resize(columns, String::new());
        }
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        if let Some(ref title) = self.title {
            lines.push(title.clone());
        }
        lines.push(self.headers.join("\t"));
        lines.extend(self.rows.iter().map(|row| row.join("\t")));
        lines.join("\n")
    }
}
