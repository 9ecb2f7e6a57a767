//! Structural validation of requests.
//!
//! Validation runs before any model is built, so the builder can assume a
//! sound request: a title, at least one section, titled sections with heading
//! levels in range, and tables whose shape matches the row-length policy.

use crate::error::{Error, Result};
use crate::model::HeadingLevel;
use crate::request::{DocumentRequest, ElementRequest, TableRequest};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;

/// What to do with table rows whose length differs from the header count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowLengthPolicy {
    /// Reject the request
    #[default]
    Strict,
    /// Accept it; the builder pads short rows and truncates long ones
    Lenient,
}

impl FromStr for RowLengthPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(RowLengthPolicy::Strict),
            "lenient" | "pad" => Ok(RowLengthPolicy::Lenient),
            _ => Err(Error::validation("row_policy", s, "expected strict or lenient")),
        }
    }
}

/// Checks a [`DocumentRequest`] for structural problems.
#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    row_policy: RowLengthPolicy,
}

impl RequestValidator {
    /// Create a validator with the strict row-length policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row-length policy.
    pub fn with_row_policy(mut self, policy: RowLengthPolicy) -> Self {
        self.row_policy = policy;
        self
    }

    pub fn row_policy(&self) -> RowLengthPolicy {
        self.row_policy
    }

    /// Validate a request, returning the first problem found.
    pub fn validate(&self, request: &DocumentRequest) -> Result<()> {
        let result = self.check(request);
        if let Err(ref e) = result {
            warn!("Rejected document request: {}", e);
        }
        result
    }

    fn check(&self, request: &DocumentRequest) -> Result<()> {
        let title_ok = request
            .title
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if !title_ok {
            return Err(Error::invalid_document(
                "document title is required",
                json!({ "field": "title" }),
            ));
        }

        if request.sections.is_empty() {
            return Err(Error::invalid_document(
                "document must contain at least one section",
                json!({ "field": "sections", "count": 0 }),
            ));
        }

        for (i, section) in request.sections.iter().enumerate() {
            let section_ok = section
                .title
                .as_deref()
                .is_some_and(|t| !t.trim().is_empty());
            if !section_ok {
                return Err(Error::invalid_document(
                    format!("section {} has no title", i + 1),
                    json!({ "field": format!("sections[{i}].title") }),
                ));
            }

            if let Some(level) = section.level {
                if HeadingLevel::new(level).is_err() {
                    return Err(Error::invalid_document(
                        format!("section {} has heading level {level}, expected 1-6", i + 1),
                        json!({ "field": format!("sections[{i}].level"), "value": level }),
                    ));
                }
            }

            for (k, element) in section.elements.iter().enumerate() {
                if let ElementRequest::Table(table) = element {
                    self.check_table(table, &format!("sections[{i}].elements[{k}]"))?;
                }
            }
            for (j, table) in section.tables.iter().enumerate() {
                self.check_table(table, &format!("sections[{i}].tables[{j}]"))?;
            }
        }

        Ok(())
    }

    fn check_table(&self, table: &TableRequest, path: &str) -> Result<()> {
        if table.headers.is_empty() {
            return Err(Error::invalid_document(
                "table must have at least one header",
                json!({ "field": format!("{path}.headers") }),
            ));
        }

        if self.row_policy == RowLengthPolicy::Strict {
            let expected = table.headers.len();
            if let Some((k, row)) = table
                .rows
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != expected)
            {
                return Err(Error::invalid_document(
                    format!(
                        "table row {} has {} cells but the table has {} headers",
                        k + 1,
                        row.len(),
                        expected
                    ),
                    json!({
                        "field": format!("{path}.rows[{k}]"),
                        "expected": expected,
                        "found": row.len(),
                    }),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::SectionRequest;

    fn valid_request() -> DocumentRequest {
        DocumentRequest::new("Report").with_section(SectionRequest::new("Intro"))
    }

    fn field_of(err: &Error) -> String {
        err.details()["field"].as_str().unwrap_or_default().to_string()
    }

    #[test]
    fn test_valid_request() {
        assert!(RequestValidator::new().validate(&valid_request()).is_ok());
    }

    #[test]
    fn test_missing_title() {
        let mut request = valid_request();
        request.title = None;
        let err = RequestValidator::new().validate(&request).unwrap_err();
        assert_eq!(field_of(&err), "title");
    }

    #[test]
    fn test_whitespace_title() {
        let mut request = valid_request();
        request.title = Some(" \t\n".into());
        let err = RequestValidator::new().validate(&request).unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { .. }));
        assert_eq!(field_of(&err), "title");
    }

    #[test]
    fn test_no_sections() {
        let request = DocumentRequest::new("Report");
        let err = RequestValidator::new().validate(&request).unwrap_err();
        assert_eq!(field_of(&err), "sections");
        assert_eq!(err.details()["count"], 0);
    }

    #[test]
    fn test_untitled_section() {
        let request = valid_request().with_section(SectionRequest::default());
        let err = RequestValidator::new().validate(&request).unwrap_err();
        assert_eq!(field_of(&err), "sections[1].title");
    }

    #[test]
    fn test_level_out_of_range() {
        for level in [0, 7, -1] {
            let request = DocumentRequest::new("R")
                .with_section(SectionRequest::new("S").with_level(level));
            let err = RequestValidator::new().validate(&request).unwrap_err();
            assert_eq!(field_of(&err), "sections[0].level");
        }
        let request =
            DocumentRequest::new("R").with_section(SectionRequest::new("S").with_level(6));
        assert!(RequestValidator::new().validate(&request).is_ok());
    }

    #[test]
    fn test_empty_headers() {
        let table = TableRequest::new(Vec::<String>::new(), Vec::<Vec<String>>::new());
        let request =
            DocumentRequest::new("R").with_section(SectionRequest::new("S").with_table(table));
        let err = RequestValidator::new().validate(&request).unwrap_err();
        assert_eq!(field_of(&err), "sections[0].tables[0].headers");
    }

    #[test]
    fn test_row_length_strict() {
        let table = TableRequest::new(["a", "b"], [vec!["1", "2"], vec!["3"]]);
        let request =
            DocumentRequest::new("R").with_section(SectionRequest::new("S").with_table(table));
        let err = RequestValidator::new().validate(&request).unwrap_err();
        let details = err.details();
        assert_eq!(details["field"], "sections[0].tables[0].rows[1]");
        assert_eq!(details["expected"], 2);
        assert_eq!(details["found"], 1);
    }

    #[test]
    fn test_table_paths_follow_their_list() {
        let mut section = SectionRequest::new("S")
            .with_text("x")
            .with_table(TableRequest::new(["a", "b"], [vec!["1"]]));
        section
            .elements
            .push(ElementRequest::Table(TableRequest::new(["a"], [vec!["1"]])));
        let request = DocumentRequest::new("R").with_section(section.clone());
        let err = RequestValidator::new().validate(&request).unwrap_err();
        assert_eq!(field_of(&err), "sections[0].tables[0].rows[0]");

        section
            .elements
            .push(ElementRequest::Table(TableRequest::new(["a", "b"], [vec!["1"]])));
        let request = DocumentRequest::new("R").with_section(section);
        let err = RequestValidator::new().validate(&request).unwrap_err();
        assert_eq!(field_of(&err), "sections[0].elements[2].rows[0]");
    }

    #[test]
    fn test_row_length_lenient() {
        let table = TableRequest::new(["a", "b"], [vec!["1", "2", "3"], vec!["4"]]);
        let request =
            DocumentRequest::new("R").with_section(SectionRequest::new("S").with_table(table));
        let validator = RequestValidator::new().with_row_policy(RowLengthPolicy::Lenient);
        assert!(validator.validate(&request).is_ok());
    }

    #[test]
    fn test_row_policy_parse() {
        assert_eq!("Lenient".parse::<RowLengthPolicy>().unwrap(), RowLengthPolicy::Lenient);
        assert_eq!("strict".parse::<RowLengthPolicy>().unwrap(), RowLengthPolicy::Strict);
        assert!("loose".parse::<RowLengthPolicy>().is_err());
    }
}
