//! Error types for the triage service
//!
//! Only [`TriageError::Validation`] ever reaches an HTTP caller. Scoring has no
//! failure path, so there is no variant for it.

use serde::Serialize;
use thiserror::Error;

pub use crate::config::ConfigError;

/// Category of a single rejected field, serialized as the `type` of a [`FieldIssue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Required field absent
    Missing,
    /// Value has the wrong JSON type or is not numeric
    TypeError,
    /// Value lies outside its declared bound
    RangeError,
    /// Any other schema violation
    ValueError,
    /// Body could not be parsed as JSON at all
    JsonInvalid,
}

/// One offending location in a rejected request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: IssueKind,
}

impl FieldIssue {
    /// Issue attached to a named body field
    pub fn field<F: Into<String>, M: Into<String>>(field: F, kind: IssueKind, msg: M) -> Self {
        Self {
            loc: vec!["body".to_string(), field.into()],
            msg: msg.into(),
            kind,
        }
    }

    /// Issue attached to the body as a whole
    pub fn body<M: Into<String>>(kind: IssueKind, msg: M) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind,
        }
    }

    /// Field name this issue points at, if any
    pub fn field_name(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}

/// Main error type for triage operations
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldIssue>),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Server error: {0}")]
    Server(#[from] warp::Error),
}

impl TriageError {
    /// Create a validation error from a list of issues
    pub fn validation(issues: Vec<FieldIssue>) -> Self {
        Self::Validation(issues)
    }

    /// Issues carried by a validation error, empty for other variants
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            TriageError::Validation(issues) => issues,
            _ => &[],
        }
    }
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| match issue.field_name() {
            Some(field) => format!("{field}: {}", issue.msg),
            None => issue.msg.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for triage operations
pub type TriageResult<T> = Result<T, TriageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_issue_location() {
        let issue = FieldIssue::field("fever", IssueKind::Missing, "field required");
        assert_eq!(issue.loc, vec!["body", "fever"]);
        assert_eq!(issue.field_name(), Some("fever"));

        let issue = FieldIssue::body(IssueKind::JsonInvalid, "expected value");
        assert_eq!(issue.loc, vec!["body"]);
        assert_eq!(issue.field_name(), None);
    }

    #[test]
    fn test_field_issue_serialization() {
        let issue = FieldIssue::field("age", IssueKind::RangeError, "130 is greater than 120");
        let json = serde_json::to_value(&issue).unwrap();

        assert_eq!(json["loc"], serde_json::json!(["body", "age"]));
        assert_eq!(json["type"], "range_error");
        assert_eq!(json["msg"], "130 is greater than 120");
    }

    #[test]
    fn test_validation_error_display_lists_fields() {
        let error = TriageError::validation(vec![
            FieldIssue::field("fever", IssueKind::Missing, "field required"),
            FieldIssue::field("pain", IssueKind::TypeError, "not a number"),
        ]);

        let rendered = error.to_string();
        assert!(rendered.starts_with("Validation failed"));
        assert!(rendered.contains("fever: field required"));
        assert!(rendered.contains("pain: not a number"));
        assert_eq!(error.issues().len(), 2);
    }

    #[test]
    fn test_config_error_has_no_issues() {
        let error = TriageError::from(ConfigError::InvalidConfig("port".to_string()));
        assert!(error.issues().is_empty());
        assert!(error.to_string().contains("Configuration error"));
    }
}
