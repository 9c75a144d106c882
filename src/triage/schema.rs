//! Strict boundary validation for `/predict` bodies
//!
//! Rejects a body whose fields are missing, mistyped or outside their declared
//! bounds. Runs before normalization and never clamps anything itself.

use crate::error::{FieldIssue, IssueKind, TriageError, TriageResult};
use jsonschema::error::ValidationErrorKind;
use jsonschema::{ValidationError, Validator};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Declared order of the body fields; issues are reported in this order
pub const FIELD_ORDER: [&str; 5] = ["fever", "pain", "days", "comorbidity", "age"];

/// JSON Schema for the `/predict` request body
pub fn payload_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "fever": {
                "type": "number",
                "minimum": 0,
                "maximum": 10,
                "description": "Fever intensity (0-10)"
            },
            "pain": {
                "type": "number",
                "minimum": 0,
                "maximum": 10,
                "description": "Pain intensity (0-10)"
            },
            "days": {
                "type": "number",
                "minimum": 0,
                "description": "Symptom duration in days"
            },
            "comorbidity": {
                "type": ["number", "null"],
                "minimum": 0,
                "maximum": 5,
                "description": "Comorbidity burden (0-5), defaults to 0"
            },
            "age": {
                "type": ["integer", "null"],
                "minimum": 0,
                "maximum": 120,
                "description": "Age in years (0-120), defaults to 40"
            }
        },
        "required": ["fever", "pain", "days"]
    })
}

static PAYLOAD_VALIDATOR: Lazy<Validator> = Lazy::new(|| {
    jsonschema::validator_for(&payload_schema()).expect("payload schema should compile")
});

/// Check a request body against the payload schema
pub fn validate_payload(payload: &Value) -> TriageResult<()> {
    let mut issues: Vec<FieldIssue> = match PAYLOAD_VALIDATOR.validate(payload) {
        Ok(()) => return Ok(()),
        Err(errors) => errors.map(|error| to_issue(&error)).collect(),
    };

    issues.sort_by_key(|issue| {
        issue
            .field_name()
            .and_then(|name| FIELD_ORDER.iter().position(|f| *f == name))
            .unwrap_or(usize::MAX)
    });

    Err(TriageError::validation(issues))
}

fn to_issue(error: &ValidationError<'_>) -> FieldIssue {
    let kind = match &error.kind {
        ValidationErrorKind::Required { .. } => IssueKind::Missing,
        ValidationErrorKind::Type { .. } => IssueKind::TypeError,
        ValidationErrorKind::Minimum { .. } | ValidationErrorKind::Maximum { .. } => {
            IssueKind::RangeError
        }
        _ => IssueKind::ValueError,
    };

    let pointer = error.instance_path.to_string();
    let field = match &error.kind {
        ValidationErrorKind::Required { property } => property.as_str().map(str::to_string),
        _ => pointer
            .trim_start_matches('/')
            .split('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string),
    };

    match field {
        Some(field) => FieldIssue::field(field, kind, error.to_string()),
        None => FieldIssue::body(kind, error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue_fields(payload: Value) -> Vec<(String, IssueKind)> {
        let err = validate_payload(&payload).unwrap_err();
        err.issues()
            .iter()
            .map(|i| (i.field_name().unwrap_or("").to_string(), i.kind))
            .collect()
    }

    #[test]
    fn test_valid_payload_accepted() {
        assert!(validate_payload(&json!({"fever": 2.5, "pain": 3, "days": 3})).is_ok());
        assert!(validate_payload(
            &json!({"fever": 0, "pain": 10, "days": 400, "comorbidity": 5, "age": 120})
        )
        .is_ok());
    }

    #[test]
    fn test_null_optionals_accepted() {
        assert!(
            validate_payload(&json!({"fever": 1, "pain": 1, "days": 1, "comorbidity": null, "age": null}))
                .is_ok()
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        assert!(validate_payload(&json!({"fever": 1, "pain": 1, "days": 1, "note": "x"})).is_ok());
    }

    #[test]
    fn test_missing_required_fields() {
        let issues = issue_fields(json!({"pain": 1}));
        assert_eq!(
            issues,
            vec![
                ("fever".to_string(), IssueKind::Missing),
                ("days".to_string(), IssueKind::Missing),
            ]
        );
    }

    #[test]
    fn test_out_of_range_rejected_not_clamped() {
        let issues = issue_fields(json!({"fever": 11, "pain": -5, "days": 3}));
        assert_eq!(
            issues,
            vec![
                ("fever".to_string(), IssueKind::RangeError),
                ("pain".to_string(), IssueKind::RangeError),
            ]
        );
    }

    #[test]
    fn test_wrong_types_rejected() {
        let issues = issue_fields(json!({"fever": "hot", "pain": true, "days": 1}));
        assert_eq!(
            issues,
            vec![
                ("fever".to_string(), IssueKind::TypeError),
                ("pain".to_string(), IssueKind::TypeError),
            ]
        );
    }

    #[test]
    fn test_fractional_age_rejected() {
        let issues = issue_fields(json!({"fever": 1, "pain": 1, "days": 1, "age": 40.5}));
        assert_eq!(issues, vec![("age".to_string(), IssueKind::TypeError)]);
    }

    #[test]
    fn test_optional_bounds_enforced() {
        let issues = issue_fields(json!({"fever": 1, "pain": 1, "days": 1, "comorbidity": 6, "age": 121}));
        assert_eq!(
            issues,
            vec![
                ("comorbidity".to_string(), IssueKind::RangeError),
                ("age".to_string(), IssueKind::RangeError),
            ]
        );
    }

    #[test]
    fn test_non_object_body_rejected() {
        let err = validate_payload(&json!("fever")).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].field_name(), None);
        assert_eq!(err.issues()[0].kind, IssueKind::TypeError);
    }
}
