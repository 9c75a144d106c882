//! Input normalization
//!
//! Coerces raw field values to `f64`, applies defaults for the optional fields
//! and clamps everything into its domain. Out-of-range numbers are never an
//! error here; only missing required fields and non-numeric values are.

use crate::error::{FieldIssue, IssueKind, TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default comorbidity score when the field is absent
pub const DEFAULT_COMORBIDITY: f64 = 0.0;
/// Default age when the field is absent
pub const DEFAULT_AGE: f64 = 40.0;

/// Closed domain of one input field; `max` is `None` when unbounded above
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDomain {
    pub min: f64,
    pub max: Option<f64>,
}

impl FieldDomain {
    const fn bounded(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    const fn at_least(min: f64) -> Self {
        Self { min, max: None }
    }

    /// Nearest value inside the domain
    pub fn clamp(&self, value: f64) -> f64 {
        let floored = value.max(self.min);
        match self.max {
            Some(max) => floored.min(max),
            None => floored,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

pub const FEVER_DOMAIN: FieldDomain = FieldDomain::bounded(0.0, 10.0);
pub const PAIN_DOMAIN: FieldDomain = FieldDomain::bounded(0.0, 10.0);
pub const DAYS_DOMAIN: FieldDomain = FieldDomain::at_least(0.0);
pub const COMORBIDITY_DOMAIN: FieldDomain = FieldDomain::bounded(0.0, 5.0);
pub const AGE_DOMAIN: FieldDomain = FieldDomain::bounded(0.0, 120.0);

/// Validated symptom measurements; every field lies inside its domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTriageInput")]
pub struct TriageInput {
    pub fever: f64,
    pub pain: f64,
    pub days: f64,
    pub comorbidity: f64,
    pub age: f64,
}

/// Unclamped wire form; deserialization always goes through [`TriageInput::new`]
#[derive(Deserialize)]
struct RawTriageInput {
    fever: f64,
    pain: f64,
    days: f64,
    #[serde(default)]
    comorbidity: Option<f64>,
    #[serde(default)]
    age: Option<f64>,
}

impl From<RawTriageInput> for TriageInput {
    fn from(raw: RawTriageInput) -> Self {
        TriageInput::new(raw.fever, raw.pain, raw.days, raw.comorbidity, raw.age)
    }
}

impl TriageInput {
    /// Build from numbers, applying defaults and clamping
    pub fn new(
        fever: f64,
        pain: f64,
        days: f64,
        comorbidity: Option<f64>,
        age: Option<f64>,
    ) -> Self {
        Self {
            fever,
            pain,
            days,
            comorbidity: comorbidity.unwrap_or(DEFAULT_COMORBIDITY),
            age: age.unwrap_or(DEFAULT_AGE),
        }
        .normalized()
    }

    /// Copy with every field clamped into its domain
    pub fn normalized(self) -> Self {
        Self {
            fever: FEVER_DOMAIN.clamp(self.fever),
            pain: PAIN_DOMAIN.clamp(self.pain),
            days: DAYS_DOMAIN.clamp(self.days),
            comorbidity: COMORBIDITY_DOMAIN.clamp(self.comorbidity),
            age: AGE_DOMAIN.clamp(self.age),
        }
    }

    /// Like [`TriageInput::new`], but non-finite numbers are type errors
    pub fn from_values(
        fever: f64,
        pain: f64,
        days: f64,
        comorbidity: Option<f64>,
        age: Option<f64>,
    ) -> TriageResult<Self> {
        let issues: Vec<FieldIssue> = [
            ("fever", Some(fever)),
            ("pain", Some(pain)),
            ("days", Some(days)),
            ("comorbidity", comorbidity),
            ("age", age),
        ]
        .into_iter()
        .filter_map(|(name, value)| match value {
            Some(v) if !v.is_finite() => Some(FieldIssue::field(
                name,
                IssueKind::TypeError,
                format!("value is not a valid number: {v}"),
            )),
            _ => None,
        })
        .collect();

        if !issues.is_empty() {
            return Err(TriageError::validation(issues));
        }
        Ok(Self::new(fever, pain, days, comorbidity, age))
    }

    /// Coerce and clamp a JSON object of raw fields
    ///
    /// Numbers and numeric strings are accepted. `null` on an optional field
    /// counts as absent. All offending fields are reported together.
    pub fn from_payload(payload: &Value) -> TriageResult<Self> {
        let fields = payload.as_object().ok_or_else(|| {
            TriageError::validation(vec![FieldIssue::body(
                IssueKind::TypeError,
                "request body must be a JSON object",
            )])
        })?;
        Self::from_fields(fields)
    }

    /// Coerce and clamp a map of field name to raw value
    pub fn from_fields(fields: &Map<String, Value>) -> TriageResult<Self> {
        let mut issues = Vec::new();

        let fever = required(fields, "fever", &mut issues);
        let pain = required(fields, "pain", &mut issues);
        let days = required(fields, "days", &mut issues);
        let comorbidity = optional(fields, "comorbidity", &mut issues);
        let age = optional(fields, "age", &mut issues);

        match (fever, pain, days) {
            (Some(fever), Some(pain), Some(days)) if issues.is_empty() => {
                Ok(Self::new(fever, pain, days, comorbidity, age))
            }
            _ => Err(TriageError::validation(issues)),
        }
    }
}

fn required(fields: &Map<String, Value>, name: &str, issues: &mut Vec<FieldIssue>) -> Option<f64> {
    match fields.get(name) {
        None | Some(Value::Null) => {
            issues.push(FieldIssue::field(name, IssueKind::Missing, "field required"));
            None
        }
        Some(value) => coerce(name, value, issues),
    }
}

fn optional(fields: &Map<String, Value>, name: &str, issues: &mut Vec<FieldIssue>) -> Option<f64> {
    match fields.get(name) {
        None | Some(Value::Null) => None,
        Some(value) => coerce(name, value, issues),
    }
}

fn coerce(name: &str, value: &Value, issues: &mut Vec<FieldIssue>) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() => Some(n),
        _ => {
            issues.push(FieldIssue::field(
                name,
                IssueKind::TypeError,
                format!("value is not a valid number: {value}"),
            ));
            None
        }
    }
}
