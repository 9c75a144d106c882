//! Triage pipeline
//!
//! Three independent stages, composed by [`predict`]:
//! 1. [`schema::validate_payload`] rejects bodies outside the declared bounds
//! 2. [`TriageInput::from_payload`] coerces, defaults and clamps
//! 3. [`scorer::assess`] picks the label
//!
//! [`predict_lenient`] skips the first stage, so out-of-range numbers are
//! clamped instead of rejected.

pub mod input;
pub mod schema;
pub mod scorer;

pub use input::TriageInput;
pub use scorer::{assess, classify, Assessment, TriageLabel};

use crate::error::TriageResult;
use serde::Serialize;
use serde_json::Value;

/// Successful prediction, serialized as the `/predict` response body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub status: TriageLabel,
    pub input: TriageInput,
    #[serde(skip)]
    pub score: f64,
}

impl Prediction {
    fn from_input(input: TriageInput) -> Self {
        let Assessment { label, score } = assess(&input);
        Self {
            status: label,
            input,
            score,
        }
    }
}

/// Strict validation, then normalization and scoring
pub fn predict(payload: &Value) -> TriageResult<Prediction> {
    schema::validate_payload(payload)?;
    predict_lenient(payload)
}

/// Score already-parsed numbers, clamping them; non-finite values are rejected
pub fn predict_values(
    fever: f64,
    pain: f64,
    days: f64,
    comorbidity: Option<f64>,
    age: Option<f64>,
) -> TriageResult<Prediction> {
    let input = TriageInput::from_values(fever, pain, days, comorbidity, age)?;
    Ok(Prediction::from_input(input))
}

/// Normalization and scoring only
pub fn predict_lenient(payload: &Value) -> TriageResult<Prediction> {
    let input = TriageInput::from_payload(payload)?;
    Ok(Prediction::from_input(input))
}
