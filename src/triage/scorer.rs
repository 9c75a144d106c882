//! Rule-based triage scorer
//!
//! Maps a normalized [`TriageInput`] onto one of four ordinal labels through a
//! weighted composite score. Pure and total: no I/O, no failure path.

use super::input::TriageInput;
use serde::{Deserialize, Serialize};
use std::fmt;

const FEVER_WEIGHT: f64 = 0.5;
const PAIN_WEIGHT: f64 = 0.4;
const DAYS_WEIGHT: f64 = 0.1;
const COMORBIDITY_WEIGHT: f64 = 0.3;

/// Days beyond this stop adding to the weighted term
const DAYS_CAP: f64 = 30.0;

/// Added once symptoms have lasted `CHRONIC_DAYS` or longer
const CHRONIC_BOOST: f64 = 2.0;
const CHRONIC_DAYS: f64 = 30.0;

const NO_SICK_MAX_SCORE: f64 = 3.0;
const NO_SICK_MAX_DAYS: f64 = 2.0;
const MILD_MAX_SCORE: f64 = 6.0;
const MILD_MAX_DAYS: f64 = 7.0;
const ACUTE_MAX_SCORE: f64 = 9.5;
const ACUTE_MAX_DAYS: f64 = 30.0;

/// Extra risk for older patients with lasting symptoms; only reached on the chronic path
const ELDERLY_AGE: f64 = 65.0;
const ELDERLY_MIN_DAYS: f64 = 7.0;
const ELDERLY_RISK: f64 = 1.5;

/// Triage outcome, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TriageLabel {
    #[serde(rename = "NO ENFERMO")]
    NoSick,
    #[serde(rename = "ENFERMEDAD LEVE")]
    Mild,
    #[serde(rename = "ENFERMEDAD AGUDA")]
    Acute,
    #[serde(rename = "ENFERMEDAD CRÓNICA")]
    Chronic,
}

impl TriageLabel {
    /// All labels from least to most severe
    pub const ALL: [TriageLabel; 4] = [
        TriageLabel::NoSick,
        TriageLabel::Mild,
        TriageLabel::Acute,
        TriageLabel::Chronic,
    ];

    /// Wire string returned to callers
    pub fn as_str(&self) -> &'static str {
        match self {
            TriageLabel::NoSick => "NO ENFERMO",
            TriageLabel::Mild => "ENFERMEDAD LEVE",
            TriageLabel::Acute => "ENFERMEDAD AGUDA",
            TriageLabel::Chronic => "ENFERMEDAD CRÓNICA",
        }
    }

    /// 0 for the mildest label, 3 for the most severe
    pub fn severity_rank(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for TriageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label together with the composite score that selected it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub label: TriageLabel,
    /// Internal only, never part of an HTTP reply
    pub score: f64,
}

/// Weighted composite score including the chronic boost
pub fn composite_score(input: &TriageInput) -> f64 {
    let mut score = FEVER_WEIGHT * input.fever
        + PAIN_WEIGHT * input.pain
        + DAYS_WEIGHT * input.days.min(DAYS_CAP)
        + COMORBIDITY_WEIGHT * input.comorbidity;

    if input.days >= CHRONIC_DAYS {
        score += CHRONIC_BOOST;
    }

    score
}

/// Score and classify; first matching bucket wins
pub fn assess(input: &TriageInput) -> Assessment {
    let mut score = composite_score(input);
    let days = input.days;

    let label = if score < NO_SICK_MAX_SCORE && days < NO_SICK_MAX_DAYS {
        TriageLabel::NoSick
    } else if score < MILD_MAX_SCORE && days < MILD_MAX_DAYS {
        TriageLabel::Mild
    } else if score < ACUTE_MAX_SCORE && days < ACUTE_MAX_DAYS {
        TriageLabel::Acute
    } else {
        // Label is already decided; the adjustment only shows up in the reported score
        if input.age >= ELDERLY_AGE && days >= ELDERLY_MIN_DAYS {
            score += ELDERLY_RISK;
        }
        TriageLabel::Chronic
    };

    Assessment { label, score }
}

/// Label only
pub fn classify(input: &TriageInput) -> TriageLabel {
    assess(input).label
}
