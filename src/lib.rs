//! Rare Disease Triage API
//!
//! A small, stateless HTTP service that maps five symptom measurements onto one
//! of four fixed triage labels with a deterministic scoring rule.
//!
//! # Quick Start
//!
//! ```rust
//! use triage_api::triage::{predict, TriageLabel};
//! use serde_json::json;
//!
//! let prediction = predict(&json!({"fever": 2.0, "pain": 3, "days": 3})).unwrap();
//! assert_eq!(prediction.status, TriageLabel::Mild);
//! assert_eq!(prediction.input.age, 40.0);
//! ```

pub mod config;
pub mod error;
pub mod observability;
pub mod server;
pub mod triage;

pub use config::{ConfigError, ServerSection, ServiceConfig, ServiceInfo, SERVICE_INFO};
pub use error::{FieldIssue, IssueKind, TriageError, TriageResult};
pub use server::TriageServer;
pub use triage::{
    classify, predict, predict_lenient, predict_values, Prediction, TriageInput, TriageLabel,
};
