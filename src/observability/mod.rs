//! Observability for the triage service
//!
//! Structured logging only; the service keeps no metrics state.

pub mod logging;

pub use logging::{init_default_logging, init_logging, LogFormat};

pub use logging::triage_span;
