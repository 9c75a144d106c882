//! Tests for logging configuration parsing

use tracing::Level;
use triage_api::observability::logging::{parse_flag, parse_level, LogFormat};

#[test]
fn test_log_format_parse_json() {
    assert_eq!(LogFormat::parse("json"), LogFormat::Json);
    assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
}

#[test]
fn test_log_format_parse_pretty_and_compact() {
    assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
    assert_eq!(LogFormat::parse("COMPACT"), LogFormat::Compact);
}

#[test]
fn test_log_format_parse_whitespace() {
    assert_eq!(LogFormat::parse("  pretty  "), LogFormat::Pretty);
    assert_eq!(LogFormat::parse("compact\n"), LogFormat::Compact);
    assert_eq!(LogFormat::parse("\tjson"), LogFormat::Json);
}

#[test]
fn test_log_format_parse_invalid_defaults_to_json() {
    assert_eq!(LogFormat::parse("invalid"), LogFormat::Json);
    assert_eq!(LogFormat::parse("yaml"), LogFormat::Json);
    assert_eq!(LogFormat::parse("123"), LogFormat::Json);
}

#[test]
fn test_log_level_parsing() {
    assert_eq!(parse_level("ERROR"), Level::ERROR);
    assert_eq!(parse_level("debug"), Level::DEBUG);
    assert_eq!(parse_level("unknown"), Level::INFO);
}

#[test]
fn test_log_spans_flag_parsing() {
    assert!(parse_flag("true"));
    assert!(parse_flag("TRUE"));
    assert!(!parse_flag("yes"));
    assert!(!parse_flag(""));
}
