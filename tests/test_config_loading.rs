//! Configuration loading and validation tests

use std::io::Write;
use tempfile::NamedTempFile;
use triage_api::config::{ConfigError, ServiceConfig};

#[test]
fn test_config_loads_successfully_from_valid_toml() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[server]
host = "127.0.0.1"
port = 8088
body_limit_bytes = 4096
"#
    )
    .unwrap();

    let config = ServiceConfig::load_from_file(temp_file.path()).unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8088);
    assert_eq!(config.server.body_limit_bytes, 4096);
}

#[test]
fn test_config_without_server_section_uses_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "# nothing configured").unwrap();

    let config = ServiceConfig::load_from_file(temp_file.path()).unwrap();
    assert_eq!(config, ServiceConfig::default());
}

#[test]
fn test_config_missing_file_is_read_error() {
    let result = ServiceConfig::load_from_file(std::path::Path::new("/nonexistent/triage.toml"));
    assert!(matches!(result, Err(ConfigError::FileRead(_))));
}

#[test]
fn test_config_invalid_toml_is_parse_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[server\nport = ").unwrap();

    let result = ServiceConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_config_wrong_type_is_parse_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[server]\nport = \"eighty\"").unwrap();

    let result = ServiceConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_config_invalid_host_is_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[server]\nhost = \"example.com\"").unwrap();

    let result = ServiceConfig::load_from_file(temp_file.path());
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
fn test_discover_prefers_explicit_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "[server]\nport = 7000").unwrap();

    let (config, source) = ServiceConfig::discover(Some(temp_file.path())).unwrap();
    assert_eq!(config.server.port, 7000);
    assert_eq!(source.as_deref(), Some(temp_file.path()));
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = ServiceConfig::default()
        .with_overrides(Some("127.0.0.1".to_string()), Some(8123))
        .unwrap();

    let rendered = toml::to_string_pretty(&config).unwrap();
    let parsed = ServiceConfig::from_toml(&rendered).unwrap();
    assert_eq!(parsed, config);
}
