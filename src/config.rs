//! Configuration for the triage service
//!
//! Two layers: [`SERVICE_INFO`] is compiled in and never changes after startup,
//! while [`ServiceConfig`] carries the bind settings read from an optional TOML file.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Identity of the running service, reported by `GET /health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    #[serde(rename = "service")]
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

/// Process-wide service identity
pub static SERVICE_INFO: ServiceInfo = ServiceInfo {
    name: "rare-disease-triage-api",
    version: "1.0.0",
    description: "Servicio de triage para enfermedad rara (demo MLOps).",
};

/// Files probed, in order, when no `--config` is given
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["triage.toml", "config/triage.toml"];

/// Top-level runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSection,
}

/// HTTP bind settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerSection {
    /// IP address to bind
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted `/predict` body
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_body_limit() -> u64 {
    16 * 1024
}

impl ServerSection {
    /// Check the bind settings are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;

        if self.port == 0 {
            return Err(ConfigError::InvalidConfig(
                "server.port must be non-zero".to_string(),
            ));
        }

        if self.body_limit_bytes == 0 {
            return Err(ConfigError::InvalidConfig(
                "server.body_limit_bytes must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Socket address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self.host.parse::<IpAddr>().map_err(|_| {
            ConfigError::InvalidConfig(format!(
                "server.host '{}' is not a valid IP address",
                self.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ServiceConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = toml::from_str(content)?;
        config.server.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, else the first default path that exists, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load_from_file(path)?, Some(path.to_path_buf())));
        }

        for path_str in DEFAULT_CONFIG_PATHS {
            let path = PathBuf::from(path_str);
            if path.exists() {
                return Ok((Self::load_from_file(&path)?, Some(path)));
            }
        }

        Ok((Self::default(), None))
    }

    /// Apply command-line overrides and re-validate
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self.server.validate()?;
        Ok(self)
    }
}
