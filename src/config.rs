//! TOML-based service configuration and preset definitions.

use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::Deserialize;

use crate::source::carbon_intensity::DEFAULT_BASE_URL;

/// Top-level service configuration parsed from TOML.
///
/// All fields have defaults matching the `live` preset. Load from TOML with
/// [`ServiceConfig::from_toml_file`] or use [`ServiceConfig::live`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Generation-mix data source settings.
    #[serde(default)]
    pub source: SourceConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address (IPv4 or IPv6 literal).
    pub host: String,
    /// TCP port (must be > 0).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Generation-mix data source settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Source type: `"carbon_intensity"` or `"sample"`.
    pub kind: String,
    /// API root for the `carbon_intensity` source.
    pub base_url: String,
    /// Random seed for the `sample` source.
    pub seed: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: "carbon_intensity".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            seed: 42,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"server.port"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ServiceConfig {
    /// Live Carbon Intensity API on port 3000.
    pub fn live() -> Self {
        Self {
            server: ServerConfig::default(),
            source: SourceConfig::default(),
        }
    }

    /// Synthetic sample data, bound to loopback only.
    pub fn offline() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                ..ServerConfig::default()
            },
            source: SourceConfig {
                kind: "sample".to_string(),
                ..SourceConfig::default()
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["live", "offline"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "live" => Ok(Self::live()),
            "offline" => Ok(Self::offline()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Socket address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `server.host` is not an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.host.parse().map_err(|_| ConfigError {
            field: "server.host".into(),
            message: format!("must be an IP address, got \"{}\"", self.server.host),
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.socket_addr() {
            errors.push(e);
        }
        if self.server.port == 0 {
            errors.push(ConfigError {
                field: "server.port".into(),
                message: "must be > 0".into(),
            });
        }

        let src = &self.source;
        if src.kind != "carbon_intensity" && src.kind != "sample" {
            errors.push(ConfigError {
                field: "source.kind".into(),
                message: format!(
                    "must be \"carbon_intensity\" or \"sample\", got \"{}\"",
                    src.kind
                ),
            });
        }
        if !src.base_url.starts_with("http://") && !src.base_url.starts_with("https://") {
            errors.push(ConfigError {
                field: "source.base_url".into(),
                message: format!("must start with http:// or https://, got \"{}\"", src.base_url),
            });
        }

        errors
    }
}
