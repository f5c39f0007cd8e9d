//! Configuration loading from dockhand.toml.

use serde::Deserialize;
use server::ServerConfig;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Identity advertised during the initialize handshake.
    #[serde(default)]
    pub server: ServerSection,

    /// Settings for the built-in tools.
    #[serde(default)]
    pub tools: ToolsSection,

    /// Transport limits.
    #[serde(default)]
    pub limits: LimitsSection,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Server name shown to clients.
    #[serde(default = "default_name")]
    pub name: String,

    /// Advertised version; defaults to the crate version.
    pub version: Option<String>,

    /// Optional usage hints surfaced in the initialize response.
    pub instructions: Option<String>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: None,
            instructions: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ToolsSection {
    /// Base directory list_files paths are resolved against.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LimitsSection {
    /// Maximum accepted request line, in bytes.
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

fn default_name() -> String {
    "dockhand".to_string()
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_request_bytes() -> usize {
    server::DEFAULT_MAX_REQUEST_BYTES
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// The handshake identity this config describes.
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            name: self.server.name.clone(),
            version: self
                .server
                .version
                .clone()
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            instructions: self.server.instructions.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.name, "dockhand");
        assert_eq!(config.tools.root, PathBuf::from("."));
        assert_eq!(config.limits.max_request_bytes, 1024 * 1024);
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
[server]
name = "demo"
version = "2.0.0"
instructions = "Adds numbers and lists files."

[tools]
root = "/srv/workspace"

[limits]
max_request_bytes = 65536
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.server.name, "demo");
        assert_eq!(config.tools.root, PathBuf::from("/srv/workspace"));
        assert_eq!(config.limits.max_request_bytes, 65536);

        let server_config = config.server_config();
        assert_eq!(server_config.version, "2.0.0");
        assert_eq!(
            server_config.instructions.as_deref(),
            Some("Adds numbers and lists files.")
        );
    }

    #[test]
    fn version_defaults_to_crate_version() {
        let config = Config::parse("[server]\nname = \"demo\"\n").unwrap();
        assert_eq!(config.server_config().version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn parse_error_is_reported() {
        assert!(matches!(
            Config::parse("server = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
