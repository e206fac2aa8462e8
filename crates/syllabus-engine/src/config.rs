//! Configuration for the Learning Matrix engine
//!
//! Loads the remote API connection settings and matrix behavior from TOML,
//! with environment overrides for the connection.

use serde::{Deserialize, Serialize};
use std::path::Path;
use syllabus_sdk::ClientConfig;
use thiserror::Error;

/// Environment variable overriding `api.base_url`
pub const ENV_API_URL: &str = "SYLLABUS_API_URL";

/// Environment variable overriding `api.timeout_secs`
pub const ENV_API_TIMEOUT: &str = "SYLLABUS_API_TIMEOUT_SECS";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// A field holds an unusable value
    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

/// Engine configuration loaded from TOML
///
/// # Examples
///
/// ```
/// use syllabus_engine::EngineConfig;
///
/// let config = EngineConfig::from_toml_str(r#"
///     [api]
///     base_url = "https://academy.example/api"
///
///     [matrix]
///     auto_select_first_course = false
/// "#).unwrap();
///
/// assert_eq!(config.api.timeout_secs, 30);
/// assert!(!config.matrix.auto_select_first_course);
/// assert_eq!(config.matrix.duplicate_markers, vec!["already exist".to_string()]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Remote API connection
    #[serde(default)]
    pub api: ClientConfig,

    /// Matrix behavior
    #[serde(default)]
    pub matrix: MatrixSettings,
}

/// Behavior of the coordinator around the matrix
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatrixSettings {
    /// Select the first catalog course after a refresh when none is selected
    /// Default: true
    #[serde(default = "default_auto_select")]
    pub auto_select_first_course: bool,

    /// Case-insensitive fragments that mark a failed create as a duplicate
    /// triple when the server sends no structured code
    /// Default: ["already exist"]
    #[serde(default = "default_duplicate_markers")]
    pub duplicate_markers: Vec<String>,
}

fn default_auto_select() -> bool {
    true
}

fn default_duplicate_markers() -> Vec<String> {
    vec!["already exist".to_string()]
}

impl Default for MatrixSettings {
    fn default() -> Self {
        Self {
            auto_select_first_course: default_auto_select(),
            duplicate_markers: default_duplicate_markers(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load from an optional file, then apply environment overrides
    ///
    /// Validation runs once, after the overrides, so the environment can
    /// supply a value the file leaves blank.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config: EngineConfig = match path {
            Some(path) => toml::from_str(&std::fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in `load`)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }

        if let Some(raw) = lookup(ENV_API_TIMEOUT) {
            self.api.timeout_secs = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "{} must be a number of seconds, got '{}'",
                    ENV_API_TIMEOUT, raw
                ))
            })?;
        }

        Ok(())
    }

    /// Check required fields and value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("api.base_url".to_string()));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
