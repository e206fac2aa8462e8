//! Client configuration: base URL, timeout and route prefixes.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the remote learning-matrix API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the REST API (default: "http://localhost:3000/api")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Route prefixes of the individual resources
    #[serde(default)]
    pub routes: RouteConfig,
}

/// Resource paths, relative to the base URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RouteConfig {
    /// Course catalog
    pub courses: String,
    /// Subject catalog
    pub subjects: String,
    /// Specialty catalog
    pub specialties: String,
    /// Relationship records; single and bulk deletes hang off this path
    pub relationships: String,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            courses: "/courses".to_string(),
            subjects: "/subjects".to_string(),
            specialties: "/specialties".to_string(),
            relationships: "/learning-matrix".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            routes: RouteConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration for `base_url` with default timeout and routes
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.routes.relationships, "/learning-matrix");
    }

    #[test]
    fn test_missing_base_url_uses_default() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout_secs": 5}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000/api");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_partial_routes_keep_defaults() {
        let json = r#"{
            "base_url": "https://academy.example/api",
            "routes": { "relationships": "/matrix" }
        }"#;

        let config: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "https://academy.example/api");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.routes.relationships, "/matrix");
        assert_eq!(config.routes.courses, "/courses");
    }
}
