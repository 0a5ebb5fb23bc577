//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Public base URL advertised in metadata documents, without a trailing
    /// slash (e.g., "https://nuget.example.com").
    #[serde(default = "default_public_url")]
    pub public_url: String,
    /// Maximum accepted push body size in bytes.
    #[serde(default = "default_max_push_bytes")]
    pub max_push_bytes: usize,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_public_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_max_push_bytes() -> usize {
    // NuGet.org caps packages at 250 MB; leave headroom for the
    // multipart framing.
    256 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            public_url: default_public_url(),
            max_push_bytes: default_max_push_bytes(),
        }
    }
}

/// Storage backend configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Local filesystem storage.
    Filesystem {
        /// Root directory for storage.
        path: PathBuf,
    },
}

/// Top-level application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Public base URL with any trailing slash removed.
    pub fn public_base_url(&self) -> String {
        self.server.public_url.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_document() {
        let config: AppConfig = serde_json::from_str(
            r#"{"storage": {"type": "filesystem", "path": "/var/lib/berth"}}"#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.server.max_push_bytes, 256 * 1024 * 1024);
        let StorageConfig::Filesystem { path } = &config.storage;
        assert_eq!(path, &PathBuf::from("/var/lib/berth"));
    }

    #[test]
    fn test_public_base_url_strips_trailing_slash() {
        let mut config: AppConfig = serde_json::from_str(
            r#"{"storage": {"type": "filesystem", "path": "/tmp/x"}}"#,
        )
        .unwrap();
        config.server.public_url = "https://nuget.example.com/".to_string();
        assert_eq!(config.public_base_url(), "https://nuget.example.com");
    }
}
