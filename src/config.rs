//! Application configuration
//!
//! Provides the configuration consumed by the backend client and the offline
//! queue: the table-store base URL, the anonymous API key, and the path of
//! the local queue database.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default table-store URL (local development stack)
const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:54321";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    backend_url: String,
    api_key: Option<String>,
    queue_db_path: PathBuf,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Configuration from environment variables with defaults
    ///
    /// Reads `CARD_COMPANION_BACKEND_URL` and `CARD_COMPANION_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var("CARD_COMPANION_BACKEND_URL") {
            builder = builder.backend_url(url);
        }
        if let Ok(key) = std::env::var("CARD_COMPANION_API_KEY") {
            builder = builder.api_key(key);
        }
        builder.build()
    }

    /// Base URL of the remote table store
    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// Anonymous API key sent with every request, if configured
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Path of the local queue database file
    pub fn queue_db_path(&self) -> &Path {
        &self.queue_db_path
    }

    /// Full URL for a named table's endpoint
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.backend_url, table)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            api_key: None,
            queue_db_path: default_queue_db_path(),
        }
    }
}

/// Platform-specific default location for the queue database
fn default_queue_db_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(std::env::temp_dir);
    path.push("card-companion");
    path.push("offline.db");
    path
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    backend_url: Option<String>,
    api_key: Option<String>,
    queue_db_path: Option<PathBuf>,
}

impl AppConfigBuilder {
    /// Set the backend base URL
    pub fn backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = Some(url.into());
        self
    }

    /// Set the anonymous API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the queue database path
    pub fn queue_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.queue_db_path = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let backend_url = self
            .backend_url
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(backend_url));
        }
        Ok(AppConfig {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            api_key: self.api_key,
            queue_db_path: self.queue_db_path.unwrap_or_else(default_queue_db_path),
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
