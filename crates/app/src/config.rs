//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `OPI_BACKEND_URL` - Base URL of the remote data/identity service
//!
//! ## Optional
//! - `OPI_API_VERSION` - Service API version segment (default: v1)
//! - `OPI_DATA_DIR` - Directory for durable local state such as the
//!   admin session file (default: .opi)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use opi_access::SESSION_KEY;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote data/identity service.
    pub backend_url: Url,
    /// Service API version path segment.
    pub api_version: String,
    /// Directory holding durable local state.
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or
    /// invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend_url = get_required_env("OPI_BACKEND_URL")?
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("OPI_BACKEND_URL".to_owned(), e.to_string()))?;
        let api_version = get_env_or_default("OPI_API_VERSION", "v1");
        let data_dir = PathBuf::from(get_env_or_default("OPI_DATA_DIR", ".opi"));

        Ok(Self {
            backend_url,
            api_version,
            data_dir,
        })
    }

    /// Path of the durable admin session file.
    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join(format!("{SESSION_KEY}.json"))
    }

    /// The backend client's endpoint configuration.
    #[must_use]
    pub fn backend(&self) -> opi_backend::BackendConfig {
        opi_backend::BackendConfig {
            base_url: self.backend_url.clone(),
            api_version: self.api_version.clone(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
