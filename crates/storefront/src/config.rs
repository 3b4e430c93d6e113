//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_API_BASE_URL` - API host (e.g., <https://ec-course-api.hexschool.io>)
//! - `STOREFRONT_API_PATH` - Shop path segment issued with the API account
//!
//! ## Optional
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g., production)

use thiserror::Error;
use url::Url;

/// API version prefix baked into every endpoint.
const API_VERSION_PREFIX: &str = "v2/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Storefront API location
    pub api: ApiConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Where the storefront REST API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme and host, without a trailing slash
    base_url: String,
    /// Shop path segment
    api_path: String,
    /// `{base_url}/v2/api/{api_path}`
    root: Url,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = get_required_env("STOREFRONT_API_BASE_URL")?;
        let api_path = get_required_env("STOREFRONT_API_PATH")?;
        let api = ApiConfig::new(&base_url, &api_path)?;

        Ok(Self {
            api,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

impl ApiConfig {
    /// Build an API location from a base URL and shop path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the base URL is not an absolute
    /// http(s) URL, or the path is empty or contains a slash.
    pub fn new(base_url: &str, api_path: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_API_BASE_URL".to_string(), e.to_string())
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_API_BASE_URL".to_string(),
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        let api_path = api_path.trim();
        if matches!(api_path, "" | "." | "..") || api_path.contains('/') {
            return Err(ConfigError::InvalidEnvVar(
                "STOREFRONT_API_PATH".to_string(),
                "must be a single non-empty path segment".to_string(),
            ));
        }

        let mut root = parsed;
        root.path_segments_mut()
            .map_err(|()| {
                ConfigError::InvalidEnvVar(
                    "STOREFRONT_API_BASE_URL".to_string(),
                    "cannot carry a path".to_string(),
                )
            })?
            .pop_if_empty()
            .extend(API_VERSION_PREFIX.split('/').chain([api_path]));

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_path: api_path.to_string(),
            root,
        })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the shop path segment.
    #[must_use]
    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    /// Returns the URL every endpoint path is appended to.
    #[must_use]
    pub const fn api_root(&self) -> &Url {
        &self.root
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
