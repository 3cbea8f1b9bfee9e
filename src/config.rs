// Client configuration loaded from environment variables.
//
// # Environment Variables
//
// - `CRM_API_URL` - Base URL of the CRM REST API (default: `http://localhost:3001`)
// - `RUST_LOG` - Log filter for the binary (default: `warn`)

use url::Url;

use crate::error::ConfigError;

pub const API_URL_VAR: &str = "CRM_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Settings read once at process start and passed to the client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL without a trailing slash, e.g. `http://localhost:3001`.
    pub api_url: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Calls `dotenvy::dotenv()` first so a local `.env` file can supply
    /// `CRM_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is set but is not an absolute
    /// http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::new(std::env::var(API_URL_VAR).ok())
    }

    /// Build a config from an optional raw base URL, falling back to the
    /// default when it is missing or blank.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for unparseable or non-http URLs.
    pub fn new(api_url: Option<String>) -> Result<Self, ConfigError> {
        let raw = api_url
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let parsed = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar(API_URL_VAR.to_string(), e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                API_URL_VAR.to_string(),
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        Ok(Self {
            api_url: raw.trim_end_matches('/').to_string(),
        })
    }

    /// Join an API path such as `/api/customers` onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}
