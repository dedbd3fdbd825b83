//! Client configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the openrouteservice client
#[derive(Clone, Serialize, Deserialize)]
pub struct OrsConfig {
    /// API key sent with every request (sensitive - uses SecretString)
    #[serde(default = "default_api_key", skip_serializing)]
    pub api_key: SecretString,

    /// Base URL of the openrouteservice API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Retry requests rejected with HTTP 429 (query limit exceeded)
    #[serde(default = "default_true")]
    pub retry_over_query_limit: bool,

    /// Maximum number of retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds, doubled per attempt
    #[serde(default = "default_retry_initial_delay_ms")]
    pub retry_initial_delay_ms: u64,

    /// Upper bound for a single retry delay in milliseconds
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

fn default_api_key() -> SecretString {
    SecretString::from(String::new())
}

fn default_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!("openrouteservice-rs/{}", env!("CARGO_PKG_VERSION"))
}

const fn default_true() -> bool {
    true
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_retry_initial_delay_ms() -> u64 {
    500
}

const fn default_retry_max_delay_ms() -> u64 {
    30_000
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            retry_over_query_limit: default_true(),
            max_retries: default_max_retries(),
            retry_initial_delay_ms: default_retry_initial_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl std::fmt::Debug for OrsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrsConfig")
            .field(
                "api_key",
                &if self.api_key.expose_secret().is_empty() {
                    None
                } else {
                    Some("[REDACTED]")
                },
            )
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("retry_over_query_limit", &self.retry_over_query_limit)
            .field("max_retries", &self.max_retries)
            .field("retry_initial_delay_ms", &self.retry_initial_delay_ms)
            .field("retry_max_delay_ms", &self.retry_max_delay_ms)
            .finish()
    }
}

impl OrsConfig {
    /// Create a default configuration with the given API key
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: SecretString::from("test-key".to_string()),
            timeout_secs: 5,
            max_retries: 2,
            retry_initial_delay_ms: 1,
            retry_max_delay_ms: 10,
            ..Default::default()
        }
    }

    /// Load configuration from an optional `openrouteservice` file and
    /// `ORS_*` environment variables (e.g. `ORS_API_KEY`, `ORS_BASE_URL`)
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("openrouteservice").required(false))
            .add_source(config::Environment::with_prefix("ORS").try_parsing(true));

        builder.build()?.try_deserialize()
    }

    /// Get the API key as a string reference (for API calls)
    #[must_use]
    pub fn api_key_str(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Check if rate-limited requests are retried
    #[must_use]
    pub const fn retries_enabled(&self) -> bool {
        self.retry_over_query_limit && self.max_retries > 0
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key_str().trim().is_empty() {
            return Err("api_key must not be empty".to_string());
        }

        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.retry_initial_delay_ms > self.retry_max_delay_ms {
            return Err("retry_initial_delay_ms must not exceed retry_max_delay_ms".to_string());
        }

        Ok(())
    }
}
