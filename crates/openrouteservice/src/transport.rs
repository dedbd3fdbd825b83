//! HTTP transport
//!
//! The directions builder only produces an [`ApiRequest`]; sending it is the
//! job of an [`HttpTransport`]. [`ReqwestTransport`] is the default
//! implementation, tests substitute a mock.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, Method};
use tracing::debug;
use url::Url;

use crate::config::OrsConfig;
use crate::error::OrsError;

/// A request descriptor: method, endpoint path and ordered query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
}

impl ApiRequest {
    /// Create a GET request for the given endpoint path
    #[must_use]
    pub fn get(path: impl Into<String>, query: Vec<(&'static str, String)>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query,
        }
    }

    /// Get the HTTP method
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Get the endpoint path
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the query parameters in send order
    #[must_use]
    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// Percent-encoded query string, e.g. `profile=driving-car&coordinates=8.3%2C48.2%7C...`
    #[must_use]
    pub fn query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }

    /// Resolve the endpoint URL (without query) against the API base URL
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the base URL cannot be parsed.
    pub fn endpoint(&self, base_url: &str) -> Result<Url, OrsError> {
        let raw = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        Url::parse(&raw).map_err(|e| OrsError::ConfigurationError(format!("Invalid base URL: {e}")))
    }

    /// Resolve the full URL, query included, against the API base URL
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the base URL cannot be parsed.
    pub fn url(&self, base_url: &str) -> Result<Url, OrsError> {
        let mut url = self.endpoint(base_url)?;
        url.query_pairs_mut()
            .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }
}

/// Status and undecoded body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
    /// Value of the `Retry-After` header in seconds, if present
    pub retry_after_secs: Option<u64>,
}

impl RawResponse {
    /// Create a response without a `Retry-After` header
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            retry_after_secs: None,
        }
    }

    /// Check for a 2xx status
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends a request and returns the raw response
///
/// Implementations report transport failures (connection, timeout) as
/// errors; any HTTP status, including error statuses, is a successful send.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform one round trip
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, OrsError>;
}

/// reqwest-based transport
#[derive(Debug)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl ReqwestTransport {
    /// Create a transport for the configured base URL
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OrsConfig) -> Result<Self, OrsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| OrsError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, OrsError> {
        let url = request.endpoint(&self.base_url)?;

        debug!(method = %request.method(), path = %request.path(), "Sending request");

        // reqwest errors carry the request URL, and the query holds the API key
        let response = self
            .client
            .request(request.method().clone(), url)
            .query(request.query())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OrsError::Timeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else {
                    OrsError::ConnectionFailed(e.without_url().to_string())
                }
            })?;

        let status = response.status().as_u16();
        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let body = response
            .text()
            .await
            .map_err(|e| OrsError::ParseError(e.without_url().to_string()))?;

        Ok(RawResponse {
            status,
            body,
            retry_after_secs,
        })
    }
}
