//! openrouteservice directions client
//!
//! Validates a call locally, sends it through an [`HttpTransport`] and decodes
//! the route list. Requests rejected with HTTP 429 are retried with
//! exponential backoff when the configuration allows it.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::OrsConfig;
use crate::directions::{DirectionsOptions, DirectionsRequest};
use crate::error::OrsError;
use crate::models::{Coordinate, DirectionsResponse};
use crate::transport::{ApiRequest, HttpTransport, RawResponse, ReqwestTransport};

/// Longest slice of a non-JSON error body kept in an error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Trait for routing service clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Send a validated directions request and decode the routes
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, OrsError>;

    /// Validate the inputs, then send the directions request
    async fn directions_for(
        &self,
        coordinates: Vec<Coordinate>,
        options: DirectionsOptions,
    ) -> Result<DirectionsResponse, OrsError> {
        let request = DirectionsRequest::new(coordinates, options)?;
        self.directions(&request).await
    }

    /// Check if the routing service is reachable
    ///
    /// Probes `GET /health` without the API key. Self-hosted openrouteservice
    /// instances expose it; the hosted API may answer with an error status,
    /// which reports `false`.
    async fn is_healthy(&self) -> bool;
}

/// Client for the openrouteservice HTTP API
#[derive(Debug)]
pub struct OpenRouteServiceClient<T = ReqwestTransport> {
    transport: T,
    config: OrsConfig,
}

impl OpenRouteServiceClient {
    /// Create a client backed by reqwest
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &OrsConfig) -> Result<Self, OrsError> {
        config.validate().map_err(OrsError::ConfigurationError)?;
        let transport = ReqwestTransport::new(config)?;
        Ok(Self {
            transport,
            config: config.clone(),
        })
    }
}

impl<T: HttpTransport> OpenRouteServiceClient<T> {
    /// Create a client with a custom transport
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_transport(config: &OrsConfig, transport: T) -> Result<Self, OrsError> {
        config.validate().map_err(OrsError::ConfigurationError)?;
        Ok(Self {
            transport,
            config: config.clone(),
        })
    }

    /// Get the client configuration
    #[must_use]
    pub const fn config(&self) -> &OrsConfig {
        &self.config
    }

    /// Send a request, retrying rate-limited attempts as configured
    #[allow(clippy::cast_possible_truncation)]
    async fn send_with_retry(&self, request: &ApiRequest) -> Result<RawResponse, OrsError> {
        let mut attempt = 0u32;

        loop {
            let result = self.transport.send(request).await.and_then(check_status);

            match result {
                Err(OrsError::RateLimitExceeded { retry_after_secs })
                    if self.config.retries_enabled() && attempt < self.config.max_retries =>
                {
                    let delay = self.retry_delay(attempt, retry_after_secs);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Query limit exceeded, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                },
                other => return other,
            }
        }
    }

    /// Backoff before retry number `attempt` (0-indexed)
    ///
    /// Doubles from `retry_initial_delay_ms`, capped at `retry_max_delay_ms`.
    /// A `Retry-After` hint from the service is honored within the same cap.
    fn retry_delay(&self, attempt: u32, retry_after_secs: Option<u64>) -> Duration {
        let backoff = self
            .config
            .retry_initial_delay_ms
            .saturating_mul(1u64 << attempt.min(20));
        let hinted = retry_after_secs.map_or(0, |secs| secs.saturating_mul(1000));
        Duration::from_millis(backoff.max(hinted).min(self.config.retry_max_delay_ms))
    }

    /// Decode a successful response body
    fn parse_directions_response(body: &str) -> Result<DirectionsResponse, OrsError> {
        serde_json::from_str(body).map_err(|e| OrsError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl<T: HttpTransport> RoutingClient for OpenRouteServiceClient<T> {
    #[instrument(skip(self, request), fields(profile = %request.profile(), waypoints = request.coordinates().len()))]
    async fn directions(
        &self,
        request: &DirectionsRequest,
    ) -> Result<DirectionsResponse, OrsError> {
        let api_request = request.to_api_request(self.config.api_key_str());

        debug!(optimized = request.optimized(), "Requesting directions");

        let response = self.send_with_retry(&api_request).await?;
        let result = Self::parse_directions_response(&response.body)?;

        if result.is_empty() {
            warn!("No routes returned");
        }

        debug!(count = result.routes.len(), "Routes received");
        Ok(result)
    }

    async fn is_healthy(&self) -> bool {
        let request = ApiRequest::get("/health", Vec::new());
        matches!(self.transport.send(&request).await, Ok(response) if response.is_success())
    }
}

/// Map status codes and error payloads to errors
///
/// An `"error"` member in the body wins over the status code, since the
/// service reports some failures with a 2xx status.
fn check_status(response: RawResponse) -> Result<RawResponse, OrsError> {
    if response.status == 429 {
        return Err(OrsError::RateLimitExceeded {
            retry_after_secs: response.retry_after_secs,
        });
    }

    if let Some(message) = error_payload(&response.body) {
        return Err(OrsError::Api {
            status: response.status,
            message,
        });
    }

    if !response.is_success() {
        return Err(OrsError::Api {
            status: response.status,
            message: response.body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        });
    }

    Ok(response)
}

/// Extract the message of an `{"error": ...}` body, if any
fn error_payload(body: &str) -> Option<String> {
    let payload: RawErrorBody = serde_json::from_str(body).ok()?;
    match payload.error? {
        RawError::Message(message) => Some(message),
        RawError::Detailed { code, message } => Some(match (code, message) {
            (Some(code), Some(message)) => format!("{message} (code {code})"),
            (None, Some(message)) => message,
            (Some(code), None) => format!("code {code}"),
            (None, None) => "unknown error".to_string(),
        }),
    }
}

// --- Raw API error payloads ---

#[derive(Debug, Deserialize)]
struct RawErrorBody {
    error: Option<RawError>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawError {
    Message(String),
    Detailed {
        code: Option<i64>,
        message: Option<String>,
    },
}
