//! Error types for the openrouteservice client
//!
//! Errors come in two tiers: [`ValidationError`] is raised locally before any
//! request leaves the process, [`OrsError`] wraps it together with everything
//! that can go wrong once a request has actually been sent.

use thiserror::Error;

/// A directions call was rejected before any network access
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Fewer than two coordinates were supplied
    #[error("At least 2 coordinates are required, got {count}")]
    TooFewCoordinates {
        /// Number of coordinates supplied
        count: usize,
    },

    /// A coordinate component is NaN or infinite
    #[error("Invalid coordinate at position {index}: {reason}")]
    InvalidCoordinate {
        /// Position in the coordinate list
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Profile is not one of the supported travel modes
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// Route preference is not recognized
    #[error("Invalid preference: {0}")]
    InvalidPreference(String),

    /// Distance unit is not recognized
    #[error("Invalid units: {0}")]
    InvalidUnits(String),

    /// Geometry format is not recognized
    #[error("Invalid geometry format: {0}")]
    InvalidGeometryFormat(String),

    /// Instructions format is not recognized
    #[error("Invalid instructions format: {0}")]
    InvalidInstructionsFormat(String),

    /// Route attribute is not recognized
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    /// Extra info category is not recognized
    #[error("Invalid extra info: {0}")]
    InvalidExtraInfo(String),

    /// Radius list does not line up with the coordinate list
    #[error("Radiuses must match the number of coordinates ({expected}), got {actual}")]
    RadiusCountMismatch {
        /// Number of coordinates
        expected: usize,
        /// Number of radiuses supplied
        actual: usize,
    },

    /// A radius is NaN or infinite
    #[error("Invalid radius at position {index}: not a finite number")]
    InvalidRadius {
        /// Position in the radius list
        index: usize,
    },

    /// Bearing list does not line up with the coordinate list
    #[error(
        "Bearings must match the number of coordinates ({coordinates}) or be one shorter, got {bearings}"
    )]
    BearingCountMismatch {
        /// Number of coordinates
        coordinates: usize,
        /// Number of bearings supplied
        bearings: usize,
    },

    /// Dynamically supplied options could not be interpreted
    #[error("Malformed directions options: {0}")]
    MalformedOptions(String),
}

/// Errors that can occur when calling the openrouteservice API
#[derive(Debug, Error)]
pub enum OrsError {
    /// Request was rejected locally and never sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service answered with an error status or an error payload
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code returned by the service
        status: u16,
        /// Error message or raw body returned by the service
        message: String,
    },

    /// Query limit of the API key was exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Failed to parse response from the service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl OrsError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::RateLimitExceeded { .. } => {
                true
            },
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the request was rejected before being sent
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
