//! openrouteservice directions client
//!
//! Thin client for the [openrouteservice](https://openrouteservice.org) HTTP API.
//! A directions call is validated and serialized locally into a `GET /directions`
//! request; malformed input fails with a [`ValidationError`] before anything is
//! sent. Errors reported by the service surface as [`OrsError::Api`].
//!
//! # Architecture
//!
//! [`DirectionsRequest`] is the validated, immutable request built from a
//! coordinate list and [`DirectionsOptions`]. [`RoutingClient`] defines the
//! interface for sending it, implemented by [`OpenRouteServiceClient`], which
//! delegates the round trip to an [`HttpTransport`] ([`ReqwestTransport`] by
//! default).
//!
//! # Example
//!
//! ```rust,ignore
//! use openrouteservice::{
//!     Bearing, DirectionsOptions, DirectionsRequest, OpenRouteServiceClient, OrsConfig,
//!     RoutingClient,
//! };
//!
//! let config = OrsConfig::with_api_key("your-api-key");
//! let client = OpenRouteServiceClient::new(&config)?;
//!
//! let options = DirectionsOptions::new()
//!     .with_bearings(vec![Bearing::new(100, 100), Bearing::new(200, 200)]);
//! let request = DirectionsRequest::from_pairs(
//!     &[(8.34234, 48.23424), (8.34423, 48.26424)],
//!     options,
//! )?;
//! assert!(!request.optimized());
//!
//! let response = client.directions(&request).await?;
//! ```

mod client;
mod config;
mod directions;
mod error;
mod models;
mod transport;

pub use client::{OpenRouteServiceClient, RoutingClient};
pub use config::OrsConfig;
pub use directions::{DIRECTIONS_PATH, DirectionsOptions, DirectionsRequest, derive_optimized};
pub use error::{OrsError, ValidationError};
pub use models::{
    Attribute, Bearing, Coordinate, DirectionsResponse, ExtraInfo, GeometryFormat,
    InstructionsFormat, Preference, Profile, Route, RouteSummary, Segment, Step, Units,
};
pub use transport::{ApiRequest, HttpTransport, RawResponse, ReqwestTransport};
