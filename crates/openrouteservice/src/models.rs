//! Directions data models
//!
//! Closed parameter domains (profiles, units, extra info categories, ...),
//! the positional value types sent with a request, and typed representations
//! of the routes returned by the openrouteservice directions endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Declares a closed set of wire strings as an enum.
///
/// Generates `as_str`, `all`, `Display`, `FromStr` (failing with the given
/// [`ValidationError`] variant) and string-based serde.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $err:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Wire representation used in query strings
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }

            /// Every accepted value
            #[must_use]
            pub const fn all() -> &'static [Self] {
                &[$( Self::$variant, )+]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(ValidationError::$err(other.to_string())),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(value: $name) -> Self {
                value.as_str()
            }
        }
    };
}

closed_enum! {
    /// Travel mode used for route calculation
    Profile, InvalidProfile {
        /// Passenger car
        DrivingCar => "driving-car",
        /// Heavy goods vehicle
        DrivingHgv => "driving-hgv",
        /// Pedestrian
        FootWalking => "foot-walking",
        /// Pedestrian on hiking trails
        FootHiking => "foot-hiking",
        /// Standard bicycle
        CyclingRegular => "cycling-regular",
        /// Road bike
        CyclingRoad => "cycling-road",
        /// Bicycle, preferring safe ways
        CyclingSafe => "cycling-safe",
        /// Mountain bike
        CyclingMountain => "cycling-mountain",
        /// Touring bike
        CyclingTour => "cycling-tour",
        /// E-bike
        CyclingElectric => "cycling-electric",
    }
}

#[allow(clippy::derivable_impls)] // the enum is declared by `closed_enum!`
impl Default for Profile {
    fn default() -> Self {
        Self::DrivingCar
    }
}

closed_enum! {
    /// Optimization goal of the route search
    Preference, InvalidPreference {
        /// Minimize travel time
        Fastest => "fastest",
        /// Minimize distance
        Shortest => "shortest",
        /// Service-side weighting
        Recommended => "recommended",
    }
}

closed_enum! {
    /// Distance unit of the response
    Units, InvalidUnits {
        /// Meters
        Meters => "m",
        /// Kilometers
        Kilometers => "km",
        /// Miles
        Miles => "mi",
    }
}

closed_enum! {
    /// Encoding of the returned route geometry
    GeometryFormat, InvalidGeometryFormat {
        /// Google encoded polyline
        EncodedPolyline => "encodedpolyline",
        /// GeoJSON `LineString`
        GeoJson => "geojson",
        /// Plain coordinate array
        Polyline => "polyline",
    }
}

closed_enum! {
    /// Markup of turn-by-turn instructions
    InstructionsFormat, InvalidInstructionsFormat {
        /// Plain text
        Text => "text",
        /// HTML markup
        Html => "html",
    }
}

closed_enum! {
    /// Additional per-segment route attributes
    Attribute, InvalidAttribute {
        /// Average speed
        AvgSpeed => "avgspeed",
        /// Ratio of route distance to direct distance
        DetourFactor => "detourfactor",
        /// Share of the segment in the whole route
        Percentage => "percentage",
    }
}

closed_enum! {
    /// Optional route annotation categories
    ExtraInfo, InvalidExtraInfo {
        /// Gradient classes
        Steepness => "steepness",
        /// Suitability score for the chosen profile
        Suitability => "suitability",
        /// Surface type
        Surface => "surface",
        /// Road category
        WayCategory => "waycategory",
        /// Way type
        WayType => "waytype",
        /// Toll road sections
        Tollways => "tollways",
        /// SAC / MTB trail grades
        TrailDifficulty => "traildifficulty",
        /// Access restrictions
        RoadAccessRestrictions => "roadaccessrestrictions",
    }
}

/// A waypoint as (longitude, latitude)
///
/// Only the shape is checked locally; whether the point can be snapped to the
/// road network is decided by the service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    longitude: f64,
    latitude: f64,
}

impl Coordinate {
    /// Create a coordinate from longitude and latitude
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Check that both components are real numbers
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self::new(longitude, latitude)
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = ValidationError;

    fn try_from([longitude, latitude]: [f64; 2]) -> Result<Self, Self::Error> {
        let coordinate = Self::new(longitude, latitude);
        if !coordinate.is_finite() {
            return Err(ValidationError::InvalidCoordinate {
                index: 0,
                reason: format!("[{longitude}, {latitude}] is not a finite pair"),
            });
        }
        Ok(coordinate)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.longitude, value.latitude]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}

/// Heading constraint at a waypoint: direction in degrees plus allowed deviation
///
/// The service documents a heading of 0-360 and a tolerance of 0-180 degrees.
/// Values outside those ranges are passed through and judged remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u16, u16)", into = "(u16, u16)")]
pub struct Bearing {
    value: u16,
    tolerance: u16,
}

impl Bearing {
    /// Create a bearing from heading and tolerance in degrees
    #[must_use]
    pub const fn new(value: u16, tolerance: u16) -> Self {
        Self { value, tolerance }
    }

    /// Get the heading in degrees
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Get the allowed deviation in degrees
    #[must_use]
    pub const fn tolerance(&self) -> u16 {
        self.tolerance
    }
}

impl From<(u16, u16)> for Bearing {
    fn from((value, tolerance): (u16, u16)) -> Self {
        Self::new(value, tolerance)
    }
}

impl From<Bearing> for (u16, u16) {
    fn from(value: Bearing) -> Self {
        (value.value, value.tolerance)
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.value, self.tolerance)
    }
}

// --- Response models ---

/// Decoded body of a directions call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    /// Calculated routes (usually one)
    #[serde(default)]
    pub routes: Vec<Route>,
    /// Bounding box of all routes `[min_lon, min_lat, max_lon, max_lat]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    /// Service metadata (engine version, query echo, attribution)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<serde_json::Value>,
}

impl DirectionsResponse {
    /// Check whether the service returned no route
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// The first route, which the service ranks best
    #[must_use]
    pub fn best_route(&self) -> Option<&Route> {
        self.routes.first()
    }
}

/// A single route between the requested waypoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Totals for the whole route
    #[serde(default)]
    pub summary: RouteSummary,
    /// Route geometry; an encoded polyline string or a GeoJSON object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<serde_json::Value>,
    /// Format the geometry was returned in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry_format: Option<String>,
    /// One segment per pair of consecutive waypoints
    #[serde(default)]
    pub segments: Vec<Segment>,
    /// Indices of the waypoints within the geometry
    #[serde(default)]
    pub way_points: Vec<usize>,
    /// Bounding box of this route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<f64>>,
    /// Requested extra info, keyed by category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<serde_json::Value>,
}

impl Route {
    /// Instruction texts of all steps in travel order
    #[must_use]
    pub fn instructions(&self) -> Vec<&str> {
        self.segments
            .iter()
            .flat_map(|segment| segment.steps.iter())
            .map(|step| step.instruction.as_str())
            .collect()
    }
}

/// Totals of a route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Length in the requested units
    #[serde(default)]
    pub distance: f64,
    /// Travel time in seconds
    #[serde(default)]
    pub duration: f64,
    /// Total ascent in meters (elevation requests only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascent: Option<f64>,
    /// Total descent in meters (elevation requests only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descent: Option<f64>,
}

/// Part of a route between two consecutive waypoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Length in the requested units
    #[serde(default)]
    pub distance: f64,
    /// Travel time in seconds
    #[serde(default)]
    pub duration: f64,
    /// Turn-by-turn steps
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Ascent in meters (elevation requests only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascent: Option<f64>,
    /// Descent in meters (elevation requests only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descent: Option<f64>,
    /// Average speed in km/h (`avgspeed` attribute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avgspeed: Option<f64>,
    /// Ratio of route length to beeline distance (`detourfactor` attribute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detourfactor: Option<f64>,
    /// Share of the whole route in percent (`percentage` attribute)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

/// A single maneuver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Length in the requested units
    #[serde(default)]
    pub distance: f64,
    /// Travel time in seconds
    #[serde(default)]
    pub duration: f64,
    /// Instruction type code (turn left, continue, ...)
    #[serde(default, rename = "type")]
    pub kind: u8,
    /// Human readable instruction in the requested language/format
    #[serde(default)]
    pub instruction: String,
    /// Name of the way the step follows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Roundabout exit to take (only with `roundabout_exits`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_number: Option<u8>,
    /// Start and end index within the route geometry
    #[serde(default)]
    pub way_points: Vec<usize>,
}
