//! Directions request builder
//!
//! Turns a coordinate list and [`DirectionsOptions`] into a validated,
//! immutable [`DirectionsRequest`] and serializes it into the query
//! parameters of a `GET /directions` call. Nothing here touches the network:
//! every [`ValidationError`] is raised before a request could be sent.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::models::{
    Attribute, Bearing, Coordinate, ExtraInfo, GeometryFormat, InstructionsFormat, Preference,
    Profile, Units,
};
use crate::transport::ApiRequest;

/// Path of the directions endpoint relative to the API base URL
pub const DIRECTIONS_PATH: &str = "/directions";

/// Named optional parameters of a directions call
///
/// `None` means the parameter is not sent and the service default applies.
/// Unknown keys are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectionsOptions {
    /// Travel mode (default: `driving-car`)
    pub profile: Profile,
    /// Route optimization goal (service default: `fastest`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<Preference>,
    /// Distance unit (service default: `m`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<Units>,
    /// Language of the instructions, e.g. `en` or `de` (service default: `en`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Include the route geometry (service default: `true`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<bool>,
    /// Geometry encoding (service default: `encodedpolyline`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry_format: Option<GeometryFormat>,
    /// Simplify the geometry (service default: `false`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry_simplify: Option<bool>,
    /// Include turn-by-turn instructions (service default: `true`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<bool>,
    /// Instruction markup (service default: `text`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions_format: Option<InstructionsFormat>,
    /// Announce roundabout exit numbers (service default: `false`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roundabout_exits: Option<bool>,
    /// Additional per-segment attributes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,
    /// Snapping radius in meters per coordinate, `-1` for unlimited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radiuses: Option<Vec<f64>>,
    /// Heading constraint per coordinate; the last one may be omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearings: Option<Vec<Bearing>>,
    /// Avoid u-turns at waypoints (service default: `false`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continue_straight: Option<bool>,
    /// Include elevation in the geometry (service default: `false`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<bool>,
    /// Route annotation categories to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_info: Option<Vec<ExtraInfo>>,
    /// Allow the service's optimized route search (default: `true`);
    /// forced to `false` by `bearings` or `continue_straight = true`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimized: Option<bool>,
}

impl DirectionsOptions {
    /// Create options with the default profile and nothing else set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret loosely typed options, e.g. from a JSON payload
    ///
    /// # Errors
    ///
    /// Returns the matching `Invalid*` error (e.g. `InvalidProfile`) if an
    /// enumerated value is not in its allowed set, and `MalformedOptions` if
    /// a value has the wrong shape (such as bearings given as a string) or a
    /// key is unknown.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        if let Some(fields) = value.as_object() {
            check_scalar::<Profile>(fields, "profile")?;
            check_scalar::<Preference>(fields, "preference")?;
            check_scalar::<Units>(fields, "units")?;
            check_scalar::<GeometryFormat>(fields, "geometry_format")?;
            check_scalar::<InstructionsFormat>(fields, "instructions_format")?;
            check_list::<Attribute>(fields, "attributes")?;
            check_list::<ExtraInfo>(fields, "extra_info")?;
        }

        serde_json::from_value(value).map_err(|e| ValidationError::MalformedOptions(e.to_string()))
    }

    /// Parse options from a JSON document
    ///
    /// # Errors
    ///
    /// Same as [`DirectionsOptions::from_value`], plus invalid JSON.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| ValidationError::MalformedOptions(e.to_string()))?;
        Self::from_value(value)
    }

    /// Set the travel mode
    #[must_use]
    pub const fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the route optimization goal
    #[must_use]
    pub const fn with_preference(mut self, preference: Preference) -> Self {
        self.preference = Some(preference);
        self
    }

    /// Set the distance unit
    #[must_use]
    pub const fn with_units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    /// Set the instruction language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set whether geometry is returned and in which encoding
    #[must_use]
    pub const fn with_geometry(mut self, geometry: bool, format: Option<GeometryFormat>) -> Self {
        self.geometry = Some(geometry);
        self.geometry_format = format;
        self
    }

    /// Set whether instructions are returned and in which markup
    #[must_use]
    pub const fn with_instructions(
        mut self,
        instructions: bool,
        format: Option<InstructionsFormat>,
    ) -> Self {
        self.instructions = Some(instructions);
        self.instructions_format = format;
        self
    }

    /// Set per-coordinate snapping radiuses
    #[must_use]
    pub fn with_radiuses(mut self, radiuses: Vec<f64>) -> Self {
        self.radiuses = Some(radiuses);
        self
    }

    /// Set per-coordinate bearings
    #[must_use]
    pub fn with_bearings(mut self, bearings: Vec<Bearing>) -> Self {
        self.bearings = Some(bearings);
        self
    }

    /// Set whether u-turns at waypoints are avoided
    #[must_use]
    pub const fn with_continue_straight(mut self, continue_straight: bool) -> Self {
        self.continue_straight = Some(continue_straight);
        self
    }

    /// Set whether elevation is returned
    #[must_use]
    pub const fn with_elevation(mut self, elevation: bool) -> Self {
        self.elevation = Some(elevation);
        self
    }

    /// Set the route annotation categories
    #[must_use]
    pub fn with_extra_info(mut self, extra_info: Vec<ExtraInfo>) -> Self {
        self.extra_info = Some(extra_info);
        self
    }

    /// Set the per-segment attributes
    #[must_use]
    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Explicitly request or refuse the optimized route search
    #[must_use]
    pub const fn with_optimized(mut self, optimized: bool) -> Self {
        self.optimized = Some(optimized);
        self
    }
}

/// Decide the `optimized` flag sent to the service
///
/// Bearings and `continue_straight = true` cannot be honored by the optimized
/// route search, so either forces `false`, even over an explicit `true`.
/// Otherwise the explicit value is used, defaulting to `true`.
#[must_use]
pub fn derive_optimized(explicit: Option<bool>, has_bearings: bool, continue_straight: bool) -> bool {
    if has_bearings || continue_straight {
        return false;
    }
    explicit.unwrap_or(true)
}

/// A validated directions call, ready to be serialized
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    coordinates: Vec<Coordinate>,
    options: DirectionsOptions,
    optimized: bool,
}

impl DirectionsRequest {
    /// Minimum number of waypoints of a route
    pub const MIN_COORDINATES: usize = 2;

    /// Validate the inputs and build the request
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: too few or non-finite
    /// coordinates, non-finite radiuses, or radius/bearing lists that do not
    /// line up with the coordinates.
    pub fn new(
        coordinates: Vec<Coordinate>,
        options: DirectionsOptions,
    ) -> Result<Self, ValidationError> {
        Self::validate(&coordinates, &options)?;

        let optimized = derive_optimized(
            options.optimized,
            options.bearings.is_some(),
            options.continue_straight.unwrap_or(false),
        );

        Ok(Self {
            coordinates,
            options,
            optimized,
        })
    }

    /// Build a request from `(longitude, latitude)` tuples
    ///
    /// # Errors
    ///
    /// Same as [`DirectionsRequest::new`].
    pub fn from_pairs(
        pairs: &[(f64, f64)],
        options: DirectionsOptions,
    ) -> Result<Self, ValidationError> {
        Self::new(pairs.iter().copied().map(Coordinate::from).collect(), options)
    }

    fn validate(
        coordinates: &[Coordinate],
        options: &DirectionsOptions,
    ) -> Result<(), ValidationError> {
        if coordinates.len() < Self::MIN_COORDINATES {
            return Err(ValidationError::TooFewCoordinates {
                count: coordinates.len(),
            });
        }

        if let Some(index) = coordinates.iter().position(|c| !c.is_finite()) {
            return Err(ValidationError::InvalidCoordinate {
                index,
                reason: format!("{} is not a finite pair", coordinates[index]),
            });
        }

        let count = coordinates.len();

        if let Some(radiuses) = options.radiuses.as_ref().filter(|r| r.len() != count) {
            return Err(ValidationError::RadiusCountMismatch {
                expected: count,
                actual: radiuses.len(),
            });
        }

        if let Some(index) = options
            .radiuses
            .as_ref()
            .and_then(|r| r.iter().position(|radius| !radius.is_finite()))
        {
            return Err(ValidationError::InvalidRadius { index });
        }

        // the final waypoint may be left without a bearing
        if let Some(bearings) = options
            .bearings
            .as_ref()
            .filter(|b| b.len() != count && b.len() != count - 1)
        {
            return Err(ValidationError::BearingCountMismatch {
                coordinates: count,
                bearings: bearings.len(),
            });
        }

        Ok(())
    }

    /// Get the waypoints
    #[must_use]
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Get the options as supplied
    #[must_use]
    pub const fn options(&self) -> &DirectionsOptions {
        &self.options
    }

    /// Get the travel mode
    #[must_use]
    pub const fn profile(&self) -> Profile {
        self.options.profile
    }

    /// Get the derived `optimized` flag
    #[must_use]
    pub const fn optimized(&self) -> bool {
        self.optimized
    }

    /// Serialize into ordered query parameters (without the API key)
    ///
    /// `coordinates` and `profile` come first, then every supplied option,
    /// and `optimized` is always last.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let opts = &self.options;
        let mut params: Vec<(&'static str, String)> = vec![
            ("coordinates", join_pipe(&self.coordinates)),
            ("profile", opts.profile.to_string()),
        ];

        if let Some(preference) = opts.preference {
            params.push(("preference", preference.to_string()));
        }
        if let Some(units) = opts.units {
            params.push(("units", units.to_string()));
        }
        if let Some(language) = &opts.language {
            params.push(("language", language.clone()));
        }
        if let Some(geometry) = opts.geometry {
            params.push(("geometry", bool_str(geometry).to_string()));
        }
        if let Some(format) = opts.geometry_format {
            params.push(("geometry_format", format.to_string()));
        }
        if let Some(simplify) = opts.geometry_simplify {
            params.push(("geometry_simplify", bool_str(simplify).to_string()));
        }
        if let Some(instructions) = opts.instructions {
            params.push(("instructions", bool_str(instructions).to_string()));
        }
        if let Some(format) = opts.instructions_format {
            params.push(("instructions_format", format.to_string()));
        }
        if let Some(exits) = opts.roundabout_exits {
            params.push(("roundabout_exits", bool_str(exits).to_string()));
        }
        // an empty list means nothing was asked for
        if let Some(attributes) = opts.attributes.as_ref().filter(|a| !a.is_empty()) {
            params.push(("attributes", join_pipe(attributes)));
        }
        if let Some(radiuses) = &opts.radiuses {
            params.push(("radiuses", join_pipe(radiuses)));
        }
        if let Some(bearings) = &opts.bearings {
            params.push(("bearings", join_pipe(bearings)));
        }
        if let Some(continue_straight) = opts.continue_straight {
            params.push(("continue_straight", bool_str(continue_straight).to_string()));
        }
        if let Some(elevation) = opts.elevation {
            params.push(("elevation", bool_str(elevation).to_string()));
        }
        if let Some(extra_info) = opts.extra_info.as_ref().filter(|e| !e.is_empty()) {
            params.push(("extra_info", join_pipe(extra_info)));
        }

        params.push(("optimized", bool_str(self.optimized).to_string()));
        params
    }

    /// Build the `GET /directions` request, with the API key first
    #[must_use]
    pub fn to_api_request(&self, api_key: &str) -> ApiRequest {
        let mut query = vec![("api_key", api_key.to_string())];
        query.extend(self.query_params());
        ApiRequest::get(DIRECTIONS_PATH, query)
    }
}

/// Parse a string field with its `FromStr` impl to surface the typed error
///
/// Values of any other shape are left to serde.
fn check_scalar<T>(fields: &Map<String, Value>, key: &str) -> Result<(), ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    match fields.get(key) {
        Some(Value::String(raw)) => raw.parse::<T>().map(drop),
        _ => Ok(()),
    }
}

/// Like [`check_scalar`], for every string element of an array field
fn check_list<T>(fields: &Map<String, Value>, key: &str) -> Result<(), ValidationError>
where
    T: FromStr<Err = ValidationError>,
{
    match fields.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .try_for_each(|raw| raw.parse::<T>().map(drop)),
        _ => Ok(()),
    }
}

/// Join values with `|`, the list separator of the directions API
fn join_pipe<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|")
}

/// Convert bool to "true"/"false" str for query params
const fn bool_str(val: bool) -> &'static str {
    if val { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const COORDS_VALID: [(f64, f64); 2] = [(8.34234, 48.23424), (8.34423, 48.26424)];

    fn params_map(request: &DirectionsRequest) -> HashMap<&'static str, String> {
        request.query_params().into_iter().collect()
    }

    fn bearings(pairs: &[(u16, u16)]) -> Vec<Bearing> {
        pairs
            .iter()
            .map(|&pair| Bearing::from(pair))
            .collect()
    }

    #[test]
    fn test_bool_str() {
        assert_eq!(bool_str(true), "true");
        assert_eq!(bool_str(false), "false");
    }

    #[test]
    fn test_derive_optimized_table() {
        assert!(derive_optimized(None, false, false));
        assert!(derive_optimized(Some(true), false, false));
        assert!(!derive_optimized(Some(false), false, false));
        assert!(!derive_optimized(None, true, false));
        assert!(!derive_optimized(None, false, true));
        assert!(!derive_optimized(Some(true), true, false));
        assert!(!derive_optimized(Some(true), false, true));
        assert!(!derive_optimized(Some(false), true, true));
    }

    #[test]
    fn test_simple_request() {
        let request =
            DirectionsRequest::from_pairs(&COORDS_VALID, DirectionsOptions::default()).unwrap();
        let params = request.query_params();

        assert_eq!(
            params,
            vec![
                (
                    "coordinates",
                    "8.34234,48.23424|8.34423,48.26424".to_string()
                ),
                ("profile", "driving-car".to_string()),
                ("optimized", "true".to_string()),
            ]
        );
        assert!(request.optimized());
    }

    #[test]
    fn test_bearings_disable_optimized() {
        let options = DirectionsOptions::new().with_bearings(bearings(&[(100, 100), (200, 200)]));
        let request = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap();
        let params = params_map(&request);

        assert_eq!(params["bearings"], "100,100|200,200");
        assert_eq!(params["optimized"], "false");
        assert_eq!(params["profile"], "driving-car");
    }

    #[test]
    fn test_bearings_override_explicit_optimized() {
        let options = DirectionsOptions::new()
            .with_bearings(bearings(&[(100, 100), (200, 200)]))
            .with_optimized(true);
        let request = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap();

        assert!(!request.optimized());
        assert_eq!(params_map(&request)["optimized"], "false");
    }

    #[test]
    fn test_continue_straight_disables_optimized() {
        let options = DirectionsOptions::new().with_continue_straight(true);
        let request = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap();
        let params = params_map(&request);

        assert_eq!(params["continue_straight"], "true");
        assert_eq!(params["optimized"], "false");
    }

    #[test]
    fn test_continue_straight_false_keeps_optimized() {
        let options = DirectionsOptions::new().with_continue_straight(false);
        let request = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap();
        let params = params_map(&request);

        assert_eq!(params["continue_straight"], "false");
        assert_eq!(params["optimized"], "true");
    }

    #[test]
    fn test_explicit_optimized_false_without_constraints() {
        let options = DirectionsOptions::new().with_optimized(false);
        let request = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap();
        assert_eq!(params_map(&request)["optimized"], "false");
    }

    #[test]
    fn test_complex_request() {
        let options = DirectionsOptions {
            profile: Profile::DrivingHgv,
            preference: Some(Preference::Fastest),
            units: Some(Units::Miles),
            language: Some("en".to_string()),
            geometry: Some(true),
            geometry_format: Some(GeometryFormat::GeoJson),
            geometry_simplify: Some(false),
            instructions: Some(false),
            instructions_format: Some(InstructionsFormat::Html),
            roundabout_exits: Some(true),
            attributes: None,
            radiuses: Some(vec![10000.0, 10000.0]),
            bearings: Some(bearings(&[(100, 100), (200, 200)])),
            continue_straight: Some(false),
            elevation: Some(true),
            extra_info: Some(vec![ExtraInfo::Steepness, ExtraInfo::Suitability]),
            optimized: Some(false),
        };
        let request = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap();

        let expected: HashMap<&'static str, String> = [
            ("coordinates", "8.34234,48.23424|8.34423,48.26424"),
            ("profile", "driving-hgv"),
            ("preference", "fastest"),
            ("units", "mi"),
            ("language", "en"),
            ("geometry", "true"),
            ("geometry_format", "geojson"),
            ("geometry_simplify", "false"),
            ("instructions", "false"),
            ("instructions_format", "html"),
            ("roundabout_exits", "true"),
            ("radiuses", "10000|10000"),
            ("bearings", "100,100|200,200"),
            ("continue_straight", "false"),
            ("elevation", "true"),
            ("extra_info", "steepness|suitability"),
            ("optimized", "false"),
        ]
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect();

        assert_eq!(params_map(&request), expected);
        assert_eq!(request.query_params().len(), expected.len());
    }

    #[test]
    fn test_attributes_serialized() {
        let options = DirectionsOptions::new()
            .with_attributes(vec![Attribute::AvgSpeed, Attribute::DetourFactor]);
        let request = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap();
        assert_eq!(params_map(&request)["attributes"], "avgspeed|detourfactor");
    }

    #[test]
    fn test_too_few_coordinates() {
        let err = DirectionsRequest::from_pairs(&[(8.34234, 48.23424)], DirectionsOptions::new())
            .unwrap_err();
        assert_eq!(err, ValidationError::TooFewCoordinates { count: 1 });

        let err = DirectionsRequest::new(Vec::new(), DirectionsOptions::new()).unwrap_err();
        assert_eq!(err, ValidationError::TooFewCoordinates { count: 0 });
    }

    #[test]
    fn test_non_finite_coordinate() {
        let err = DirectionsRequest::from_pairs(
            &[(8.34234, 48.23424), (f64::NAN, 48.26424)],
            DirectionsOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidCoordinate { index: 1, .. }
        ));
    }

    #[test]
    fn test_unroutable_coordinates_pass_locally() {
        let request =
            DirectionsRequest::from_pairs(&[(1.0, 2.0), (3.0, 4.0)], DirectionsOptions::new());
        assert!(request.is_ok());
    }

    #[test]
    fn test_too_few_radiuses() {
        let options = DirectionsOptions::new().with_radiuses(vec![1.0]);
        let err = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap_err();
        assert_eq!(
            err,
            ValidationError::RadiusCountMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_too_many_radiuses() {
        let options = DirectionsOptions::new().with_radiuses(vec![1.0, 2.0, 3.0]);
        let err = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap_err();
        assert!(matches!(err, ValidationError::RadiusCountMismatch { .. }));
    }

    #[test]
    fn test_unlimited_radius_serialized() {
        let options = DirectionsOptions::new().with_radiuses(vec![-1.0, 350.5]);
        let request = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap();
        assert_eq!(params_map(&request)["radiuses"], "-1|350.5");
    }

    #[test]
    fn test_bearing_count() {
        let three = [(8.0, 48.0), (8.1, 48.1), (8.2, 48.2)];

        let options = DirectionsOptions::new().with_bearings(bearings(&[(10, 20), (30, 40)]));
        assert!(DirectionsRequest::from_pairs(&three, options).is_ok());

        let options = DirectionsOptions::new().with_bearings(bearings(&[(10, 20)]));
        let err = DirectionsRequest::from_pairs(&three, options).unwrap_err();
        assert_eq!(
            err,
            ValidationError::BearingCountMismatch {
                coordinates: 3,
                bearings: 1
            }
        );

        let options = DirectionsOptions::new()
            .with_bearings(bearings(&[(10, 20), (30, 40), (50, 60), (70, 80)]));
        assert!(DirectionsRequest::from_pairs(&three, options).is_err());
    }

    #[test]
    fn test_options_from_value() {
        let options = DirectionsOptions::from_value(serde_json::json!({
            "profile": "cycling-regular",
            "bearings": [[100, 100], [200, 200]],
            "extra_info": ["steepness", "surface"],
            "continue_straight": true
        }))
        .unwrap();

        assert_eq!(options.profile, Profile::CyclingRegular);
        assert_eq!(options.bearings.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            options.extra_info,
            Some(vec![ExtraInfo::Steepness, ExtraInfo::Surface])
        );
    }

    #[test]
    fn test_options_from_value_rejects_string_bearings() {
        let err = DirectionsOptions::from_value(serde_json::json!({
            "bearings": "[[100,100]]"
        }))
        .unwrap_err();
        assert!(matches!(err, ValidationError::MalformedOptions(_)));
    }

    #[test]
    fn test_options_from_value_rejects_bad_enums() {
        let err = DirectionsOptions::from_value(serde_json::json!({ "profile": "crawling" }))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidProfile("crawling".to_string()));

        let err = DirectionsOptions::from_value(serde_json::json!({
            "extra_info": ["steepness", "suitability", "awesomeness"]
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::InvalidExtraInfo("awesomeness".to_string()));

        let err = DirectionsOptions::from_json(r#"{ "units": "furlongs" }"#).unwrap_err();
        assert_eq!(err, ValidationError::InvalidUnits("furlongs".to_string()));

        let err = DirectionsOptions::from_json(r#"{ "attributes": ["avgspeed", "slope"] }"#)
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidAttribute("slope".to_string()));
    }

    #[test]
    fn test_options_from_value_wrong_enum_shape_is_malformed() {
        let err = DirectionsOptions::from_value(serde_json::json!({ "profile": 3 })).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedOptions(_)));

        let err = DirectionsOptions::from_value(serde_json::json!({ "extra_info": "steepness" }))
            .unwrap_err();
        assert!(matches!(err, ValidationError::MalformedOptions(_)));
    }

    #[test]
    fn test_non_finite_radius() {
        let options = DirectionsOptions::new().with_radiuses(vec![350.0, f64::NAN]);
        let err = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap_err();
        assert_eq!(err, ValidationError::InvalidRadius { index: 1 });

        let options = DirectionsOptions::new().with_radiuses(vec![f64::INFINITY, -1.0]);
        let err = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap_err();
        assert_eq!(err, ValidationError::InvalidRadius { index: 0 });
    }

    #[test]
    fn test_empty_lists_not_serialized() {
        let options = DirectionsOptions::new()
            .with_extra_info(vec![])
            .with_attributes(vec![]);
        let request = DirectionsRequest::from_pairs(&COORDS_VALID, options).unwrap();
        let params = params_map(&request);

        assert!(!params.contains_key("extra_info"));
        assert!(!params.contains_key("attributes"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_options_from_json_rejects_unknown_keys() {
        let err = DirectionsOptions::from_json(r#"{ "avoid_features": ["ferries"] }"#).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedOptions(_)));
    }

    #[test]
    fn test_to_api_request() {
        let request =
            DirectionsRequest::from_pairs(&COORDS_VALID, DirectionsOptions::default()).unwrap();
        let api_request = request.to_api_request("my-key");

        assert_eq!(api_request.path(), DIRECTIONS_PATH);
        assert_eq!(api_request.query()[0], ("api_key", "my-key".to_string()));
        assert_eq!(api_request.query().len(), 4);
    }
}
