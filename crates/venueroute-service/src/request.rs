//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use venueroute_lib::{Category, Coordinate, NeighbourQuery, RoutePreferences, RouteRequest};

use crate::ProblemDetails;

/// Landmark categories returned by `/api/v1/markers` when none are requested.
pub const DEFAULT_MARKER_CATEGORIES: [Category; 4] = [
    Category::Medical,
    Category::Exit,
    Category::Entry,
    Category::Stage,
];

/// Largest `limit` accepted by `/api/v1/nearest`.
pub const MAX_NEAREST_LIMIT: usize = 100;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`. The error is boxed to keep `Result` small.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /api/v1/safe-route`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeRouteRequest {
    pub start_lat: f64,
    pub start_lng: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_lat: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_lng: Option<f64>,

    /// Only use wheelchair accessible segments.
    #[serde(default)]
    pub prefer_wheelchair: bool,

    /// Penalize crowded segments.
    #[serde(default)]
    pub avoid_crowds: bool,

    /// Shorthand for `target_category = "exit"`.
    #[serde(default)]
    pub closest_exit: bool,

    /// Route to the cheapest reachable node of this category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_category: Option<String>,
}

impl SafeRouteRequest {
    /// Destination category, if any. An explicit `target_category` wins over
    /// `closest_exit`.
    fn category(&self) -> Result<Option<Category>, venueroute_lib::Error> {
        match self.target_category.as_deref() {
            Some(name) => name.parse().map(Some),
            None if self.closest_exit => Ok(Some(Category::Exit)),
            None => Ok(None),
        }
    }

    /// Convert to a library request. Call [`Validate::validate`] first.
    pub fn to_lib_request(&self) -> RouteRequest {
        RouteRequest {
            start: Coordinate::new(self.start_lat, self.start_lng),
            end_lat: self.end_lat,
            end_lng: self.end_lng,
            target_category: self.category().ok().flatten(),
            preferences: RoutePreferences {
                wheelchair: self.prefer_wheelchair,
                avoid_crowds: self.avoid_crowds,
            },
        }
    }
}

impl Validate for SafeRouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if let Err(e) = self.category() {
            return Err(Box::new(ProblemDetails::bad_request(
                format!("The 'target_category' field is invalid: {}", e),
                request_id,
            )));
        }
        Ok(())
    }
}

/// Query string of `GET /api/v1/markers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkersQuery {
    /// Comma separated category names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
}

impl MarkersQuery {
    /// Requested categories, or the default marker set when absent or blank.
    pub fn categories(&self) -> Result<Vec<Category>, venueroute_lib::Error> {
        let parsed = parse_category_list(self.categories.as_deref())?;
        if parsed.is_empty() {
            Ok(DEFAULT_MARKER_CATEGORIES.to_vec())
        } else {
            Ok(parsed)
        }
    }
}

impl Validate for MarkersQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.categories().map(|_| ()).map_err(|e| {
            Box::new(ProblemDetails::bad_request(
                format!("The 'categories' parameter is invalid: {}", e),
                request_id,
            ))
        })
    }
}

/// Query string of `GET /api/v1/nearest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestQuery {
    pub lat: f64,
    pub lng: f64,

    /// Maximum number of results to return.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Maximum planar distance from the query point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    /// Comma separated category names; empty means any category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
}

fn default_limit() -> usize {
    5
}

impl NearestQuery {
    pub fn point(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// Convert to a library neighbour query. Call [`Validate::validate`] first.
    pub fn to_lib_query(&self) -> NeighbourQuery {
        let query = match self.radius {
            Some(radius) => NeighbourQuery::within_radius(self.limit, radius),
            None => NeighbourQuery::nearest(self.limit),
        };
        query.with_categories(parse_category_list(self.categories.as_deref()).unwrap_or_default())
    }
}

impl Validate for NearestQuery {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'lat' and 'lng' parameters must be finite numbers",
                request_id,
            )));
        }

        if self.limit == 0 {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'limit' parameter must be at least 1",
                request_id,
            )));
        }

        if self.limit > MAX_NEAREST_LIMIT {
            return Err(Box::new(ProblemDetails::bad_request(
                format!("The 'limit' parameter cannot exceed {}", MAX_NEAREST_LIMIT),
                request_id,
            )));
        }

        if let Some(radius) = self.radius {
            if !radius.is_finite() || radius < 0.0 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'radius' parameter must be a non-negative number",
                    request_id,
                )));
            }
        }

        if let Err(e) = parse_category_list(self.categories.as_deref()) {
            return Err(Box::new(ProblemDetails::bad_request(
                format!("The 'categories' parameter is invalid: {}", e),
                request_id,
            )));
        }

        Ok(())
    }
}

fn parse_category_list(raw: Option<&str>) -> Result<Vec<Category>, venueroute_lib::Error> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}
