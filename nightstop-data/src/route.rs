//! Route geometry documents.
//!
//! Two shapes are accepted:
//!
//! - a GraphHopper routing response, whose first path carries its points as
//!   an unencoded GeoJSON `LineString` together with a reported distance;
//! - plain GeoJSON: a bare `LineString`, a `Feature` wrapping one, or a
//!   `FeatureCollection` whose first `LineString` feature is used.
//!
//! Coordinates are `[lon, lat]` pairs; any trailing elevation is ignored.

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::fs::read_utf8;

/// Coordinates extracted from a route document.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    /// Ordered route vertices.
    pub coordinates: Vec<Coord<f64>>,
    /// Distance reported by the routing engine, when the document had one.
    pub reported_distance_m: Option<f64>,
}

/// Problems with the shape of a route document.
#[derive(Debug, Error)]
pub enum RouteFormatError {
    /// The document is not valid JSON.
    #[error("invalid route JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The document matches neither the GraphHopper nor the GeoJSON shape.
    #[error("document is neither a GraphHopper response nor GeoJSON with a LineString")]
    UnrecognisedDocument,
    /// A GraphHopper response contained no paths.
    #[error("GraphHopper response contains no paths")]
    EmptyPaths,
    /// The geometry is not a `LineString`; GraphHopper responses must be
    /// requested with `points_encoded=false`.
    #[error("route geometry is not a LineString (found {found})")]
    NotALineString {
        /// Description of what was found instead.
        found: String,
    },
    /// A coordinate is too short or lies outside longitude/latitude range.
    #[error("route coordinate {index} is not a valid longitude/latitude pair")]
    InvalidCoordinate {
        /// Position of the offending coordinate.
        index: usize,
    },
}

/// Errors raised while loading a route file.
#[derive(Debug, Error)]
pub enum RouteLoadError {
    /// The file could not be read.
    #[error("failed to read route from {path}: {source}")]
    Read {
        /// File that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file was read but its contents are not a usable route.
    #[error("failed to parse route in {path}: {source}")]
    Format {
        /// File that was being parsed.
        path: Utf8PathBuf,
        /// What was wrong with the contents.
        #[source]
        source: RouteFormatError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RouteDocument {
    GraphHopper(GraphHopperResponse),
    GeoJson(GeoJsonObject),
}

#[derive(Debug, Deserialize)]
struct GraphHopperResponse {
    paths: Vec<GraphHopperPath>,
}

#[derive(Debug, Deserialize)]
struct GraphHopperPath {
    #[serde(default)]
    distance: Option<f64>,
    points: Value,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeoJsonObject {
    LineString { coordinates: Vec<Vec<f64>> },
    Feature { geometry: Option<Box<GeoJsonObject>> },
    FeatureCollection { features: Vec<GeoJsonObject> },
    #[serde(other)]
    Other,
}

impl GeoJsonObject {
    fn into_line_string(self) -> Option<Vec<Vec<f64>>> {
        match self {
            Self::LineString { coordinates } => Some(coordinates),
            Self::Feature { geometry } => geometry.and_then(|inner| inner.into_line_string()),
            Self::FeatureCollection { features } => features
                .into_iter()
                .find_map(Self::into_line_string),
            Self::Other => None,
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(_) => "an encoded polyline string".to_owned(),
        Value::Object(map) => map
            .get("type")
            .and_then(Value::as_str)
            .map_or_else(|| "an untyped object".to_owned(), |kind| format!("a {kind}")),
        other => format!("a JSON {}", json_kind(other)),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn to_coordinates(raw: Vec<Vec<f64>>) -> Result<Vec<Coord<f64>>, RouteFormatError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, position)| match position.as_slice() {
            [x, y, ..]
                if x.is_finite()
                    && y.is_finite()
                    && (-180.0..=180.0).contains(x)
                    && (-90.0..=90.0).contains(y) =>
            {
                Ok(Coord { x: *x, y: *y })
            }
            _ => Err(RouteFormatError::InvalidCoordinate { index }),
        })
        .collect()
}

fn from_graphhopper(response: GraphHopperResponse) -> Result<RouteGeometry, RouteFormatError> {
    let path = response
        .paths
        .into_iter()
        .next()
        .ok_or(RouteFormatError::EmptyPaths)?;
    let found = describe(&path.points);
    let raw = serde_json::from_value::<GeoJsonObject>(path.points)
        .ok()
        .and_then(|object| match object {
            GeoJsonObject::LineString { coordinates } => Some(coordinates),
            _ => None,
        })
        .ok_or(RouteFormatError::NotALineString { found })?;
    Ok(RouteGeometry {
        coordinates: to_coordinates(raw)?,
        reported_distance_m: path.distance.filter(|d| d.is_finite()),
    })
}

fn from_geojson(object: GeoJsonObject) -> Result<RouteGeometry, RouteFormatError> {
    let raw = object
        .into_line_string()
        .ok_or_else(|| RouteFormatError::NotALineString {
            found: "a document without LineString geometry".to_owned(),
        })?;
    Ok(RouteGeometry {
        coordinates: to_coordinates(raw)?,
        reported_distance_m: None,
    })
}

/// Decode a route document held in memory.
///
/// The vertex count is not checked here; building a
/// [`nightstop_core::RoutePath`] from the result enforces the minimum.
///
/// # Errors
///
/// Returns [`RouteFormatError`] when the document cannot be interpreted as
/// a route.
///
/// # Examples
/// ```
/// use nightstop_data::parse_route;
///
/// # fn main() -> Result<(), nightstop_data::RouteFormatError> {
/// let json = r#"{"paths": [{"distance": 1234.5,
///     "points": {"type": "LineString", "coordinates": [[13.4, 52.5], [13.5, 52.6, 40.0]]}}]}"#;
/// let route = parse_route(json)?;
/// assert_eq!(route.coordinates.len(), 2);
/// assert_eq!(route.reported_distance_m, Some(1234.5));
/// # Ok(())
/// # }
/// ```
pub fn parse_route(json: &str) -> Result<RouteGeometry, RouteFormatError> {
    let value: Value = serde_json::from_str(json)?;
    let document = serde_json::from_value::<RouteDocument>(value)
        .map_err(|_| RouteFormatError::UnrecognisedDocument)?;
    let geometry = match document {
        RouteDocument::GraphHopper(response) => from_graphhopper(response),
        RouteDocument::GeoJson(object) => from_geojson(object),
    }?;
    log::debug!(
        "decoded route with {} vertices",
        geometry.coordinates.len()
    );
    Ok(geometry)
}

/// Load a route document from disk.
///
/// # Errors
///
/// Returns [`RouteLoadError::Read`] when the file cannot be read and
/// [`RouteLoadError::Format`] when its contents are not a route.
pub fn load_route(path: &Utf8Path) -> Result<RouteGeometry, RouteLoadError> {
    let json = read_utf8(path).map_err(|source| RouteLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_route(&json).map_err(|source| RouteLoadError::Format {
        path: path.to_path_buf(),
        source,
    })
}
