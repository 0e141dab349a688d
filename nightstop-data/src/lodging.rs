//! GeoJSON lodging collections.
//!
//! A collection is a `FeatureCollection` of `Point` features. Each file
//! holds a single category of accommodation, supplied by the caller. The
//! display name comes from `properties.name`; features without a usable
//! name get the category's default. Features that are not points, or
//! whose coordinates are malformed, are skipped with a warning so that one
//! bad record does not discard a whole dataset.

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use nightstop_core::{LodgingCategory, LodgingRecord};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::fs::read_utf8;

/// Problems with the shape of a lodging document.
#[derive(Debug, Error)]
pub enum LodgingFormatError {
    /// The document is not valid JSON or lacks a `features` array.
    #[error("invalid lodging GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level object is not a `FeatureCollection`.
    #[error("expected a FeatureCollection, found {found:?}")]
    NotAFeatureCollection {
        /// Value of the top-level `type` member.
        found: String,
    },
}

/// Errors raised while loading a lodging file.
#[derive(Debug, Error)]
pub enum LodgingLoadError {
    /// The file could not be read.
    #[error("failed to read lodgings from {path}: {source}")]
    Read {
        /// File that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file was read but its contents are not a lodging collection.
    #[error("failed to parse lodgings in {path}: {source}")]
    Format {
        /// File that was being parsed.
        path: Utf8PathBuf,
        /// What was wrong with the contents.
        #[source]
        source: LodgingFormatError,
    },
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    geometry: Option<RawGeometry>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Vec<f64>,
}

/// Why a single feature was skipped.
#[derive(Debug, PartialEq)]
enum SkipReason {
    Malformed(String),
    MissingGeometry,
    NotAPoint(String),
    BadCoordinates,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed feature: {err}"),
            Self::MissingGeometry => f.write_str("feature has no geometry"),
            Self::NotAPoint(kind) => write!(f, "geometry is a {kind}, not a Point"),
            Self::BadCoordinates => f.write_str("point is not a finite longitude/latitude pair"),
        }
    }
}

fn feature_name(properties: Option<&Map<String, Value>>, category: LodgingCategory) -> String {
    properties
        .and_then(|props| props.get("name"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| category.default_name())
        .to_owned()
}

fn point_location(coordinates: &[f64]) -> Option<Coord<f64>> {
    match coordinates {
        [x, y, ..]
            if x.is_finite()
                && y.is_finite()
                && (-180.0..=180.0).contains(x)
                && (-90.0..=90.0).contains(y) =>
        {
            Some(Coord { x: *x, y: *y })
        }
        _ => None,
    }
}

fn decode_feature(value: Value, category: LodgingCategory) -> Result<LodgingRecord, SkipReason> {
    let feature: RawFeature =
        serde_json::from_value(value).map_err(|err| SkipReason::Malformed(err.to_string()))?;
    let geometry = feature.geometry.ok_or(SkipReason::MissingGeometry)?;
    if geometry.kind != "Point" {
        return Err(SkipReason::NotAPoint(geometry.kind));
    }
    let location = point_location(&geometry.coordinates).ok_or(SkipReason::BadCoordinates)?;
    let name = feature_name(feature.properties.as_ref(), category);
    Ok(LodgingRecord::new(name, location, category))
}

/// Decode a lodging `FeatureCollection` held in memory.
///
/// Records come back in document order.
///
/// # Errors
///
/// Returns [`LodgingFormatError`] when the document itself is unusable.
/// Individual bad features are skipped rather than reported.
///
/// # Examples
/// ```
/// use nightstop_core::LodgingCategory;
/// use nightstop_data::parse_lodgings;
///
/// # fn main() -> Result<(), nightstop_data::LodgingFormatError> {
/// let json = r#"{
///     "type": "FeatureCollection",
///     "features": [
///         {"type": "Feature", "geometry": {"type": "Point", "coordinates": [10.2, 56.1]},
///          "properties": {"name": "Harbour Hut"}},
///         {"type": "Feature", "geometry": {"type": "Point", "coordinates": [10.4, 56.2]},
///          "properties": {}}
///     ]
/// }"#;
/// let shelters = parse_lodgings(json, LodgingCategory::Shelter)?;
/// assert_eq!(shelters[0].name, "Harbour Hut");
/// assert_eq!(shelters[1].name, "Unknown Shelter");
/// # Ok(())
/// # }
/// ```
pub fn parse_lodgings(
    json: &str,
    category: LodgingCategory,
) -> Result<Vec<LodgingRecord>, LodgingFormatError> {
    let collection: RawCollection = serde_json::from_str(json)?;
    if collection.kind != "FeatureCollection" {
        return Err(LodgingFormatError::NotAFeatureCollection {
            found: collection.kind,
        });
    }
    let total = collection.features.len();
    let records: Vec<LodgingRecord> = collection
        .features
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match decode_feature(value, category) {
            Ok(record) => Some(record),
            Err(reason) => {
                log::warn!("skipping {category} feature {index}: {reason}");
                None
            }
        })
        .collect();
    log::debug!("decoded {} of {total} {category} features", records.len());
    Ok(records)
}

/// Load a lodging `FeatureCollection` from disk.
///
/// # Errors
///
/// Returns [`LodgingLoadError::Read`] when the file cannot be read and
/// [`LodgingLoadError::Format`] when its contents are not a collection.
pub fn load_lodgings(
    path: &Utf8Path,
    category: LodgingCategory,
) -> Result<Vec<LodgingRecord>, LodgingLoadError> {
    let json = read_utf8(path).map_err(|source| LodgingLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_lodgings(&json, category).map_err(|source| LodgingLoadError::Format {
        path: path.to_path_buf(),
        source,
    })
}
