//! Test helpers for writing route and lodging fixtures to disk.

use camino::{Utf8Path, Utf8PathBuf};
use nightstop_core::LodgingRecord;
use nightstop_core::test_support::{equator_point, hotel_at};
use serde_json::{Value, json};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).unwrap_or_else(|err| panic!("write {path}: {err}"));
}

/// GeoJSON `LineString` along the equator, `length_m` long with `vertices`
/// evenly spaced points.
pub(super) fn equator_route_json(length_m: f64, vertices: u32) -> String {
    let last = f64::from(vertices.saturating_sub(1).max(1));
    let coordinates: Vec<Value> = (0..vertices)
        .map(|step| {
            let point = equator_point(length_m * f64::from(step) / last);
            json!([point.x, point.y])
        })
        .collect();
    json!({ "type": "LineString", "coordinates": coordinates }).to_string()
}

/// GeoJSON `FeatureCollection` holding `lodgings` as named points.
pub(super) fn lodgings_json(lodgings: &[LodgingRecord]) -> String {
    let features: Vec<Value> = lodgings
        .iter()
        .map(|lodging| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [lodging.location.x, lodging.location.y]
                },
                "properties": { "name": lodging.name }
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features }).to_string()
}

/// Temporary directory with a 100 km equatorial route, a hotel at the
/// halfway point and a shelter 30 km in.
pub(super) struct InputFiles {
    _dir: TempDir,
    root: Utf8PathBuf,
    route: Utf8PathBuf,
    hotels: Utf8PathBuf,
    shelters: Utf8PathBuf,
}

impl InputFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let route = root.join("route.geojson");
        let hotels = root.join("hotels.geojson");
        let shelters = root.join("shelters.geojson");
        write_utf8(&route, equator_route_json(100_000.0, 11).as_bytes());
        write_utf8(
            &hotels,
            lodgings_json(&[hotel_at("Hotel", 50_000.0, 0.0)]).as_bytes(),
        );
        let shelter = hotel_at("Ridge Shelter", 30_000.0, 200.0);
        write_utf8(
            &shelters,
            lodgings_json(&[LodgingRecord::shelter(shelter.name, shelter.location)]).as_bytes(),
        );
        Self {
            _dir: dir,
            root,
            route,
            hotels,
            shelters,
        }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn route(&self) -> &Utf8Path {
        &self.route
    }

    pub(super) fn hotels(&self) -> &Utf8Path {
        &self.hotels
    }

    pub(super) fn shelters(&self) -> &Utf8Path {
        &self.shelters
    }
}
