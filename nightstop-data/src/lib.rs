//! File formats consumed by Nightstop.
//!
//! Responsibilities:
//! - Decode route geometry from GraphHopper responses and GeoJSON.
//! - Decode lodging `FeatureCollection`s into core lodging records.
//! - Read files through capability-scoped UTF-8 paths.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `nightstop-core`).
//! - Loaders return plain data; route validity is checked when a
//!   [`nightstop_core::RoutePath`] is built.

#![forbid(unsafe_code)]

pub mod fs;
mod lodging;
mod route;

pub use lodging::{LodgingFormatError, LodgingLoadError, load_lodgings, parse_lodgings};
pub use route::{RouteFormatError, RouteGeometry, RouteLoadError, load_route, parse_route};
