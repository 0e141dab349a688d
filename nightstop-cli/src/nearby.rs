//! Nearby command: the closest lodgings to points along a route.

use std::io::Write;
use std::num::NonZeroUsize;

use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use nightstop_core::nearby::DEFAULT_NEARBY_LIMIT;
use nightstop_core::{PointLodgings, RoutePath, nearby_lodgings_along};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::sources::{LodgingSources, load_route_file, require_route};
use crate::{
    ARG_HOTELS, ARG_LIMIT, ARG_ROUTE, ARG_SHELTERS, ARG_STRIDE, CliError, ENV_NEARBY_HOTELS,
    ENV_NEARBY_ROUTE, ENV_NEARBY_SHELTERS,
};

/// CLI arguments for the `nearby` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "nearby",
    long_about = "For every stride-th vertex of the route, list the \
                 lodgings closest to it by great-circle distance. Output \
                 is JSON.",
    about = "List the lodgings closest to points along a route"
)]
#[ortho_config(prefix = "NIGHTSTOP")]
pub(crate) struct NearbyArgs {
    /// Path to the route geometry (GeoJSON or GraphHopper JSON).
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) route: Option<Utf8PathBuf>,
    /// Path to a GeoJSON collection of hotels.
    #[arg(long = ARG_HOTELS, value_name = "path")]
    #[serde(default)]
    pub(crate) hotels: Option<Utf8PathBuf>,
    /// Path to a GeoJSON collection of shelters.
    #[arg(long = ARG_SHELTERS, value_name = "path")]
    #[serde(default)]
    pub(crate) shelters: Option<Utf8PathBuf>,
    /// Lodgings listed per point (default 5).
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Query every n-th route vertex (default 1).
    #[arg(long = ARG_STRIDE, value_name = "n")]
    #[serde(default)]
    pub(crate) stride: Option<usize>,
}

impl NearbyArgs {
    pub(crate) fn into_config(self) -> Result<NearbyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearbyConfig::try_from(merged)
    }
}

/// Resolved `nearby` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NearbyConfig {
    pub(crate) route: Utf8PathBuf,
    pub(crate) lodgings: LodgingSources,
    pub(crate) limit: usize,
    pub(crate) stride: NonZeroUsize,
}

impl TryFrom<NearbyArgs> for NearbyConfig {
    type Error = CliError;

    fn try_from(args: NearbyArgs) -> Result<Self, Self::Error> {
        let route = args.route.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE,
            env: ENV_NEARBY_ROUTE,
        })?;
        let lodgings = LodgingSources::new(
            args.hotels,
            args.shelters,
            (ENV_NEARBY_HOTELS, ENV_NEARBY_SHELTERS),
        )?;
        let stride = NonZeroUsize::new(args.stride.unwrap_or(1)).ok_or(CliError::ZeroStride)?;
        Ok(Self {
            route,
            lodgings,
            limit: args.limit.unwrap_or(DEFAULT_NEARBY_LIMIT),
            stride,
        })
    }
}

/// Every `stride`-th vertex of `route`, starting with the first.
pub(crate) fn sample_points(route: &RoutePath, stride: NonZeroUsize) -> Vec<Coord<f64>> {
    route
        .coordinates()
        .iter()
        .step_by(stride.get())
        .copied()
        .collect()
}

pub(super) fn run_nearby(args: NearbyArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_nearby_with(args, &mut stdout)
}

pub(super) fn run_nearby_with(args: NearbyArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_route(&config.route)?;
    config.lodgings.validate()?;
    let results = execute_nearby(&config)?;
    let payload = serde_json::to_string_pretty(&results).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

fn execute_nearby(config: &NearbyConfig) -> Result<Vec<PointLodgings>, CliError> {
    let geometry = load_route_file(&config.route)?;
    let route =
        RoutePath::new(geometry.coordinates).map_err(|source| CliError::InvalidRoute {
            path: config.route.clone(),
            source,
        })?;
    let lodgings = config.lodgings.load()?;
    let points = sample_points(&route, config.stride);
    tracing::info!(
        points = points.len(),
        lodgings = lodgings.len(),
        limit = config.limit,
        "looking up nearby lodgings"
    );
    Ok(nearby_lodgings_along(&points, &lodgings, config.limit))
}
