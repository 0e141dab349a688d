//! Command-line interface for planning overnight stops along a route.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod nearby;
mod plan;
mod sources;

pub use error::CliError;

use nearby::{NearbyArgs, run_nearby};
use plan::{PlanArgs, run_plan};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "NIGHTSTOP_LOG";

pub(crate) const ARG_ROUTE: &str = "route";
pub(crate) const ARG_HOTELS: &str = "hotels";
pub(crate) const ARG_SHELTERS: &str = "shelters";
pub(crate) const ARG_DAILY_DISTANCE_KM: &str = "daily-distance-km";
pub(crate) const ARG_DISTANCE_WEIGHT: &str = "distance-weight";
pub(crate) const ARG_OFF_ROUTE_WEIGHT: &str = "off-route-weight";
pub(crate) const ARG_MAX_OFF_ROUTE_M: &str = "max-off-route-m";
pub(crate) const ARG_ALTERNATIVES: &str = "alternatives";
pub(crate) const ARG_CAP_SEGMENTS: &str = "cap-segments";
pub(crate) const ARG_PROJECTION: &str = "projection";
pub(crate) const ARG_FORMAT: &str = "format";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_STRIDE: &str = "stride";

pub(crate) const ENV_PLAN_ROUTE: &str = "NIGHTSTOP_CMDS_PLAN_ROUTE";
pub(crate) const ENV_PLAN_HOTELS: &str = "NIGHTSTOP_CMDS_PLAN_HOTELS";
pub(crate) const ENV_PLAN_SHELTERS: &str = "NIGHTSTOP_CMDS_PLAN_SHELTERS";
pub(crate) const ENV_NEARBY_ROUTE: &str = "NIGHTSTOP_CMDS_NEARBY_ROUTE";
pub(crate) const ENV_NEARBY_HOTELS: &str = "NIGHTSTOP_CMDS_NEARBY_HOTELS";
pub(crate) const ENV_NEARBY_SHELTERS: &str = "NIGHTSTOP_CMDS_NEARBY_SHELTERS";

/// Run the Nightstop CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, an
/// input file cannot be loaded, planning fails, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
        Command::Nearby(args) => run_nearby(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "nightstop",
    about = "Plan overnight stops along a pre-computed route",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split a route into days and choose a lodging for each night.
    Plan(PlanArgs),
    /// List the lodgings closest to points along a route.
    Nearby(NearbyArgs),
}

#[cfg(test)]
mod tests;
