//! Plan command implementation for the Nightstop CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use nightstop_core::{
    CostWeights, DynamicProgrammingPlanner, ItineraryPlanner, PlanRequest, PlanResponse,
    PlanningConfig, ProjectionStrategy,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::sources::{LodgingSources, load_route_file, require_route};
use crate::{
    ARG_ALTERNATIVES, ARG_CAP_SEGMENTS, ARG_DAILY_DISTANCE_KM, ARG_DISTANCE_WEIGHT, ARG_FORMAT,
    ARG_HOTELS, ARG_MAX_OFF_ROUTE_M, ARG_OFF_ROUTE_WEIGHT, ARG_PROJECTION, ARG_ROUTE,
    ARG_SHELTERS, CliError, ENV_PLAN_HOTELS, ENV_PLAN_ROUTE, ENV_PLAN_SHELTERS,
};

const METRES_PER_KILOMETRE: f64 = 1_000.0;

/// How the plan is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Pretty-printed `PlanResponse` JSON.
    #[default]
    Json,
    /// One line per day, alternatives indented beneath.
    Text,
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Split a route into days close to a target distance and \
                 choose a lodging for each night. The route is a GeoJSON \
                 LineString or an unencoded GraphHopper response; lodgings \
                 are GeoJSON FeatureCollections of points. Options can come \
                 from CLI flags, configuration files, or environment \
                 variables.",
    about = "Plan overnight stops along a route"
)]
#[ortho_config(prefix = "NIGHTSTOP")]
pub(crate) struct PlanArgs {
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
    /// Target distance per day in kilometres (default 50).
    #[arg(long = ARG_DAILY_DISTANCE_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) daily_distance_km: Option<f64>,
    /// Weight of deviation from the daily target (default 5).
    #[arg(long = ARG_DISTANCE_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) distance_weight: Option<f64>,
    /// Weight of the detour to reach a lodging (default 0.02).
    #[arg(long = ARG_OFF_ROUTE_WEIGHT, value_name = "weight")]
    #[serde(default)]
    pub(crate) off_route_weight: Option<f64>,
    /// Ignore lodgings further than this from the route (default 2500).
    #[arg(long = ARG_MAX_OFF_ROUTE_M, value_name = "metres")]
    #[serde(default)]
    pub(crate) max_off_route_m: Option<f64>,
    /// Substitute lodgings listed per day (default 4).
    #[arg(long = ARG_ALTERNATIVES, value_name = "count")]
    #[serde(default)]
    pub(crate) alternatives: Option<usize>,
    /// Forbid days longer than one and a half targets.
    #[arg(long = ARG_CAP_SEGMENTS, value_name = "bool")]
    #[serde(default)]
    pub(crate) cap_segments: Option<bool>,
    /// How lodgings are placed on the route.
    #[arg(long = ARG_PROJECTION, value_name = "strategy")]
    #[serde(default)]
    pub(crate) projection: Option<ProjectionStrategy>,
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Path to the route geometry.
    pub(crate) route: Utf8PathBuf,
    /// Lodging collections to load.
    pub(crate) lodgings: LodgingSources,
    /// Planner settings with CLI overrides applied.
    pub(crate) planning: PlanningConfig,
    /// Output format.
    pub(crate) format: OutputFormat,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_route(&self.route)?;
        self.lodgings.validate()
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let route = args.route.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE,
            env: ENV_PLAN_ROUTE,
        })?;
        let lodgings =
            LodgingSources::new(args.hotels, args.shelters, (ENV_PLAN_HOTELS, ENV_PLAN_SHELTERS))?;

        let defaults = PlanningConfig::default();
        let weights = CostWeights::new(
            args.distance_weight
                .unwrap_or(defaults.weights.distance_deviation_weight),
            args.off_route_weight
                .unwrap_or(defaults.weights.off_route_deviation_weight),
        );
        let target = args.daily_distance_km.map_or(defaults.target_daily_distance_m, |km| {
            km * METRES_PER_KILOMETRE
        });
        let planning = PlanningConfig::default()
            .with_target_daily_distance_m(target)
            .with_weights(weights)
            .with_max_off_route_m(args.max_off_route_m.unwrap_or(defaults.max_off_route_m))
            .with_alternatives_per_day(
                args.alternatives.unwrap_or(defaults.alternatives_per_day),
            )
            .with_segment_cap(args.cap_segments.unwrap_or(defaults.cap_segment_length))
            .with_projection(args.projection.unwrap_or(defaults.projection));
        planning.validate()?;

        Ok(Self {
            route,
            lodgings,
            planning,
            format: args.format.unwrap_or_default(),
        })
    }
}

/// Builds a planner instance for the current plan invocation.
pub(super) trait PlannerBuilder {
    fn build(&self, config: &PlanningConfig) -> Result<Box<dyn ItineraryPlanner>, CliError>;
}

pub(super) struct DefaultPlannerBuilder;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, config: &PlanningConfig) -> Result<Box<dyn ItineraryPlanner>, CliError> {
        Ok(Box::new(DynamicProgrammingPlanner::new(config.clone())))
    }
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultPlannerBuilder;
    run_plan_with(args, &builder, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let response = execute_plan(&config, builder)?;
    match config.format {
        OutputFormat::Json => write_json(writer, &response),
        OutputFormat::Text => write_text(writer, &response).map_err(CliError::WriteOutput),
    }
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_plan(
    config: &PlanConfig,
    builder: &dyn PlannerBuilder,
) -> Result<PlanResponse, CliError> {
    let geometry = load_route_file(&config.route)?;
    let lodgings = config.lodgings.load()?;
    let request = PlanRequest {
        route: geometry.coordinates,
        lodgings,
    };
    let planner = builder.build(&config.planning)?;
    let response = planner
        .plan(&request)
        .map_err(|source| CliError::Plan { source })?;
    if let Some(reported) = geometry.reported_distance_m {
        tracing::debug!(
            reported_m = reported,
            measured_m = response.route_distance,
            "route distance"
        );
    }
    tracing::info!(
        days = response.days.len(),
        candidates = response.candidates_evaluated,
        "planned itinerary"
    );
    Ok(response)
}

fn write_json(writer: &mut dyn Write, response: &PlanResponse) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(response).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

fn kilometres(metres: f64) -> f64 {
    metres / METRES_PER_KILOMETRE
}

/// Render the plan as a day listing.
pub(crate) fn write_text(writer: &mut dyn Write, response: &PlanResponse) -> std::io::Result<()> {
    writeln!(
        writer,
        "Route: {:.1} km in {} days ({} candidates)",
        kilometres(response.route_distance),
        response.days.len(),
        response.candidates_evaluated
    )?;
    for day in &response.days {
        let stop = &day.primary_stop;
        writeln!(
            writer,
            "Day {}: {}, {:.1} km along route, +{:.1} km from last stop, detour {:.0} m",
            day.day_index,
            stop.name,
            kilometres(day.end_distance),
            kilometres(day.day_distance()),
            stop.off_route
        )?;
        for alternative in &day.alternatives {
            writeln!(
                writer,
                "    or {}, {:.1} km along route, detour {:.0} m",
                alternative.name,
                kilometres(alternative.route_distance),
                alternative.off_route
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
