//! Error types emitted by the Nightstop CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use nightstop_core::{PlanError, PlanningConfigError};
use nightstop_data::{LodgingLoadError, RouteLoadError};
use thiserror::Error;

/// Errors emitted by the Nightstop CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// Neither a hotel nor a shelter collection was supplied.
    #[error("no lodgings given (set --hotels or --shelters, or {hotels_env} or {shelters_env})")]
    MissingLodgingSource {
        hotels_env: &'static str,
        shelters_env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The merged planning options are out of range.
    #[error("invalid planning options: {0}")]
    InvalidPlanningConfig(#[from] PlanningConfigError),
    /// The nearby stride was zero.
    #[error("--stride must be at least 1")]
    ZeroStride,
    /// Loading the route geometry failed.
    #[error(transparent)]
    LoadRoute(#[from] RouteLoadError),
    /// Loading a lodging collection failed.
    #[error(transparent)]
    LoadLodgings(#[from] LodgingLoadError),
    /// The loaded route cannot be planned along.
    #[error("route in {path:?} is unusable: {source}")]
    InvalidRoute {
        path: Utf8PathBuf,
        #[source]
        source: PlanError,
    },
    /// The planner rejected the request.
    #[error("planning failed: {source}")]
    Plan { source: PlanError },
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
