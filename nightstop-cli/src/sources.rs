//! Input files shared by the `plan` and `nearby` commands.

use camino::{Utf8Path, Utf8PathBuf};
use nightstop_core::{LodgingCategory, LodgingRecord};
use nightstop_data::{RouteGeometry, fs::is_regular_file, load_lodgings, load_route};

use crate::{ARG_HOTELS, ARG_ROUTE, ARG_SHELTERS, CliError};

/// Lodging collections named on the command line; at least one is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LodgingSources {
    pub(crate) hotels: Option<Utf8PathBuf>,
    pub(crate) shelters: Option<Utf8PathBuf>,
}

impl LodgingSources {
    /// Combine the optional paths, failing when both are absent.
    pub(crate) fn new(
        hotels: Option<Utf8PathBuf>,
        shelters: Option<Utf8PathBuf>,
        env: (&'static str, &'static str),
    ) -> Result<Self, CliError> {
        if hotels.is_none() && shelters.is_none() {
            let (hotels_env, shelters_env) = env;
            return Err(CliError::MissingLodgingSource {
                hotels_env,
                shelters_env,
            });
        }
        Ok(Self { hotels, shelters })
    }

    pub(crate) fn validate(&self) -> Result<(), CliError> {
        if let Some(path) = &self.hotels {
            require_existing(path, ARG_HOTELS)?;
        }
        if let Some(path) = &self.shelters {
            require_existing(path, ARG_SHELTERS)?;
        }
        Ok(())
    }

    /// Load hotels then shelters; the order fixes discovery order for
    /// tie-breaking downstream.
    pub(crate) fn load(&self) -> Result<Vec<LodgingRecord>, CliError> {
        let mut lodgings = Vec::new();
        for (source, category) in [
            (&self.hotels, LodgingCategory::Hotel),
            (&self.shelters, LodgingCategory::Shelter),
        ] {
            if let Some(path) = source {
                let records = load_lodgings(path, category)?;
                tracing::debug!(%path, count = records.len(), %category, "loaded lodgings");
                lodgings.extend(records);
            }
        }
        Ok(lodgings)
    }
}

/// Decode the route file at `path`.
pub(crate) fn load_route_file(path: &Utf8Path) -> Result<RouteGeometry, CliError> {
    let geometry = load_route(path)?;
    tracing::debug!(
        %path,
        vertices = geometry.coordinates.len(),
        reported_distance_m = ?geometry.reported_distance_m,
        "loaded route"
    );
    Ok(geometry)
}

pub(crate) fn require_route(path: &Utf8Path) -> Result<(), CliError> {
    require_existing(path, ARG_ROUTE)
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match is_regular_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}
