//! Candidates: lodgings and route endpoints placed along the route.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::projector::Projection;
use crate::{LodgingCategory, LodgingRecord, RoutePath};

/// What a [`Candidate`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CandidateKind {
    /// A projected hotel.
    Hotel,
    /// A projected shelter.
    Shelter,
    /// Synthetic stop at the first route vertex.
    Start,
    /// Synthetic stop at the last route vertex.
    Destination,
}

impl From<LodgingCategory> for CandidateKind {
    fn from(category: LodgingCategory) -> Self {
        match category {
            LodgingCategory::Hotel => Self::Hotel,
            LodgingCategory::Shelter => Self::Shelter,
        }
    }
}

/// A possible overnight stop annotated with its position along the route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    /// Display name.
    pub name: String,
    /// Position of the stop itself, which may lie off the route.
    pub location: Coord<f64>,
    /// Metres from the route start to the stop's projection.
    pub route_distance: f64,
    /// Metres between the stop and the route.
    pub off_route: f64,
    /// Lodging category or sentinel marker.
    pub kind: CandidateKind,
}

impl Candidate {
    /// Sentinel for the start of the route.
    #[must_use]
    pub fn start(route: &RoutePath) -> Self {
        Self {
            name: String::from("Start"),
            location: route.start(),
            route_distance: 0.0,
            off_route: 0.0,
            kind: CandidateKind::Start,
        }
    }

    /// Sentinel for the end of the route.
    #[must_use]
    pub fn destination(route: &RoutePath) -> Self {
        Self {
            name: String::from("Destination"),
            location: route.end(),
            route_distance: route.total_distance(),
            off_route: 0.0,
            kind: CandidateKind::Destination,
        }
    }

    /// Candidate for a lodging that projected onto the route.
    #[must_use]
    pub fn from_lodging(lodging: &LodgingRecord, projection: Projection) -> Self {
        Self {
            name: lodging.name.clone(),
            location: lodging.location,
            route_distance: projection.route_distance,
            off_route: projection.off_route,
            kind: lodging.category.into(),
        }
    }

    /// Whether this is the Start or Destination sentinel.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        matches!(self.kind, CandidateKind::Start | CandidateKind::Destination)
    }
}

/// Start, projected lodgings and Destination, sorted by route distance.
///
/// Discovery order is Start, then lodgings in projection order, then
/// Destination. Sorting is stable, so candidates sharing a route distance
/// keep that order. Each slot remembers its discovery position for
/// tie-breaking in the alternative ranker.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
    discovery: Vec<usize>,
}

impl CandidatePool {
    /// Assemble and sort the pool for `route`.
    #[must_use]
    pub fn new(route: &RoutePath, lodgings: Vec<Candidate>) -> Self {
        let mut entries: Vec<(usize, Candidate)> = std::iter::once(Candidate::start(route))
            .chain(lodgings)
            .chain(std::iter::once(Candidate::destination(route)))
            .enumerate()
            .collect();
        entries.sort_by(|(_, lhs), (_, rhs)| lhs.route_distance.total_cmp(&rhs.route_distance));
        let (discovery, candidates) = entries.into_iter().unzip();
        Self {
            candidates,
            discovery,
        }
    }

    /// Candidates in route order.
    #[must_use]
    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Candidate at sorted position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    /// Discovery position of the candidate at sorted position `index`.
    #[must_use]
    pub fn discovery_index(&self, index: usize) -> Option<usize> {
        self.discovery.get(index).copied()
    }

    /// Number of candidates including both sentinels.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always `false` for pools built with [`CandidatePool::new`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Sorted position of the Start sentinel.
    #[must_use]
    pub fn start_index(&self) -> Option<usize> {
        self.position_of(CandidateKind::Start)
    }

    /// Sorted position of the Destination sentinel.
    #[must_use]
    pub fn destination_index(&self) -> Option<usize> {
        self.position_of(CandidateKind::Destination)
    }

    fn position_of(&self, kind: CandidateKind) -> Option<usize> {
        self.candidates
            .iter()
            .position(|candidate| candidate.kind == kind)
    }
}
