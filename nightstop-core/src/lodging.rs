//! Lodging records supplied by the caller.

use std::fmt;
use std::str::FromStr;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of overnight accommodation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LodgingCategory {
    /// A hotel, hostel or similar paid accommodation.
    Hotel,
    /// A shelter or primitive campsite.
    Shelter,
}

impl LodgingCategory {
    /// Name given to records whose source omits one.
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::Hotel => "Unknown Hotel",
            Self::Shelter => "Unknown Shelter",
        }
    }
}

impl fmt::Display for LodgingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hotel => f.write_str("Hotel"),
            Self::Shelter => f.write_str("Shelter"),
        }
    }
}

/// Error returned when parsing an unknown [`LodgingCategory`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown lodging category {0:?}; expected Hotel or Shelter")]
pub struct UnknownLodgingCategory(pub String);

impl FromStr for LodgingCategory {
    type Err = UnknownLodgingCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            v if v.eq_ignore_ascii_case("hotel") => Ok(Self::Hotel),
            v if v.eq_ignore_ascii_case("shelter") => Ok(Self::Shelter),
            _ => Err(UnknownLodgingCategory(value.to_owned())),
        }
    }
}

/// A place to stay overnight, as loaded from an external dataset.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use nightstop_core::{LodgingCategory, LodgingRecord};
///
/// let inn = LodgingRecord::hotel("Harbour Inn", Coord { x: 12.57, y: 55.68 });
/// assert_eq!(inn.category, LodgingCategory::Hotel);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LodgingRecord {
    /// Display name.
    pub name: String,
    /// Position of the lodging.
    pub location: Coord<f64>,
    /// Accommodation category.
    pub category: LodgingCategory,
}

impl LodgingRecord {
    /// Construct a record from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, location: Coord<f64>, category: LodgingCategory) -> Self {
        Self {
            name: name.into(),
            location,
            category,
        }
    }

    /// Construct a hotel record.
    #[must_use]
    pub fn hotel(name: impl Into<String>, location: Coord<f64>) -> Self {
        Self::new(name, location, LodgingCategory::Hotel)
    }

    /// Construct a shelter record.
    #[must_use]
    pub fn shelter(name: impl Into<String>, location: Coord<f64>) -> Self {
        Self::new(name, location, LodgingCategory::Shelter)
    }
}
