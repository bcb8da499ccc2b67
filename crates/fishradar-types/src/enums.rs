//! Enumeration types shared across the simulation.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a voyage.
///
/// Voyages are created and ended by the rental collaborator; the radar
/// core only ever processes [`VoyageStatus::Ongoing`] voyages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoyageStatus {
    /// The vessel is out on the water and being simulated.
    Ongoing,
    /// The rental finished; the voyage is no longer simulated.
    Ended,
}

impl VoyageStatus {
    /// Whether this voyage is still being simulated.
    pub const fn is_ongoing(self) -> bool {
        matches!(self, Self::Ongoing)
    }
}

impl core::fmt::Display for VoyageStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ongoing => write!(f, "ongoing"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// Fish species attached to a hotspot.
///
/// The species is decorative: the clustering engine draws one at random
/// per hotspot rather than deriving it from the readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// European perch.
    Perch,
    /// Zander (pike-perch).
    Zander,
    /// Common carp.
    Carp,
}

impl Species {
    /// All species in the catalog, in `species_id` order.
    pub const ALL: [Self; 3] = [Self::Perch, Self::Zander, Self::Carp];

    /// Stable numeric identifier for feed consumers (1-based).
    pub const fn species_id(self) -> u32 {
        match self {
            Self::Perch => 1,
            Self::Zander => 2,
            Self::Carp => 3,
        }
    }

    /// Human-readable name shown on the map.
    pub const fn common_name(self) -> &'static str {
        match self {
            Self::Perch => "Perch",
            Self::Zander => "Zander",
            Self::Carp => "Carp",
        }
    }
}

impl core::fmt::Display for Species {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.common_name())
    }
}
