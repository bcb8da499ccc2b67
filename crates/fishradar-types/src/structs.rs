//! Core entity structs for the radar simulation.
//!
//! Three entities flow through the tick cycle:
//!
//! - [`Voyage`]: an active rental whose position the locomotion model
//!   advances each tick. Created and ended by the rental collaborator.
//! - [`SonarReading`]: one synthetic detection event near a vessel.
//!   Immutable once emitted; only ever read within a trailing window.
//! - [`Hotspot`]: a decaying spatial aggregate of recent nearby readings.
//!   Fresh rows are inserted every tick and evicted by age, never merged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{Species, VoyageStatus};
use crate::ids::{HotspotId, ReadingId, VesselId, VoyageId};

/// A geographic point as raw longitude/latitude degrees.
///
/// Distances over these coordinates are planar Euclidean; the simulated
/// region is small enough that no projection is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl GeoPoint {
    /// Create a point from longitude and latitude degrees.
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// An active rental of a vessel, carrying its live position.
///
/// The rental collaborator owns the lifecycle (begin/end); the radar
/// core reads ongoing voyages and writes `position` once per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voyage {
    /// Unique voyage identifier.
    pub voyage_id: VoyageId,
    /// The vessel out on this voyage.
    pub vessel_id: VesselId,
    /// Display name of the vessel.
    pub vessel_name: String,
    /// Passenger capacity of the vessel.
    pub capacity: u32,
    /// Current position; `None` until the first tick assigns the dock.
    pub position: Option<GeoPoint>,
    /// Lifecycle status.
    pub status: VoyageStatus,
}

impl Voyage {
    /// Create a new ongoing voyage with no position yet.
    ///
    /// The first tick that processes the voyage will place it at the
    /// configured dock coordinate.
    pub fn new(vessel_id: VesselId, vessel_name: impl Into<String>, capacity: u32) -> Self {
        Self {
            voyage_id: VoyageId::new(),
            vessel_id,
            vessel_name: vessel_name.into(),
            capacity,
            position: None,
            status: VoyageStatus::Ongoing,
        }
    }
}

/// One synthetic sonar detection event near a vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonarReading {
    /// Unique reading identifier.
    pub reading_id: ReadingId,
    /// The voyage whose scan produced this reading.
    pub voyage_id: VoyageId,
    /// Where the fish was detected (near, not at, the vessel).
    pub position: GeoPoint,
    /// Signal strength in `1..=100`.
    pub signal_strength: u32,
    /// Timestamp of the tick that emitted the reading.
    pub detected_at: DateTime<Utc>,
}

/// A decaying spatial aggregate summarizing recent nearby readings.
///
/// Multiple hotspot rows may coexist for the same physical cluster across
/// ticks; rows fade out individually as their `last_seen` ages past the
/// TTL rather than being refreshed in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Unique hotspot identifier.
    pub hotspot_id: HotspotId,
    /// Randomly drawn species for map display.
    pub species: Species,
    /// `ceil(mean(signal_strength) / 10)` over the member readings.
    pub intensity: u32,
    /// Synthetic depth in meters, one decimal place.
    pub depth: f64,
    /// Arithmetic centroid of the member reading positions.
    pub position: GeoPoint,
    /// Timestamp of the tick that created this row.
    pub last_seen: DateTime<Utc>,
}
