//! The voyage locomotion model: a bounded random walk on the lake.
//!
//! Each tick every ongoing vessel drifts by two independent uniform
//! offsets in `[-step/2, +step/2]` per axis. A candidate position outside
//! the lake boundary is not retried: the negated offset is committed
//! instead (the vessel "bounces back"), which keeps one tick's work per
//! vessel constant and cannot loop. A voyage without a position yet is
//! placed at the dock before drifting.

use fishradar_types::GeoPoint;
use fishradar_world::LakeBoundary;
use rand::Rng;

/// Result of one drift step for a single vessel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftOutcome {
    /// The position to commit for this tick.
    pub position: GeoPoint,
    /// Whether the candidate left the lake and the offset was negated.
    pub reflected: bool,
}

/// Advance one vessel by a bounded random walk step.
///
/// `current` is the vessel's position from the previous tick, or `None`
/// if the voyage has not been placed yet; the dock is used in that case.
pub fn drift_vessel(
    current: Option<GeoPoint>,
    boundary: &LakeBoundary,
    step: f64,
    rng: &mut impl Rng,
) -> DriftOutcome {
    let origin = current.unwrap_or_else(|| boundary.dock());

    let d_lon = (rng.random::<f64>() - 0.5) * step;
    let d_lat = (rng.random::<f64>() - 0.5) * step;

    let candidate = GeoPoint::new(origin.lon + d_lon, origin.lat + d_lat);
    if boundary.contains(candidate) {
        DriftOutcome {
            position: candidate,
            reflected: false,
        }
    } else {
        DriftOutcome {
            position: GeoPoint::new(origin.lon - d_lon, origin.lat - d_lat),
            reflected: true,
        }
    }
}
