//! The detection emission model.
//!
//! After a vessel moves, its sonar has a fixed chance of registering a
//! fish nearby. A winning draw produces exactly one reading: the contact
//! position is the vessel's new position plus a tiny uniform jitter per
//! axis (fish swim near the boat, not under the keel), and the signal
//! strength is uniform in `1..=100`. A losing draw produces nothing.

use chrono::{DateTime, Utc};
use fishradar_types::{GeoPoint, ReadingId, SonarReading, VoyageId};
use rand::Rng;

/// Run one sonar scan for a vessel at its new position.
///
/// Returns `Some` reading with probability `probability`, `None`
/// otherwise. The probability is clamped into `[0, 1]` so a hostile
/// config value cannot panic the draw.
pub fn scan_for_fish(
    voyage_id: VoyageId,
    vessel_position: GeoPoint,
    probability: f64,
    jitter: f64,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Option<SonarReading> {
    if !rng.random_bool(probability.clamp(0.0, 1.0)) {
        return None;
    }

    let signal_strength = rng.random_range(1..=100);
    let fish_lon = vessel_position.lon + (rng.random::<f64>() - 0.5) * jitter;
    let fish_lat = vessel_position.lat + (rng.random::<f64>() - 0.5) * jitter;

    Some(SonarReading {
        reading_id: ReadingId::new(),
        voyage_id,
        position: GeoPoint::new(fish_lon, fish_lat),
        signal_strength,
        detected_at: now,
    })
}
