//! Post-tick read models: the query interface external collaborators use.
//!
//! The tick task owns the simulation state exclusively, so concurrent
//! readers never touch the stores directly. Instead the runner captures
//! a [`RadarSnapshot`] after every completed tick and publishes it into a
//! shared [`SnapshotHandle`]. Readers observe either the pre-tick or the
//! post-tick state of every entity -- never a partially-written hotspot,
//! and never the gap between eviction and insertion inside a tick.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use fishradar_types::{
    Feature, FeatureCollection, Hotspot, HotspotProperties, VesselProperties, Voyage,
};
use tokio::sync::RwLock;

use crate::tick::SimulationState;

/// An immutable view of the two read models after one tick.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RadarSnapshot {
    /// The tick that produced this snapshot (0 before the first tick).
    pub tick: u64,
    /// Timestamp of the producing tick.
    pub generated_at: DateTime<Utc>,
    /// Ongoing voyages with a known position.
    pub vessels: Vec<Voyage>,
    /// All current (non-evicted) hotspot rows, newest first.
    pub hotspots: Vec<Hotspot>,
}

impl RadarSnapshot {
    /// The snapshot served before any tick has completed.
    pub const fn empty() -> Self {
        Self {
            tick: 0,
            generated_at: DateTime::<Utc>::UNIX_EPOCH,
            vessels: Vec::new(),
            hotspots: Vec::new(),
        }
    }

    /// Capture the read models from the post-tick simulation state.
    pub fn capture(state: &SimulationState, generated_at: DateTime<Utc>) -> Self {
        let vessels = state
            .voyages
            .ongoing()
            .into_iter()
            .filter(|voyage| voyage.position.is_some())
            .collect();
        Self {
            tick: state.tick,
            generated_at,
            vessels,
            hotspots: state.hotspots.all(),
        }
    }

    /// Ongoing voyages with a non-null position.
    pub fn list_active_vessels(&self) -> &[Voyage] {
        &self.vessels
    }

    /// All currently stored hotspots.
    pub fn list_hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    /// Render the vessel read model as a feature collection.
    pub fn vessel_features(&self) -> FeatureCollection<VesselProperties> {
        let features = self
            .vessels
            .iter()
            .filter_map(|voyage| {
                voyage.position.map(|position| {
                    Feature::new(
                        VesselProperties {
                            voyage_id: voyage.voyage_id,
                            vessel_id: voyage.vessel_id,
                            name: voyage.vessel_name.clone(),
                            capacity: voyage.capacity,
                            status: voyage.status,
                        },
                        position,
                    )
                })
            })
            .collect();
        FeatureCollection::new(features)
    }

    /// Render the hotspot read model as a feature collection.
    pub fn hotspot_features(&self) -> FeatureCollection<HotspotProperties> {
        let features = self
            .hotspots
            .iter()
            .map(|hotspot| {
                Feature::new(
                    HotspotProperties {
                        id: hotspot.hotspot_id,
                        species_id: hotspot.species.species_id(),
                        species_name: hotspot.species.common_name().to_owned(),
                        intensity: hotspot.intensity,
                        depth: hotspot.depth,
                        last_seen: hotspot.last_seen,
                    },
                    hotspot.position,
                )
            })
            .collect();
        FeatureCollection::new(features)
    }
}

impl Default for RadarSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Shared handle over the latest snapshot.
///
/// Cloning is cheap; any number of tasks may read while the runner
/// publishes.
#[derive(Debug, Clone)]
pub struct SnapshotHandle {
    /// The latest published snapshot.
    inner: Arc<RwLock<RadarSnapshot>>,
}

impl SnapshotHandle {
    /// Create a handle serving the empty snapshot.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RadarSnapshot::empty())),
        }
    }

    /// Replace the published snapshot. Called by the runner after each tick.
    pub async fn publish(&self, snapshot: RadarSnapshot) {
        let mut guard = self.inner.write().await;
        *guard = snapshot;
    }

    /// Clone out the whole current snapshot.
    pub async fn current(&self) -> RadarSnapshot {
        self.inner.read().await.clone()
    }

    /// Ongoing voyages with a non-null position.
    pub async fn list_active_vessels(&self) -> Vec<Voyage> {
        self.inner.read().await.list_active_vessels().to_vec()
    }

    /// All currently stored hotspots.
    pub async fn list_hotspots(&self) -> Vec<Hotspot> {
        self.inner.read().await.list_hotspots().to_vec()
    }

    /// The vessel read model as a feature collection.
    pub async fn vessel_features(&self) -> FeatureCollection<VesselProperties> {
        self.inner.read().await.vessel_features()
    }

    /// The hotspot read model as a feature collection.
    pub async fn hotspot_features(&self) -> FeatureCollection<HotspotProperties> {
        self.inner.read().await.hotspot_features()
    }
}

impl Default for SnapshotHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use fishradar_types::{GeoPoint, VesselId};
    use fishradar_world::LakeBoundary;

    use super::*;
    use crate::tick::{RadarParams, run_tick};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn sample_state() -> SimulationState {
        let ring = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(60.0, 0.0),
            GeoPoint::new(60.0, 60.0),
            GeoPoint::new(0.0, 60.0),
        ];
        let boundary = LakeBoundary::new(ring, GeoPoint::new(29.0, 41.0)).unwrap();
        let params = RadarParams {
            movement_step: 0.15,
            detection_probability: 1.0,
            detection_jitter: 0.000_01,
            cluster_eps: 0.000_2,
            reading_window: chrono::Duration::seconds(10),
            hotspot_ttl: chrono::Duration::seconds(15),
        };
        SimulationState::new(boundary, params, 42)
    }

    #[test]
    fn capture_skips_voyages_without_a_position() {
        let mut state = sample_state();
        state
            .voyages
            .begin_voyage(Voyage::new(VesselId::new(), "Heron", 4))
            .unwrap();

        // Before any tick the voyage has no position.
        let snapshot = RadarSnapshot::capture(&state, base_time());
        assert!(snapshot.list_active_vessels().is_empty());

        run_tick(&mut state, base_time());
        let snapshot = RadarSnapshot::capture(&state, base_time());
        assert_eq!(snapshot.list_active_vessels().len(), 1);
        assert_eq!(snapshot.tick, 1);
    }

    #[test]
    fn feature_collections_mirror_the_read_models() {
        let mut state = sample_state();
        state
            .voyages
            .begin_voyage(Voyage::new(VesselId::new(), "Heron", 4))
            .unwrap();
        run_tick(&mut state, base_time());

        let snapshot = RadarSnapshot::capture(&state, base_time());
        let vessels = snapshot.vessel_features();
        assert_eq!(vessels.collection_type, "FeatureCollection");
        assert_eq!(vessels.features.len(), 1);
        let vessel = vessels.features.first().unwrap();
        assert_eq!(vessel.properties.name, "Heron");

        let hotspots = snapshot.hotspot_features();
        assert_eq!(hotspots.features.len(), snapshot.list_hotspots().len());
        for feature in &hotspots.features {
            assert!(!feature.properties.species_name.is_empty());
            assert!(feature.properties.species_id >= 1);
        }
    }

    #[tokio::test]
    async fn handle_serves_the_latest_published_snapshot() {
        let handle = SnapshotHandle::new();
        assert_eq!(handle.current().await.tick, 0);
        assert!(handle.list_hotspots().await.is_empty());

        let mut state = sample_state();
        state
            .voyages
            .begin_voyage(Voyage::new(VesselId::new(), "Heron", 4))
            .unwrap();
        run_tick(&mut state, base_time());
        handle
            .publish(RadarSnapshot::capture(&state, base_time()))
            .await;

        let reader = handle.clone();
        assert_eq!(reader.current().await.tick, 1);
        assert_eq!(reader.list_active_vessels().await.len(), 1);
    }
}
