//! One serialized tick over the simulation state.
//!
//! Per tick, in order: fetch the ongoing voyages, drift and scan each
//! vessel (the locomotion/emission pair), then run the clustering engine
//! once. A tick with no ongoing voyages short-circuits the per-vessel
//! work and the clustering pass, but still evicts expired hotspots so
//! the TTL guarantee holds while the lake is empty.
//!
//! # Failure isolation
//!
//! An error while processing one vessel is logged and skips only that
//! vessel; the remaining vessels and the clustering pass still run. An
//! error in the clustering pass aborts only that pass. `run_tick` itself
//! never fails -- a tick that went wrong is still a completed tick for
//! scheduling purposes.

use chrono::{DateTime, Duration, Utc};
use fishradar_store::{HotspotStore, ReadingStore, StoreError, VoyageStore};
use fishradar_types::Voyage;
use fishradar_world::LakeBoundary;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::clustering;
use crate::motion;
use crate::sonar;

/// Radar model parameters threaded through the tick cycle.
///
/// Built from the validated configuration via
/// [`RadarConfig::params`](crate::config::RadarConfig::params).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarParams {
    /// Degrees of drift per tick; offsets are uniform in `[-step/2, +step/2]`.
    pub movement_step: f64,
    /// Chance per vessel per tick of a sonar contact, in `[0, 1]`.
    pub detection_probability: f64,
    /// Degrees of jitter applied to a contact around the vessel.
    pub detection_jitter: f64,
    /// Readings within this distance chain into one hotspot group.
    pub cluster_eps: f64,
    /// Only readings newer than this feed clustering.
    pub reading_window: Duration,
    /// Hotspots older than this are evicted.
    pub hotspot_ttl: Duration,
}

/// The mutable simulation state the tick cycle owns exclusively.
///
/// Bundling the stores, boundary, parameters, and RNG into one value
/// keeps the engine instantiable many times over -- every test builds
/// its own state with its own seed.
#[derive(Debug)]
pub struct SimulationState {
    /// Number of completed ticks.
    pub tick: u64,
    /// Active rentals and their live positions.
    pub voyages: VoyageStore,
    /// The append-only sonar detection log.
    pub readings: ReadingStore,
    /// Current hotspot rows.
    pub hotspots: HotspotStore,
    /// The lake boundary and dock.
    pub boundary: LakeBoundary,
    /// Radar model parameters.
    pub params: RadarParams,
    /// Seeded random source for motion, detection, and synthetic attributes.
    pub rng: SmallRng,
}

impl SimulationState {
    /// Create a fresh state with empty stores and a seeded RNG.
    pub fn new(boundary: LakeBoundary, params: RadarParams, seed: u64) -> Self {
        Self {
            tick: 0,
            voyages: VoyageStore::new(),
            readings: ReadingStore::new(),
            hotspots: HotspotStore::new(),
            boundary,
            params,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed (1-based).
    pub tick: u64,
    /// The timestamp stamped onto readings and hotspots this tick.
    pub timestamp: DateTime<Utc>,
    /// Vessels whose locomotion/emission pair completed.
    pub vessels_processed: u32,
    /// Vessels skipped because their processing failed.
    pub vessel_errors: u32,
    /// Sonar readings emitted this tick.
    pub readings_emitted: u32,
    /// Fresh hotspot rows inserted by the clustering pass.
    pub hotspots_created: u32,
    /// Hotspot rows evicted for age.
    pub hotspots_evicted: u32,
    /// Whether the clustering pass aborted on a store error.
    pub clustering_failed: bool,
}

/// Execute one complete tick of the simulation.
///
/// `now` is the tick timestamp; the periodic runner passes the wall
/// clock, tests pass fixed times.
pub fn run_tick(state: &mut SimulationState, now: DateTime<Utc>) -> TickSummary {
    state.tick = state.tick.saturating_add(1);
    let tick = state.tick;

    let ongoing = state.voyages.ongoing();
    if ongoing.is_empty() {
        let evicted = clustering::evict_expired(&mut state.hotspots, state.params.hotspot_ttl, now);
        debug!(tick, evicted, "No ongoing voyages, tick short-circuited");
        return TickSummary {
            tick,
            timestamp: now,
            vessels_processed: 0,
            vessel_errors: 0,
            readings_emitted: 0,
            hotspots_created: 0,
            hotspots_evicted: clamp_count(evicted),
            clustering_failed: false,
        };
    }

    let mut vessels_processed: u32 = 0;
    let mut vessel_errors: u32 = 0;
    let mut readings_emitted: u32 = 0;

    for voyage in &ongoing {
        match process_voyage(state, voyage, now) {
            Ok(emitted) => {
                vessels_processed = vessels_processed.saturating_add(1);
                if emitted {
                    readings_emitted = readings_emitted.saturating_add(1);
                }
            }
            Err(error) => {
                warn!(
                    voyage = %voyage.voyage_id,
                    vessel = %voyage.vessel_name,
                    error = %error,
                    "Voyage processing failed, skipping vessel for this tick"
                );
                vessel_errors = vessel_errors.saturating_add(1);
            }
        }
    }

    let params = state.params;
    let (hotspots_created, hotspots_evicted, clustering_failed) = match clustering::refresh_hotspots(
        &state.readings,
        &mut state.hotspots,
        params.cluster_eps,
        params.reading_window,
        params.hotspot_ttl,
        now,
        &mut state.rng,
    ) {
        Ok(outcome) => (
            clamp_count(outcome.hotspots_created),
            clamp_count(outcome.evicted),
            false,
        ),
        Err(error) => {
            warn!(tick, error = %error, "Hotspot refresh failed, pass aborted until next tick");
            (0, 0, true)
        }
    };

    info!(
        tick,
        vessels = vessels_processed,
        readings = readings_emitted,
        hotspots_created,
        hotspots_evicted,
        "Tick completed"
    );

    TickSummary {
        tick,
        timestamp: now,
        vessels_processed,
        vessel_errors,
        readings_emitted,
        hotspots_created,
        hotspots_evicted,
        clustering_failed,
    }
}

/// Run the locomotion/emission pair for one vessel.
///
/// Returns whether a sonar reading was emitted.
///
/// # Errors
///
/// Returns [`StoreError`] if committing the position or appending the
/// reading fails; the caller logs it and moves on to the next vessel.
fn process_voyage(
    state: &mut SimulationState,
    voyage: &Voyage,
    now: DateTime<Utc>,
) -> Result<bool, StoreError> {
    let params = state.params;

    let drift = motion::drift_vessel(
        voyage.position,
        &state.boundary,
        params.movement_step,
        &mut state.rng,
    );
    state.voyages.set_position(voyage.voyage_id, drift.position)?;
    if drift.reflected {
        debug!(
            voyage = %voyage.voyage_id,
            vessel = %voyage.vessel_name,
            "Vessel bounced off the lake boundary"
        );
    }

    if let Some(reading) = sonar::scan_for_fish(
        voyage.voyage_id,
        drift.position,
        params.detection_probability,
        params.detection_jitter,
        now,
        &mut state.rng,
    ) {
        debug!(
            vessel = %voyage.vessel_name,
            strength = reading.signal_strength,
            "Sonar contact"
        );
        state.readings.insert(reading)?;
        return Ok(true);
    }

    Ok(false)
}

/// Clamp a `usize` counter into a `u32` summary field.
fn clamp_count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use fishradar_types::{GeoPoint, VesselId};

    use super::*;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn square_lake() -> LakeBoundary {
        let ring = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(60.0, 0.0),
            GeoPoint::new(60.0, 60.0),
            GeoPoint::new(0.0, 60.0),
        ];
        LakeBoundary::new(ring, GeoPoint::new(29.0, 41.0)).unwrap()
    }

    fn params(detection_probability: f64) -> RadarParams {
        RadarParams {
            movement_step: 0.15,
            detection_probability,
            detection_jitter: 0.000_01,
            cluster_eps: 0.000_2,
            reading_window: Duration::seconds(10),
            hotspot_ttl: Duration::seconds(15),
        }
    }

    fn state_with_fleet(detection_probability: f64, fleet: usize) -> SimulationState {
        let mut state = SimulationState::new(square_lake(), params(detection_probability), 42);
        for i in 0..fleet {
            let voyage = Voyage::new(VesselId::new(), format!("Vessel {i}"), 4);
            state.voyages.begin_voyage(voyage).unwrap();
        }
        state
    }

    #[test]
    fn certain_detection_emits_one_reading_per_voyage() {
        let mut state = state_with_fleet(1.0, 3);
        let summary = run_tick(&mut state, base_time());

        assert_eq!(summary.tick, 1);
        assert_eq!(summary.vessels_processed, 3);
        assert_eq!(summary.vessel_errors, 0);
        assert_eq!(summary.readings_emitted, 3);
        assert_eq!(state.readings.reading_count(), 3);
    }

    #[test]
    fn every_vessel_ends_the_tick_inside_the_lake() {
        let mut state = state_with_fleet(1.0, 5);
        for i in 0..20_i64 {
            run_tick(&mut state, base_time() + Duration::seconds(i * 5));
        }
        for voyage in state.voyages.ongoing() {
            let position = voyage.position.unwrap();
            assert!(state.boundary.contains(position));
        }
    }

    #[test]
    fn first_tick_places_vessels_near_the_dock() {
        let mut state = state_with_fleet(0.0, 1);
        run_tick(&mut state, base_time());
        let voyage = state.voyages.ongoing().into_iter().next().unwrap();
        let position = voyage.position.unwrap();
        let dock = state.boundary.dock();
        assert!((position.lon - dock.lon).abs() <= 0.075);
        assert!((position.lat - dock.lat).abs() <= 0.075);
    }

    #[test]
    fn empty_lake_tick_only_evicts() {
        let mut state = state_with_fleet(1.0, 0);
        let now = base_time();

        // Plant one stale and one fresh hotspot by hand.
        let mut rng = SmallRng::seed_from_u64(7);
        let stale = crate::clustering::aggregate_group(
            &[sonar::scan_for_fish(
                fishradar_types::VoyageId::new(),
                GeoPoint::new(29.0, 41.0),
                1.0,
                0.0,
                now - Duration::seconds(30),
                &mut rng,
            )
            .unwrap()],
            now - Duration::seconds(30),
            &mut rng,
        )
        .unwrap();
        let fresh = crate::clustering::aggregate_group(
            &[sonar::scan_for_fish(
                fishradar_types::VoyageId::new(),
                GeoPoint::new(29.0, 41.0),
                1.0,
                0.0,
                now - Duration::seconds(2),
                &mut rng,
            )
            .unwrap()],
            now - Duration::seconds(2),
            &mut rng,
        )
        .unwrap();
        state.hotspots.insert(stale.clone()).unwrap();
        state.hotspots.insert(fresh.clone()).unwrap();

        let readings_before = state.readings.reading_count();
        let summary = run_tick(&mut state, now);

        assert_eq!(summary.vessels_processed, 0);
        assert_eq!(summary.readings_emitted, 0);
        assert_eq!(summary.hotspots_created, 0);
        assert_eq!(summary.hotspots_evicted, 1);
        assert_eq!(state.readings.reading_count(), readings_before);
        assert!(state.hotspots.get(stale.hotspot_id).is_none());
        assert!(state.hotspots.get(fresh.hotspot_id).is_some());
    }

    #[test]
    fn readings_cluster_into_hotspots_within_the_same_tick() {
        let mut state = state_with_fleet(1.0, 2);
        let summary = run_tick(&mut state, base_time());
        // Two readings always yield at least one group.
        assert!(summary.hotspots_created >= 1);
        assert_eq!(
            state.hotspots.hotspot_count(),
            usize::try_from(summary.hotspots_created).unwrap()
        );
    }

    #[test]
    fn hotspots_expire_after_the_ttl() {
        let mut state = state_with_fleet(1.0, 2);
        let start = base_time();
        run_tick(&mut state, start);
        assert!(!state.hotspots.is_empty());

        // End the voyages so later ticks only evict.
        for voyage in state.voyages.ongoing() {
            state.voyages.end_voyage(voyage.voyage_id).unwrap();
        }
        run_tick(&mut state, start + Duration::seconds(20));
        assert!(state.hotspots.is_empty());
    }

    #[test]
    fn failed_voyage_does_not_stop_the_rest() {
        let mut state = state_with_fleet(1.0, 2);

        // A voyage that exists in the tick's fetched list but not in the
        // store models a per-vessel store failure mid-tick.
        let ghost = Voyage::new(VesselId::new(), "Ghost", 2);
        let result = process_voyage(&mut state, &ghost, base_time());
        assert!(matches!(result, Err(StoreError::VoyageNotFound(_))));

        // The other vessels still process normally afterwards.
        let summary = run_tick(&mut state, base_time());
        assert_eq!(summary.vessels_processed, 2);
        assert_eq!(summary.vessel_errors, 0);
    }

    #[test]
    fn tick_counter_advances_monotonically() {
        let mut state = state_with_fleet(0.0, 1);
        for expected in 1..=5 {
            let summary = run_tick(&mut state, base_time());
            assert_eq!(summary.tick, expected);
        }
    }
}
