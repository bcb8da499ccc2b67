//! Hotspot eviction and single-linkage clustering of recent readings.
//!
//! Once per tick, in order:
//!
//! 1. Evict every hotspot whose `last_seen` aged past the TTL (the fish
//!    moved on).
//! 2. Select the sonar readings detected within the (shorter) reading
//!    window.
//! 3. Group the selected readings by single-linkage connectivity: two
//!    readings share a group if a chain of readings connects them with
//!    every hop within `eps`. A reading with no neighbor forms its own
//!    singleton group. Implemented as union-find over the pairwise
//!    distances, which produces the same grouping as density clustering
//!    with `min_points = 1`.
//! 4. Aggregate each group into one fresh hotspot row: centroid position,
//!    `ceil(mean(signal_strength) / 10)` intensity, a random species from
//!    the catalog, and a random depth in `[2.0, 22.0]` meters.
//! 5. Insert the new rows. Existing rows are never merged or refreshed;
//!    they expire on their own clock, which is what lets hotspots fade.
//!
//! Because the reading window spans several ticks, one physical cluster
//! keeps spawning overlapping rows for as long as it is fed -- that
//! trailing overlap is intentional.

use chrono::{DateTime, Duration, Utc};
use fishradar_store::{HotspotStore, ReadingStore, StoreError};
use fishradar_types::{GeoPoint, Hotspot, HotspotId, SonarReading, Species};
use fishradar_world::geometry;
use rand::Rng;
use tracing::debug;

/// Counters from one clustering pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClusterOutcome {
    /// Hotspot rows evicted for age.
    pub evicted: usize,
    /// Readings that fell inside the selection window.
    pub readings_in_window: usize,
    /// Fresh hotspot rows inserted.
    pub hotspots_created: usize,
}

/// Evict every hotspot whose `last_seen` is older than the TTL.
///
/// Split out from [`refresh_hotspots`] because eviction still runs on
/// ticks that short-circuit with no ongoing voyages.
pub fn evict_expired(
    hotspots: &mut HotspotStore,
    hotspot_ttl: Duration,
    now: DateTime<Utc>,
) -> usize {
    hotspots.evict_older_than(now - hotspot_ttl)
}

/// Run the full eviction-and-clustering pass for one tick.
///
/// # Errors
///
/// Returns [`StoreError`] if inserting an aggregated hotspot fails. The
/// caller treats that as aborting this tick's pass only; the next tick
/// clusters from scratch.
pub fn refresh_hotspots(
    readings: &ReadingStore,
    hotspots: &mut HotspotStore,
    eps: f64,
    reading_window: Duration,
    hotspot_ttl: Duration,
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Result<ClusterOutcome, StoreError> {
    let evicted = evict_expired(hotspots, hotspot_ttl, now);

    let window = readings.readings_since(now - reading_window);
    let groups = cluster_by_distance(&window, eps);

    let mut created: usize = 0;
    for group in &groups {
        let Some(hotspot) = aggregate_group(group, now, rng) else {
            continue;
        };
        hotspots.insert(hotspot)?;
        created = created.saturating_add(1);
    }

    debug!(
        evicted,
        readings = window.len(),
        groups = groups.len(),
        created,
        "Hotspot refresh pass finished"
    );

    Ok(ClusterOutcome {
        evicted,
        readings_in_window: window.len(),
        hotspots_created: created,
    })
}

/// Group readings by single-linkage connectivity at threshold `eps`.
///
/// Every input reading lands in exactly one group; groups are never
/// empty. The pairwise sweep is quadratic, which is comfortably cheap for
/// the handful of readings a reading window holds.
pub fn cluster_by_distance(readings: &[SonarReading], eps: f64) -> Vec<Vec<SonarReading>> {
    if readings.is_empty() {
        return Vec::new();
    }

    let mut sets = UnionFind::new(readings.len());
    for (i, a) in readings.iter().enumerate() {
        for (j, b) in readings.iter().enumerate().skip(i.saturating_add(1)) {
            if geometry::distance(a.position, b.position) <= eps {
                sets.union(i, j);
            }
        }
    }

    let mut groups: std::collections::BTreeMap<usize, Vec<SonarReading>> =
        std::collections::BTreeMap::new();
    for (i, reading) in readings.iter().enumerate() {
        groups.entry(sets.find(i)).or_default().push(reading.clone());
    }
    groups.into_values().collect()
}

/// Aggregate one reading group into a fresh hotspot row.
///
/// Returns `None` for an empty group; hotspots are never produced from
/// zero readings.
pub fn aggregate_group(
    members: &[SonarReading],
    now: DateTime<Utc>,
    rng: &mut impl Rng,
) -> Option<Hotspot> {
    let positions: Vec<GeoPoint> = members.iter().map(|r| r.position).collect();
    let position = geometry::centroid(&positions)?;

    // ceil(mean / 10) computed exactly on integers: ceil(total / (10 * n)).
    let total: u64 = members
        .iter()
        .map(|r| u64::from(r.signal_strength))
        .fold(0, u64::saturating_add);
    let denominator = u64::try_from(members.len()).ok()?.saturating_mul(10).max(1);
    let intensity = u32::try_from(total.div_ceil(denominator)).unwrap_or(u32::MAX);

    Some(Hotspot {
        hotspot_id: HotspotId::new(),
        species: random_species(rng),
        intensity,
        depth: random_depth(rng),
        position,
        last_seen: now,
    })
}

/// Draw a random species from the catalog.
fn random_species(rng: &mut impl Rng) -> Species {
    let index = rng.random_range(0..Species::ALL.len());
    Species::ALL.get(index).copied().unwrap_or(Species::Perch)
}

/// Draw a random depth in `[2.0, 22.0]` meters, one decimal place.
fn random_depth(rng: &mut impl Rng) -> f64 {
    let raw = rng.random::<f64>() * 20.0 + 2.0;
    (raw * 10.0).round() / 10.0
}

/// Disjoint-set forest over reading indices.
#[derive(Debug)]
struct UnionFind {
    /// Parent index per element; a root points at itself.
    parent: Vec<usize>,
}

impl UnionFind {
    /// Create `len` singleton sets.
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    /// Find the root of `x`, compressing the path along the way.
    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while let Some(&parent) = self.parent.get(root) {
            if parent == root {
                break;
            }
            root = parent;
        }
        let mut current = x;
        while current != root {
            let next = self.parent.get(current).copied().unwrap_or(root);
            if let Some(slot) = self.parent.get_mut(current) {
                *slot = root;
            }
            current = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`.
    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a != root_b {
            if let Some(slot) = self.parent.get_mut(root_b) {
                *slot = root_a;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use chrono::TimeZone;
    use fishradar_types::{ReadingId, VoyageId};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn reading(lon: f64, lat: f64, strength: u32, detected_at: DateTime<Utc>) -> SonarReading {
        SonarReading {
            reading_id: ReadingId::new(),
            voyage_id: VoyageId::new(),
            position: GeoPoint::new(lon, lat),
            signal_strength: strength,
            detected_at,
        }
    }

    #[test]
    fn chained_neighbors_form_one_group_and_loners_stand_alone() {
        let now = base_time();
        let readings = vec![
            reading(0.0, 0.0, 50, now),
            reading(0.0, 0.0001, 60, now),
            reading(5.0, 5.0, 70, now),
        ];
        let groups = cluster_by_distance(&readings, 0.0002);
        assert_eq!(groups.len(), 2);

        let sizes: Vec<usize> = {
            let mut s: Vec<usize> = groups.iter().map(Vec::len).collect();
            s.sort_unstable();
            s
        };
        assert_eq!(sizes, vec![1, 2]);

        let pair = groups.iter().find(|g| g.len() == 2).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let hotspot = aggregate_group(pair, now, &mut rng).unwrap();
        assert!((hotspot.position.lon - 0.0).abs() < 1e-12);
        assert!((hotspot.position.lat - 0.00005).abs() < 1e-12);
    }

    #[test]
    fn transitive_chains_link_across_eps() {
        // a-b and b-c are within eps, a-c is not: still one group.
        let now = base_time();
        let readings = vec![
            reading(0.0, 0.0, 10, now),
            reading(0.00015, 0.0, 20, now),
            reading(0.0003, 0.0, 30, now),
        ];
        let groups = cluster_by_distance(&readings, 0.0002);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.first().map(Vec::len), Some(3));
    }

    #[test]
    fn intensity_is_ceil_of_mean_over_ten() {
        let now = base_time();
        let mut rng = SmallRng::seed_from_u64(42);

        let single = vec![reading(0.0, 0.0, 55, now)];
        let hotspot = aggregate_group(&single, now, &mut rng).unwrap();
        assert_eq!(hotspot.intensity, 6);

        let pair = vec![reading(0.0, 0.0, 50, now), reading(0.0, 0.0, 51, now)];
        let hotspot = aggregate_group(&pair, now, &mut rng).unwrap();
        // mean 50.5 -> 5.05 -> ceil 6
        assert_eq!(hotspot.intensity, 6);

        let exact = vec![reading(0.0, 0.0, 40, now), reading(0.0, 0.0, 60, now)];
        let hotspot = aggregate_group(&exact, now, &mut rng).unwrap();
        // mean 50 -> exactly 5
        assert_eq!(hotspot.intensity, 5);
    }

    #[test]
    fn empty_group_aggregates_to_nothing() {
        let mut rng = SmallRng::seed_from_u64(42);
        assert!(aggregate_group(&[], base_time(), &mut rng).is_none());
    }

    #[test]
    fn synthetic_attributes_stay_in_their_ranges() {
        let now = base_time();
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..200 {
            let hotspot = aggregate_group(&[reading(0.0, 0.0, 80, now)], now, &mut rng).unwrap();
            assert!(hotspot.depth >= 2.0 && hotspot.depth <= 22.0);
            // One decimal place.
            assert_eq!((hotspot.depth * 10.0).round() / 10.0, hotspot.depth);
            assert!(Species::ALL.contains(&hotspot.species));
            assert_eq!(hotspot.last_seen, now);
        }
    }

    #[test]
    fn refresh_evicts_stale_rows_and_inserts_fresh_ones() {
        let now = base_time();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut readings = ReadingStore::new();
        let mut hotspots = HotspotStore::new();

        // A hotspot 20 seconds old with a 15 second TTL.
        let stale = aggregate_group(
            &[reading(1.0, 1.0, 50, now - Duration::seconds(20))],
            now - Duration::seconds(20),
            &mut rng,
        )
        .unwrap();
        hotspots.insert(stale.clone()).unwrap();

        // Two fresh readings close together, one far away.
        readings.insert(reading(0.0, 0.0, 50, now)).unwrap();
        readings.insert(reading(0.0, 0.0001, 60, now)).unwrap();
        readings.insert(reading(5.0, 5.0, 70, now)).unwrap();
        // A reading outside the window must not participate.
        readings
            .insert(reading(0.0, 0.0, 99, now - Duration::seconds(30)))
            .unwrap();

        let outcome = refresh_hotspots(
            &readings,
            &mut hotspots,
            0.0002,
            Duration::seconds(10),
            Duration::seconds(15),
            now,
            &mut rng,
        )
        .unwrap();

        assert_eq!(outcome.evicted, 1);
        assert_eq!(outcome.readings_in_window, 3);
        assert_eq!(outcome.hotspots_created, 2);
        assert!(hotspots.get(stale.hotspot_id).is_none());
        assert_eq!(hotspots.hotspot_count(), 2);
    }

    #[test]
    fn repeated_passes_pile_up_overlapping_rows() {
        // The same physical cluster spawns a new row every pass while its
        // readings stay inside the window -- the fading-trail behaviour.
        let now = base_time();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut readings = ReadingStore::new();
        let mut hotspots = HotspotStore::new();
        readings.insert(reading(0.0, 0.0, 50, now)).unwrap();

        for pass in 0..3_i64 {
            refresh_hotspots(
                &readings,
                &mut hotspots,
                0.0002,
                Duration::seconds(10),
                Duration::seconds(15),
                now + Duration::seconds(pass),
                &mut rng,
            )
            .unwrap();
        }
        assert_eq!(hotspots.hotspot_count(), 3);
    }

    #[test]
    fn empty_window_creates_no_hotspots() {
        let now = base_time();
        let mut rng = SmallRng::seed_from_u64(42);
        let readings = ReadingStore::new();
        let mut hotspots = HotspotStore::new();

        let outcome = refresh_hotspots(
            &readings,
            &mut hotspots,
            0.0002,
            Duration::seconds(10),
            Duration::seconds(15),
            now,
            &mut rng,
        )
        .unwrap();

        assert_eq!(outcome.hotspots_created, 0);
        assert!(hotspots.is_empty());
    }
}
