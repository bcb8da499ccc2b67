//! Demo fleet seeding.
//!
//! In production the rental collaborator creates voyages as customers
//! take boats out; the engine binary stands in for it by launching a
//! small demo fleet at startup so the radar has something to simulate.

use fishradar_store::VoyageStore;
use fishradar_types::{VesselId, Voyage, VoyageId};
use rand::Rng;
use tracing::info;

use crate::error::EngineError;

/// Names drawn for demo vessels, lake birds all.
const VESSEL_NAME_POOL: [&str; 16] = [
    "Heron",
    "Kingfisher",
    "Grebe",
    "Osprey",
    "Cormorant",
    "Mallard",
    "Tern",
    "Sandpiper",
    "Pelican",
    "Curlew",
    "Plover",
    "Moorhen",
    "Bittern",
    "Avocet",
    "Wagtail",
    "Dunlin",
];

/// Smallest demo vessel capacity.
const MIN_CAPACITY: u32 = 2;

/// Largest demo vessel capacity.
const MAX_CAPACITY: u32 = 8;

/// Launch `count` demo voyages into the store.
///
/// Vessel names are sampled from the pool without repeats; capacities
/// are drawn uniformly. Returns the launched voyage IDs.
///
/// # Errors
///
/// Returns [`EngineError::Spawner`] if `count` exceeds the name pool or
/// a voyage cannot be registered.
pub fn seed_demo_fleet(
    voyages: &mut VoyageStore,
    count: u32,
    rng: &mut impl Rng,
) -> Result<Vec<VoyageId>, EngineError> {
    let names = pick_unique_names(rng, count)?;

    let mut launched = Vec::with_capacity(names.len());
    for name in names {
        let capacity = rng.random_range(MIN_CAPACITY..=MAX_CAPACITY);
        let voyage = Voyage::new(VesselId::new(), name.clone(), capacity);
        let id = voyages
            .begin_voyage(voyage)
            .map_err(|e| EngineError::Spawner {
                message: format!("failed to register demo voyage for {name}: {e}"),
            })?;

        info!(voyage = %id, vessel = %name, capacity, "Launched demo vessel");
        launched.push(id);
    }

    Ok(launched)
}

/// Pick `count` unique names from the name pool using random sampling.
fn pick_unique_names<R: Rng>(rng: &mut R, count: u32) -> Result<Vec<String>, EngineError> {
    let pool_len = VESSEL_NAME_POOL.len();
    let count_usize = usize::try_from(count).map_err(|_conversion_err| EngineError::Spawner {
        message: format!("fleet size {count} exceeds usize range"),
    })?;

    if count_usize > pool_len {
        return Err(EngineError::Spawner {
            message: format!("requested {count} vessels but the name pool only has {pool_len}"),
        });
    }

    // Fisher-Yates partial shuffle: shuffle the first `count` positions.
    let mut indices: Vec<usize> = (0..pool_len).collect();
    for i in 0..count_usize {
        let j = rng.random_range(i..pool_len);
        indices.swap(i, j);
    }

    let mut names = Vec::with_capacity(count_usize);
    for &index in indices.iter().take(count_usize) {
        let name = VESSEL_NAME_POOL
            .get(index)
            .map(|s| String::from(*s))
            .ok_or_else(|| EngineError::Spawner {
                message: format!("name pool index {index} out of bounds"),
            })?;
        names.push(name);
    }

    Ok(names)
}
