//! The hotspot store: decaying aggregates with age-based eviction.
//!
//! Clustering inserts fresh rows every tick and never updates existing
//! ones; a row lives until its `last_seen` ages past the TTL and
//! [`HotspotStore::evict_older_than`] removes it. Overlapping rows for
//! one physical cluster are expected -- they are what makes hotspots fade
//! instead of blink out.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fishradar_types::{Hotspot, HotspotId};

use crate::error::StoreError;

/// All current hotspot rows indexed by their identifier.
#[derive(Debug, Clone, Default)]
pub struct HotspotStore {
    /// Hotspot rows keyed by ID.
    hotspots: BTreeMap<HotspotId, Hotspot>,
}

impl HotspotStore {
    /// Create an empty hotspot store.
    pub const fn new() -> Self {
        Self {
            hotspots: BTreeMap::new(),
        }
    }

    /// Insert a freshly clustered hotspot row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateHotspot`] if a row with the same ID
    /// already exists.
    pub fn insert(&mut self, hotspot: Hotspot) -> Result<(), StoreError> {
        let id = hotspot.hotspot_id;
        if self.hotspots.contains_key(&id) {
            return Err(StoreError::DuplicateHotspot(id));
        }
        self.hotspots.insert(id, hotspot);
        Ok(())
    }

    /// Get a hotspot by ID.
    pub fn get(&self, id: HotspotId) -> Option<&Hotspot> {
        self.hotspots.get(&id)
    }

    /// Delete a hotspot row explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::HotspotNotFound`] if the row does not exist.
    pub fn remove(&mut self, id: HotspotId) -> Result<Hotspot, StoreError> {
        self.hotspots
            .remove(&id)
            .ok_or(StoreError::HotspotNotFound(id))
    }

    /// Delete every row whose `last_seen` is strictly before `cutoff`.
    ///
    /// Returns the number of rows evicted.
    pub fn evict_older_than(&mut self, cutoff: DateTime<Utc>) -> usize {
        let before = self.hotspots.len();
        self.hotspots.retain(|_, hotspot| hotspot.last_seen >= cutoff);
        before.saturating_sub(self.hotspots.len())
    }

    /// All current rows, newest first (the order the map feed expects).
    pub fn all(&self) -> Vec<Hotspot> {
        let mut rows: Vec<Hotspot> = self.hotspots.values().cloned().collect();
        rows.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
        rows
    }

    /// Number of current rows.
    pub fn hotspot_count(&self) -> usize {
        self.hotspots.len()
    }

    /// Whether the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }
}
