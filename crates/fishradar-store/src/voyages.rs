//! The voyage store: active rentals and their live positions.
//!
//! The rental collaborator owns the voyage lifecycle through
//! [`VoyageStore::begin_voyage`] and [`VoyageStore::end_voyage`]; the tick
//! cycle reads [`VoyageStore::ongoing`] and writes positions through
//! [`VoyageStore::set_position`].

use std::collections::BTreeMap;

use fishradar_types::{GeoPoint, Voyage, VoyageId, VoyageStatus};

use crate::error::StoreError;

/// All voyages indexed by their identifier.
#[derive(Debug, Clone, Default)]
pub struct VoyageStore {
    /// Voyage rows keyed by ID.
    voyages: BTreeMap<VoyageId, Voyage>,
}

impl VoyageStore {
    /// Create an empty voyage store.
    pub const fn new() -> Self {
        Self {
            voyages: BTreeMap::new(),
        }
    }

    /// Register a new voyage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateVoyage`] if a voyage with the same
    /// ID already exists.
    pub fn begin_voyage(&mut self, voyage: Voyage) -> Result<VoyageId, StoreError> {
        let id = voyage.voyage_id;
        if self.voyages.contains_key(&id) {
            return Err(StoreError::DuplicateVoyage(id));
        }
        self.voyages.insert(id, voyage);
        Ok(id)
    }

    /// Mark a voyage as ended. Its last position is kept for the record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::VoyageNotFound`] if the voyage does not exist,
    /// or [`StoreError::VoyageEnded`] if it has already ended.
    pub fn end_voyage(&mut self, id: VoyageId) -> Result<(), StoreError> {
        let voyage = self
            .voyages
            .get_mut(&id)
            .ok_or(StoreError::VoyageNotFound(id))?;
        if voyage.status == VoyageStatus::Ended {
            return Err(StoreError::VoyageEnded(id));
        }
        voyage.status = VoyageStatus::Ended;
        Ok(())
    }

    /// Get a voyage by ID.
    pub fn get(&self, id: VoyageId) -> Option<&Voyage> {
        self.voyages.get(&id)
    }

    /// All ongoing voyages, cloned out so the caller can iterate while
    /// mutating the store.
    pub fn ongoing(&self) -> Vec<Voyage> {
        self.voyages
            .values()
            .filter(|voyage| voyage.status.is_ongoing())
            .cloned()
            .collect()
    }

    /// Commit a new position for an ongoing voyage.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::VoyageNotFound`] if the voyage does not exist,
    /// or [`StoreError::VoyageEnded`] if it is no longer ongoing.
    pub fn set_position(&mut self, id: VoyageId, position: GeoPoint) -> Result<(), StoreError> {
        let voyage = self
            .voyages
            .get_mut(&id)
            .ok_or(StoreError::VoyageNotFound(id))?;
        if voyage.status == VoyageStatus::Ended {
            return Err(StoreError::VoyageEnded(id));
        }
        voyage.position = Some(position);
        Ok(())
    }

    /// Total number of voyages, ended ones included.
    pub fn voyage_count(&self) -> usize {
        self.voyages.len()
    }
}
