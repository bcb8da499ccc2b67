//! Error types for the `fishradar-store` crate.

use fishradar_types::{HotspotId, VoyageId};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A voyage with the same ID already exists.
    #[error("duplicate voyage id: {0}")]
    DuplicateVoyage(VoyageId),

    /// The voyage does not exist in the store.
    #[error("voyage not found: {0}")]
    VoyageNotFound(VoyageId),

    /// The voyage exists but has already ended.
    #[error("voyage {0} has already ended")]
    VoyageEnded(VoyageId),

    /// A reading carried a signal strength outside the valid range.
    #[error("signal strength {value} outside the valid range 1..=100")]
    SignalStrengthOutOfRange {
        /// The rejected strength value.
        value: u32,
    },

    /// A hotspot with the same ID already exists.
    #[error("duplicate hotspot id: {0}")]
    DuplicateHotspot(HotspotId),

    /// The hotspot does not exist in the store.
    #[error("hotspot not found: {0}")]
    HotspotNotFound(HotspotId),
}
