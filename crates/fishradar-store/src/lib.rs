//! In-memory stores for the three radar relations.
//!
//! The rows live in process memory inside the simulation state, which
//! keeps the engine instantiable many times over for tests. All mutation
//! happens from the single tick task, so the stores need no internal
//! locking -- read consistency for concurrent queriers comes from the
//! post-tick snapshot the runner publishes.
//!
//! # Modules
//!
//! - [`voyages`] -- active rentals and their live positions
//! - [`readings`] -- the append-only sonar detection log
//! - [`hotspots`] -- decaying hotspot aggregates with age-based eviction

pub mod error;
pub mod hotspots;
pub mod readings;
pub mod voyages;

pub use error::StoreError;
pub use hotspots::HotspotStore;
pub use readings::ReadingStore;
pub use voyages::VoyageStore;
