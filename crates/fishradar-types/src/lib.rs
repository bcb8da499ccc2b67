//! Shared type definitions for the Fishradar simulation.
//!
//! This crate is the single source of truth for the entities the radar
//! core moves through its tick cycle: voyages, sonar readings, and fish
//! hotspots, plus the GeoJSON-style feed types the read models render.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Enumeration types (voyage lifecycle, fish species)
//! - [`structs`] -- Core entity structs (voyages, readings, hotspots)
//! - [`feed`] -- Geographic feature types served to external consumers

pub mod enums;
pub mod feed;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Species, VoyageStatus};
pub use feed::{Feature, FeatureCollection, HotspotProperties, PointGeometry, VesselProperties};
pub use ids::{HotspotId, ReadingId, VesselId, VoyageId};
pub use structs::{GeoPoint, Hotspot, SonarReading, Voyage};
