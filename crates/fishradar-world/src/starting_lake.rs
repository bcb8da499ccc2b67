//! The canned default lake used when no boundary is configured.
//!
//! An irregular octagon roughly 1.4 degrees across, centered on the
//! dock at (29.0, 41.0).

use fishradar_types::GeoPoint;

use crate::boundary::LakeBoundary;
use crate::error::WorldError;

/// Dock coordinate voyages start from when they have no position yet.
pub const DEFAULT_DOCK: GeoPoint = GeoPoint::new(29.0, 41.0);

/// The default boundary vertex ring.
pub fn default_ring() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(28.30, 41.00),
        GeoPoint::new(28.55, 41.45),
        GeoPoint::new(29.00, 41.62),
        GeoPoint::new(29.45, 41.48),
        GeoPoint::new(29.72, 41.05),
        GeoPoint::new(29.50, 40.55),
        GeoPoint::new(29.02, 40.38),
        GeoPoint::new(28.52, 40.52),
    ]
}

/// Build the default lake boundary.
///
/// # Errors
///
/// Returns [`WorldError`] only if the built-in ring were invalid, which
/// construction-time tests rule out.
pub fn default_lake() -> Result<LakeBoundary, WorldError> {
    LakeBoundary::new(default_ring(), DEFAULT_DOCK)
}
