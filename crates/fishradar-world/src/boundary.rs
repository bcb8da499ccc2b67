//! The lake boundary polygon and dock coordinate.

use fishradar_types::GeoPoint;

use crate::error::WorldError;
use crate::geometry;

/// A validated lake boundary: an ordered vertex ring plus the dock where
/// position-less voyages are placed on their first tick.
///
/// Construction guarantees the ring has at least three finite vertices
/// and that the dock lies inside it, so every committed vessel position
/// can be traced back to a point that satisfied [`LakeBoundary::contains`].
#[derive(Debug, Clone, PartialEq)]
pub struct LakeBoundary {
    /// Ordered ring of vertices; implicitly closed.
    ring: Vec<GeoPoint>,
    /// Starting coordinate for voyages without a position.
    dock: GeoPoint,
}

impl LakeBoundary {
    /// Build a boundary from an ordered vertex ring and a dock coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DegenerateBoundary`] for rings with fewer than
    /// three vertices, [`WorldError::NonFiniteVertex`] if any coordinate is
    /// NaN or infinite, and [`WorldError::DockOutsideBoundary`] if the dock
    /// is not inside the ring.
    pub fn new(ring: Vec<GeoPoint>, dock: GeoPoint) -> Result<Self, WorldError> {
        if ring.len() < 3 {
            return Err(WorldError::DegenerateBoundary {
                vertex_count: ring.len(),
            });
        }
        for (index, vertex) in ring.iter().enumerate() {
            if !vertex.lon.is_finite() || !vertex.lat.is_finite() {
                return Err(WorldError::NonFiniteVertex { index });
            }
        }
        if !geometry::point_in_ring(dock, &ring) {
            return Err(WorldError::DockOutsideBoundary {
                lon: dock.lon,
                lat: dock.lat,
            });
        }
        Ok(Self { ring, dock })
    }

    /// Whether a point lies inside the lake (boundary inclusive).
    pub fn contains(&self, point: GeoPoint) -> bool {
        geometry::point_in_ring(point, &self.ring)
    }

    /// The dock coordinate.
    pub const fn dock(&self) -> GeoPoint {
        self.dock
    }

    /// The boundary vertex ring.
    pub fn ring(&self) -> &[GeoPoint] {
        &self.ring
    }

    /// Number of vertices in the ring.
    pub fn vertex_count(&self) -> usize {
        self.ring.len()
    }
}
