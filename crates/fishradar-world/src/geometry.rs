//! Pure point and ring math over lon/lat degrees.
//!
//! The boundary test is the classic ray-casting (even-odd) algorithm over
//! a simple, possibly non-convex polygon given as an ordered vertex ring.
//! The ring is implicitly closed: the segment from the last vertex back to
//! the first is part of the boundary. Points lying exactly on an edge
//! count as inside, so a vessel drifting onto the shoreline is not
//! rejected.

use fishradar_types::GeoPoint;

/// Tolerance for the collinearity test in [`point_on_ring_edge`].
const EDGE_EPSILON: f64 = 1e-12;

/// Planar Euclidean distance between two points, in degrees.
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    (a.lon - b.lon).hypot(a.lat - b.lat)
}

/// Arithmetic mean position of a set of points.
///
/// Returns `None` for an empty slice; aggregates are never produced from
/// zero members.
pub fn centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }
    let mut lon_sum = 0.0;
    let mut lat_sum = 0.0;
    for point in points {
        lon_sum += point.lon;
        lat_sum += point.lat;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = points.len() as f64;
    Some(GeoPoint::new(lon_sum / count, lat_sum / count))
}

/// Ray-casting point-in-polygon test, inclusive of the boundary.
///
/// Returns `false` for degenerate rings (fewer than three vertices).
pub fn point_in_ring(point: GeoPoint, ring: &[GeoPoint]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    if point_on_ring_edge(point, ring) {
        return true;
    }

    // Even-odd rule: count crossings of a horizontal ray to the east.
    let Some(&last) = ring.last() else {
        return false;
    };
    let mut inside = false;
    let mut prev = last;
    for &vertex in ring {
        let straddles = (vertex.lat > point.lat) != (prev.lat > point.lat);
        if straddles {
            // Longitude where the edge crosses the ray's latitude. The
            // denominator cannot be zero when the edge straddles the ray.
            let t = (point.lat - vertex.lat) / (prev.lat - vertex.lat);
            let crossing_lon = vertex.lon + t * (prev.lon - vertex.lon);
            if point.lon < crossing_lon {
                inside = !inside;
            }
        }
        prev = vertex;
    }
    inside
}

/// Whether the point lies on any edge of the (implicitly closed) ring.
fn point_on_ring_edge(point: GeoPoint, ring: &[GeoPoint]) -> bool {
    let Some(&last) = ring.last() else {
        return false;
    };
    let mut prev = last;
    for &vertex in ring {
        if point_on_segment(point, prev, vertex) {
            return true;
        }
        prev = vertex;
    }
    false
}

/// Whether `p` lies on the segment from `a` to `b`.
fn point_on_segment(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> bool {
    let cross = (b.lon - a.lon) * (p.lat - a.lat) - (b.lat - a.lat) * (p.lon - a.lon);
    if cross.abs() > EDGE_EPSILON {
        return false;
    }
    let within_lon = p.lon >= a.lon.min(b.lon) - EDGE_EPSILON
        && p.lon <= a.lon.max(b.lon) + EDGE_EPSILON;
    let within_lat = p.lat >= a.lat.min(b.lat) - EDGE_EPSILON
        && p.lat <= a.lat.max(b.lat) + EDGE_EPSILON;
    within_lon && within_lat
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 1.0),
        ]
    }

    /// A square with a rectangular notch cut into its right side.
    fn notched_square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(4.0, 0.0),
            GeoPoint::new(4.0, 1.5),
            GeoPoint::new(2.0, 1.5),
            GeoPoint::new(2.0, 2.5),
            GeoPoint::new(4.0, 2.5),
            GeoPoint::new(4.0, 4.0),
            GeoPoint::new(0.0, 4.0),
        ]
    }

    #[test]
    fn distance_is_euclidean() {
        let d = distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn centroid_is_arithmetic_mean() {
        let points = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(2.0, 0.0),
            GeoPoint::new(1.0, 3.0),
        ];
        let c = centroid(&points).unwrap();
        assert!((c.lon - 1.0).abs() < 1e-12);
        assert!((c.lat - 1.0).abs() < 1e-12);
    }

    #[test]
    fn centroid_of_empty_slice_is_none() {
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn square_contains_interior_point() {
        assert!(point_in_ring(GeoPoint::new(0.5, 0.5), &unit_square()));
    }

    #[test]
    fn square_excludes_exterior_point() {
        assert!(!point_in_ring(GeoPoint::new(1.5, 0.5), &unit_square()));
        assert!(!point_in_ring(GeoPoint::new(0.5, -0.1), &unit_square()));
    }

    #[test]
    fn boundary_points_count_as_inside() {
        // Edge midpoint and a vertex.
        assert!(point_in_ring(GeoPoint::new(0.5, 0.0), &unit_square()));
        assert!(point_in_ring(GeoPoint::new(1.0, 1.0), &unit_square()));
    }

    #[test]
    fn notch_of_concave_ring_is_outside() {
        let ring = notched_square();
        // Inside the notch cavity.
        assert!(!point_in_ring(GeoPoint::new(3.0, 2.0), &ring));
        // Solid parts on either side of the notch.
        assert!(point_in_ring(GeoPoint::new(3.0, 0.5), &ring));
        assert!(point_in_ring(GeoPoint::new(3.0, 3.5), &ring));
        assert!(point_in_ring(GeoPoint::new(1.0, 2.0), &ring));
    }

    #[test]
    fn degenerate_ring_contains_nothing() {
        let two = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        assert!(!point_in_ring(GeoPoint::new(0.5, 0.5), &two));
        assert!(!point_in_ring(GeoPoint::new(0.5, 0.5), &[]));
    }
}
