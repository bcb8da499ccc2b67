//! Error types for the `fishradar-world` crate.

/// Errors that can occur while constructing lake geometry.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The boundary ring has fewer than three vertices.
    #[error("boundary ring needs at least 3 vertices, got {vertex_count}")]
    DegenerateBoundary {
        /// Number of vertices supplied.
        vertex_count: usize,
    },

    /// A boundary vertex has a NaN or infinite coordinate.
    #[error("boundary vertex {index} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Index of the offending vertex in the ring.
        index: usize,
    },

    /// The dock coordinate does not lie inside the boundary ring.
    #[error("dock ({lon}, {lat}) lies outside the boundary ring")]
    DockOutsideBoundary {
        /// Dock longitude.
        lon: f64,
        /// Dock latitude.
        lat: f64,
    },
}
