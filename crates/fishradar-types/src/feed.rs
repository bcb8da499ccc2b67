//! Geographic feature types served to external consumers.
//!
//! The radar core publishes two read models -- vessel positions and
//! current hotspots -- as GeoJSON-shaped feature collections. Each
//! feature carries a point geometry with `[lon, lat]` coordinates and a
//! typed properties payload, so a geographic point is always recoverable
//! losslessly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::VoyageStatus;
use crate::ids::{HotspotId, VesselId, VoyageId};
use crate::structs::GeoPoint;

/// A GeoJSON point geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    /// Always `"Point"`.
    #[serde(rename = "type")]
    pub geometry_type: String,
    /// `[lon, lat]` in degrees.
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    /// Recover the geographic point carried by this geometry.
    pub const fn as_point(&self) -> GeoPoint {
        let [lon, lat] = self.coordinates;
        GeoPoint::new(lon, lat)
    }
}

impl From<GeoPoint> for PointGeometry {
    fn from(point: GeoPoint) -> Self {
        Self {
            geometry_type: "Point".to_owned(),
            coordinates: [point.lon, point.lat],
        }
    }
}

/// One feature in a collection: a point geometry plus typed properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature<P> {
    /// Always `"Feature"`.
    #[serde(rename = "type")]
    pub feature_type: String,
    /// Attributes attached to the feature.
    pub properties: P,
    /// The feature's point geometry.
    pub geometry: PointGeometry,
}

impl<P> Feature<P> {
    /// Create a feature at the given position.
    pub fn new(properties: P, position: GeoPoint) -> Self {
        Self {
            feature_type: "Feature".to_owned(),
            properties,
            geometry: position.into(),
        }
    }
}

/// A GeoJSON-shaped collection of features with uniform properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection<P> {
    /// Always `"FeatureCollection"`.
    #[serde(rename = "type")]
    pub collection_type: String,
    /// The contained features.
    pub features: Vec<Feature<P>>,
}

impl<P> FeatureCollection<P> {
    /// Wrap a list of features into a collection.
    pub fn new(features: Vec<Feature<P>>) -> Self {
        Self {
            collection_type: "FeatureCollection".to_owned(),
            features,
        }
    }
}

/// Properties attached to one vessel-position feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselProperties {
    /// The voyage the vessel is out on.
    pub voyage_id: VoyageId,
    /// The vessel itself.
    pub vessel_id: VesselId,
    /// Display name of the vessel.
    pub name: String,
    /// Passenger capacity.
    pub capacity: u32,
    /// Voyage lifecycle status.
    pub status: VoyageStatus,
}

/// Properties attached to one hotspot feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotProperties {
    /// The hotspot row.
    pub id: HotspotId,
    /// Numeric species identifier.
    pub species_id: u32,
    /// Human-readable species name.
    pub species_name: String,
    /// Aggregated signal intensity in `1..=10`.
    pub intensity: u32,
    /// Synthetic depth in meters.
    pub depth: f64,
    /// When the hotspot was last produced by clustering.
    pub last_seen: DateTime<Utc>,
}
