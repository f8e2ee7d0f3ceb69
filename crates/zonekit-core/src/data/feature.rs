//! GeoJSON-like zone records, as served by `GET /api/polygons/geojson`.
//!
//! ```json
//! {
//!   "type": "FeatureCollection",
//!   "features": [{
//!     "type": "Feature",
//!     "id": "6c1a...",
//!     "properties": {
//!       "color_rgb": [10, 20, 30],
//!       "coordinates": [[12, 40], [300, 40], [300, 200]],
//!       "road_lane_direction": 0,
//!       "road_lane_num": 1
//!     },
//!     "geometry": { "type": "Polygon", "coordinates": [[[37.61, 55.75], ...]] }
//!   }]
//! }
//! ```
//!
//! `properties.coordinates` are normalized image coordinates (natural image
//! pixels); `geometry.coordinates` are longitude/latitude rings for the map.

use serde::{Deserialize, Serialize};

use super::point::Point;
use crate::color::Rgb;
use crate::error::Result;
use crate::identifier::PolygonId;

/// Lane number / direction of a zone that has not been assigned to a lane.
pub const LANE_UNASSIGNED: i32 = -1;

fn feature_type() -> String {
    "Feature".to_string()
}

fn feature_collection_type() -> String {
    "FeatureCollection".to_string()
}

fn polygon_type() -> String {
    "Polygon".to_string()
}

fn lane_unassigned() -> i32 {
    LANE_UNASSIGNED
}

/// Map geometry of a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPolygon {
    #[serde(rename = "type", default = "polygon_type")]
    pub geometry_type: String,
    /// Rings of `[lng, lat]` positions; the first ring is the outline.
    #[serde(default)]
    pub coordinates: Vec<Vec<Vec<f64>>>,
}

impl GeoPolygon {
    /// The outer ring, if the geometry has one with at least one position.
    pub fn outer_ring(&self) -> Option<&[Vec<f64>]> {
        self.coordinates
            .first()
            .map(Vec::as_slice)
            .filter(|ring| !ring.is_empty())
    }
}

impl Default for GeoPolygon {
    fn default() -> Self {
        Self {
            geometry_type: polygon_type(),
            coordinates: Vec::new(),
        }
    }
}

/// Attributes of a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    /// `[r, g, b]`; empty when the color could not be determined.
    #[serde(default)]
    pub color_rgb: Vec<u8>,
    /// Outline in normalized image coordinates.
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
    #[serde(default = "lane_unassigned")]
    pub road_lane_direction: i32,
    #[serde(default = "lane_unassigned")]
    pub road_lane_num: i32,
}

/// One zone record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoFeature {
    #[serde(rename = "type", default = "feature_type")]
    pub feature_type: String,
    pub id: PolygonId,
    pub properties: FeatureProperties,
    #[serde(default)]
    pub geometry: GeoPolygon,
}

impl GeoFeature {
    /// Record for a zone drawn on the canvas: no lane assignment and no map
    /// geometry yet.
    pub fn new_local(id: PolygonId, color_rgb: Vec<u8>, coordinates: &[Point]) -> Self {
        Self {
            feature_type: feature_type(),
            id,
            properties: FeatureProperties {
                color_rgb,
                coordinates: coordinates.iter().map(|p| p.to_pair()).collect(),
                road_lane_direction: LANE_UNASSIGNED,
                road_lane_num: LANE_UNASSIGNED,
            },
            geometry: GeoPolygon::default(),
        }
    }

    /// The outline in normalized image coordinates.
    pub fn normalized_points(&self) -> Vec<Point> {
        self.properties
            .coordinates
            .iter()
            .copied()
            .map(Point::from_pair)
            .collect()
    }

    pub fn set_normalized_points(&mut self, points: &[Point]) {
        self.properties.coordinates = points.iter().map(|p| p.to_pair()).collect();
    }

    /// The stroke/fill color, if `color_rgb` holds three components.
    pub fn color(&self) -> Option<Rgb> {
        Rgb::from_components(&self.properties.color_rgb)
    }
}

/// A set of zone records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "feature_collection_type")]
    pub collection_type: String,
    #[serde(default)]
    pub features: Vec<GeoFeature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<GeoFeature>) -> Self {
        Self {
            collection_type: feature_collection_type(),
            features,
        }
    }

    /// An empty collection, used whenever the remote store is unavailable.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::empty()
    }
}
