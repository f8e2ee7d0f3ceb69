//! Data models shared across the workspace.

mod feature;
mod point;

pub use feature::{FeatureCollection, FeatureProperties, GeoFeature, GeoPolygon, LANE_UNASSIGNED};
pub use point::Point;
