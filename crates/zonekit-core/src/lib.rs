//! # ZoneKit Core
//!
//! Core types shared by every ZoneKit crate:
//! points, polygon identifiers, stroke colors, the GeoJSON-like zone
//! feature model and the error taxonomy.

pub mod color;
pub mod constants;
pub mod data;
pub mod error;
pub mod identifier;

pub use color::{parse_rgb_components, Rgb};
pub use data::{
    FeatureCollection, FeatureProperties, GeoFeature, GeoPolygon, Point, LANE_UNASSIGNED,
};
pub use error::{Error, FeatureError, GeometryError, Result};
pub use identifier::PolygonId;
