//! Map overlay seam: one geojson source and one fill layer per zone.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zonekit_core::constants::{MAP_LAYER_PREFIX, MAP_SOURCE_PREFIX};
use zonekit_core::{GeoFeature, PolygonId};

/// Errors reported by a map overlay.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlayError {
    #[error("Source already exists: {0}")]
    DuplicateSource(String),

    #[error("Layer already exists: {0}")]
    DuplicateLayer(String),

    #[error("Layer {layer} references unknown source {source_id}")]
    MissingSource { layer: String, source_id: String },

    #[error("Source {source_id} is still used by layer {layer}")]
    SourceInUse { source_id: String, layer: String },

    #[error("No such {kind}: {id}")]
    NotFound { kind: &'static str, id: String },
}

/// Map source id of a zone.
pub fn source_id(id: &PolygonId) -> String {
    format!("{MAP_SOURCE_PREFIX}{id}")
}

/// Map layer id of a zone.
pub fn layer_id(id: &PolygonId) -> String {
    format!("{MAP_LAYER_PREFIX}{id}")
}

/// A geojson-backed source holding a single feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub data: GeoFeature,
}

impl GeoJsonSource {
    pub fn new(data: GeoFeature) -> Self {
        Self {
            source_type: "geojson".to_string(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillPaint {
    #[serde(rename = "fill-color")]
    pub fill_color: String,
    #[serde(rename = "fill-opacity")]
    pub fill_opacity: f64,
}

/// A fill layer drawing one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillLayer {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    pub source: String,
    pub paint: FillPaint,
}

impl FillLayer {
    pub fn new(id: impl Into<String>, source: impl Into<String>, paint: FillPaint) -> Self {
        Self {
            id: id.into(),
            layer_type: "fill".to_string(),
            source: source.into(),
            paint,
        }
    }
}

/// Longitude/latitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLatBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl LngLatBounds {
    /// Bounds of a list of `[lng, lat]` positions. Positions with fewer than
    /// two components are skipped; `None` when nothing is left.
    pub fn from_positions(positions: &[Vec<f64>]) -> Option<Self> {
        let mut iter = positions.iter().filter(|p| p.len() >= 2);
        let first = iter.next()?;
        let mut bounds = Self {
            west: first[0],
            south: first[1],
            east: first[0],
            north: first[1],
        };
        for p in iter {
            bounds.extend(p[0], p[1]);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, lng: f64, lat: f64) {
        self.west = self.west.min(lng);
        self.east = self.east.max(lng);
        self.south = self.south.min(lat);
        self.north = self.north.max(lat);
    }
}

/// A basemap that accepts geojson sources and fill layers.
pub trait MapOverlay {
    /// # Errors
    /// `OverlayError::DuplicateSource` when the id is taken.
    fn add_source(&mut self, id: &str, source: GeoJsonSource) -> Result<(), OverlayError>;

    fn has_source(&self, id: &str) -> bool;

    /// # Errors
    /// Fails for an unknown source or one still drawn by a layer.
    fn remove_source(&mut self, id: &str) -> Result<(), OverlayError>;

    /// # Errors
    /// Fails when the id is taken or the layer's source does not exist.
    fn add_layer(&mut self, layer: FillLayer) -> Result<(), OverlayError>;

    fn has_layer(&self, id: &str) -> bool;

    fn remove_layer(&mut self, id: &str) -> Result<(), OverlayError>;

    fn fit_bounds(&mut self, bounds: LngLatBounds, padding: f64);
}

/// Headless [`MapOverlay`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryMap {
    sources: HashMap<String, GeoJsonSource>,
    layers: Vec<FillLayer>,
    last_fit: Option<(LngLatBounds, f64)>,
    fit_count: usize,
}

impl InMemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self, id: &str) -> Option<&GeoJsonSource> {
        self.sources.get(id)
    }

    pub fn layer(&self, id: &str) -> Option<&FillLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Layers in drawing order.
    pub fn layers(&self) -> &[FillLayer] {
        &self.layers
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Bounds and padding of the last `fit_bounds` call.
    pub fn last_fit(&self) -> Option<(LngLatBounds, f64)> {
        self.last_fit
    }

    /// Number of `fit_bounds` calls so far.
    pub fn fit_count(&self) -> usize {
        self.fit_count
    }
}

impl MapOverlay for InMemoryMap {
    fn add_source(&mut self, id: &str, source: GeoJsonSource) -> Result<(), OverlayError> {
        if self.sources.contains_key(id) {
            return Err(OverlayError::DuplicateSource(id.to_string()));
        }
        self.sources.insert(id.to_string(), source);
        Ok(())
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn remove_source(&mut self, id: &str) -> Result<(), OverlayError> {
        if let Some(layer) = self.layers.iter().find(|l| l.source == id) {
            return Err(OverlayError::SourceInUse {
                source_id: id.to_string(),
                layer: layer.id.clone(),
            });
        }
        self.sources
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| OverlayError::NotFound {
                kind: "source",
                id: id.to_string(),
            })
    }

    fn add_layer(&mut self, layer: FillLayer) -> Result<(), OverlayError> {
        if self.has_layer(&layer.id) {
            return Err(OverlayError::DuplicateLayer(layer.id));
        }
        if !self.sources.contains_key(&layer.source) {
            return Err(OverlayError::MissingSource {
                layer: layer.id,
                source_id: layer.source,
            });
        }
        self.layers.push(layer);
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|l| l.id == id)
    }

    fn remove_layer(&mut self, id: &str) -> Result<(), OverlayError> {
        let index = self
            .layers
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| OverlayError::NotFound {
                kind: "layer",
                id: id.to_string(),
            })?;
        self.layers.remove(index);
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: LngLatBounds, padding: f64) {
        self.last_fit = Some((bounds, padding));
        self.fit_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonekit_core::Point;

    fn feature(id: &str) -> GeoFeature {
        GeoFeature::new_local(PolygonId::from(id), vec![1, 2, 3], &[Point::default(); 3])
    }

    fn paint() -> FillPaint {
        FillPaint {
            fill_color: "rgb(1,2,3)".to_string(),
            fill_opacity: 0.8,
        }
    }

    #[test]
    fn test_ids() {
        let id = PolygonId::from("42");
        assert_eq!(source_id(&id), "source-polygon-42");
        assert_eq!(layer_id(&id), "layer-polygon-42");
    }

    #[test]
    fn test_paint_serializes_with_style_keys() {
        let layer = FillLayer::new("l", "s", paint());
        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["type"], "fill");
        assert_eq!(json["paint"]["fill-color"], "rgb(1,2,3)");
        assert_eq!(json["paint"]["fill-opacity"], 0.8);
    }

    #[test]
    fn test_layer_requires_source() {
        let mut map = InMemoryMap::new();
        assert!(matches!(
            map.add_layer(FillLayer::new("l", "s", paint())),
            Err(OverlayError::MissingSource { .. })
        ));
        map.add_source("s", GeoJsonSource::new(feature("a"))).unwrap();
        map.add_layer(FillLayer::new("l", "s", paint())).unwrap();
        assert_eq!(
            map.add_layer(FillLayer::new("l", "s", paint())),
            Err(OverlayError::DuplicateLayer("l".to_string()))
        );
        assert_eq!(
            map.add_source("s", GeoJsonSource::new(feature("a"))),
            Err(OverlayError::DuplicateSource("s".to_string()))
        );
    }

    #[test]
    fn test_source_removal_order() {
        let mut map = InMemoryMap::new();
        map.add_source("s", GeoJsonSource::new(feature("a"))).unwrap();
        map.add_layer(FillLayer::new("l", "s", paint())).unwrap();
        assert!(matches!(
            map.remove_source("s"),
            Err(OverlayError::SourceInUse { .. })
        ));
        map.remove_layer("l").unwrap();
        map.remove_source("s").unwrap();
        assert!(!map.has_source("s"));
        assert!(map.remove_layer("l").is_err());
    }

    #[test]
    fn test_bounds_from_positions() {
        let ring = vec![vec![37.6, 55.7], vec![37.5, 55.9], vec![], vec![37.8, 55.8]];
        let b = LngLatBounds::from_positions(&ring).unwrap();
        assert_eq!((b.west, b.south, b.east, b.north), (37.5, 55.7, 37.8, 55.9));
        assert!(LngLatBounds::from_positions(&[vec![], vec![1.0]]).is_none());
    }
}
