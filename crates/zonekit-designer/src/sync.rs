//! Synchronization between the feature store, the canvas and the map.
//!
//! The store holds outlines in normalized image coordinates; shapes hold them
//! in canvas pixels. Every function here moves data across that boundary in
//! one direction and leaves the three representations consistent.

use tracing::{debug, info, warn};
use zonekit_core::constants::{
    DEFAULT_STROKE_WIDTH, FALLBACK_STROKE_COLOR, GUIDE_STROKE_COLOR, GUIDE_STROKE_WIDTH,
    MAP_FILL_OPACITY, MAP_FIT_PADDING,
};
use zonekit_core::{
    parse_rgb_components, FeatureError, GeoFeature, GeometryError, Point, PolygonId, Result, Rgb,
};

use crate::canvas::RenderingSurface;
use crate::feature_store::FeatureStore;
use crate::map_overlay::{
    layer_id, source_id, FillLayer, FillPaint, GeoJsonSource, LngLatBounds, MapOverlay,
};
use crate::shapes::{EditableShape, PolygonShape};
use crate::viewport::{to_normalized, to_pixel, ImageScale};

/// Offset between object center and path offset below which a shape is
/// treated as never moved.
const ALIGNMENT_TOLERANCE: f64 = 1e-6;

/// Presentation parameters of zones on the canvas and the map.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneStyle {
    pub stroke_width: f64,
    pub guide_stroke_width: f64,
    pub guide_color: String,
    pub fill_opacity: f64,
    pub fit_padding: f64,
}

impl Default for ZoneStyle {
    fn default() -> Self {
        Self {
            stroke_width: DEFAULT_STROKE_WIDTH,
            guide_stroke_width: GUIDE_STROKE_WIDTH,
            guide_color: GUIDE_STROKE_COLOR.to_string(),
            fill_opacity: MAP_FILL_OPACITY,
            fit_padding: MAP_FIT_PADDING,
        }
    }
}

/// What [`delete_everywhere`] actually removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteReport {
    pub shape: bool,
    pub record: bool,
    pub layer: bool,
    pub source: bool,
}

impl DeleteReport {
    /// Nothing was left to remove.
    pub fn is_noop(&self) -> bool {
        !(self.shape || self.record || self.layer || self.source)
    }
}

fn css_color(feature: &GeoFeature) -> String {
    feature
        .color()
        .map(|c| c.to_css())
        .unwrap_or_else(|| FALLBACK_STROKE_COLOR.to_string())
}

/// Canvas positions of a shape's outline.
///
/// A shape that was never moved, scaled or rotated reports its vertex list
/// verbatim, so committing an untouched outline is lossless.
pub fn canvas_outline(shape: &PolygonShape) -> Vec<Point> {
    if shape.is_canvas_aligned(ALIGNMENT_TOLERANCE) {
        shape.vertices().to_vec()
    } else {
        shape.absolute_vertices()
    }
}

/// Builds the canvas shape of a stored record.
pub fn shape_for_feature(
    feature: &GeoFeature,
    scale: &ImageScale,
    style: &ZoneStyle,
) -> std::result::Result<PolygonShape, GeometryError> {
    let points = feature
        .normalized_points()
        .into_iter()
        .map(|p| to_pixel(p, scale))
        .collect();
    PolygonShape::new(feature.id.clone(), points, css_color(feature), style.stroke_width)
}

/// Adds a shape for every record that has none yet. Returns the number of
/// shapes added.
///
/// Records that cannot form a polygon are skipped with a warning.
pub fn render_all<S: RenderingSurface + ?Sized>(
    surface: &mut S,
    store: &FeatureStore,
    scale: &ImageScale,
    style: &ZoneStyle,
) -> usize {
    let mut rendered = 0;
    for id in store.ids() {
        if surface.contains_shape(&id) {
            continue;
        }
        let Some(feature) = store.get(&id) else {
            continue;
        };
        match shape_for_feature(feature, scale, style) {
            Ok(shape) => {
                surface.add_shape(shape);
                rendered += 1;
            }
            Err(e) => warn!(%id, error = %e, "Skipping zone that cannot be drawn"),
        }
    }
    if rendered > 0 {
        surface.request_render();
    }
    debug!(rendered, total = store.len(), "Rendered stored zones");
    rendered
}

/// Adds a source and a fill layer per feature. Returns the number of layers
/// added.
pub fn project_to_map<M: MapOverlay + ?Sized>(
    map: &mut M,
    features: &[GeoFeature],
    style: &ZoneStyle,
) -> usize {
    let mut layers = 0;
    for feature in features {
        let source = source_id(&feature.id);
        if let Err(e) = map.add_source(&source, GeoJsonSource::new(feature.clone())) {
            warn!(id = %feature.id, error = %e, "Map source not added");
        }
        let paint = FillPaint {
            fill_color: css_color(feature),
            fill_opacity: style.fill_opacity,
        };
        match map.add_layer(FillLayer::new(layer_id(&feature.id), source, paint)) {
            Ok(()) => layers += 1,
            Err(e) => warn!(id = %feature.id, error = %e, "Map layer not added"),
        }
    }

    layers
}

/// Fits the map to the outer ring of the first feature. Returns `false`
/// when there is no feature or its ring is empty.
pub fn fit_to_first<M: MapOverlay + ?Sized>(
    map: &mut M,
    features: &[GeoFeature],
    style: &ZoneStyle,
) -> bool {
    let Some(first) = features.first() else {
        return false;
    };
    match first
        .geometry
        .outer_ring()
        .and_then(LngLatBounds::from_positions)
    {
        Some(bounds) => {
            map.fit_bounds(bounds, style.fit_padding);
            true
        }
        None => {
            debug!(id = %first.id, "First zone has no map geometry, map not fitted");
            false
        }
    }
}

/// Writes a shape's current outline back into its record, in normalized
/// coordinates. Returns the stored outline.
///
/// # Errors
/// `FeatureError::UnknownFeature` when either the shape or the record is
/// missing.
pub fn commit_edit<S: RenderingSurface + ?Sized>(
    surface: &S,
    store: &mut FeatureStore,
    id: &PolygonId,
    scale: &ImageScale,
) -> Result<Vec<Point>> {
    let unknown = || FeatureError::UnknownFeature { id: id.to_string() };
    let shape = surface.shape(id).ok_or_else(unknown)?;
    let feature = store.get_mut(id).ok_or_else(unknown)?;

    let normalized: Vec<Point> = canvas_outline(shape)
        .into_iter()
        .map(|p| to_normalized(p, scale))
        .collect();
    feature.set_normalized_points(&normalized);
    debug!(%id, vertices = normalized.len(), "Committed zone outline");
    Ok(normalized)
}

/// Turns a drawn outline into a shape and a record.
///
/// The record color is read back from the shape's stroke.
///
/// # Errors
/// `GeometryError::TooFewVertices` for fewer than three vertices.
pub fn finalize_drawn<S: RenderingSurface + ?Sized>(
    surface: &mut S,
    store: &mut FeatureStore,
    id: PolygonId,
    vertices: Vec<Point>,
    color: Rgb,
    scale: &ImageScale,
    style: &ZoneStyle,
) -> std::result::Result<(), GeometryError> {
    let shape = PolygonShape::new(id.clone(), vertices, color.to_css(), style.stroke_width)?;
    let normalized: Vec<Point> = canvas_outline(&shape)
        .into_iter()
        .map(|p| to_normalized(p, scale))
        .collect();
    let feature = GeoFeature::new_local(id.clone(), parse_rgb_components(shape.stroke()), &normalized);

    store.upsert(feature);
    surface.add_shape(shape);
    surface.request_render();
    info!(%id, vertices = normalized.len(), "Zone created");
    Ok(())
}

/// Removes a zone's shape, record, map layer and map source, in that order.
///
/// Missing pieces are skipped, so deleting twice is harmless.
pub fn delete_everywhere<S, M>(
    surface: &mut S,
    store: &mut FeatureStore,
    map: &mut M,
    id: &PolygonId,
) -> DeleteReport
where
    S: RenderingSurface + ?Sized,
    M: MapOverlay + ?Sized,
{
    let mut report = DeleteReport {
        shape: surface.remove_shape(id).is_some(),
        record: store.remove(id).is_some(),
        ..DeleteReport::default()
    };

    let layer = layer_id(id);
    if map.has_layer(&layer) {
        match map.remove_layer(&layer) {
            Ok(()) => report.layer = true,
            Err(e) => warn!(%id, error = %e, "Map layer not removed"),
        }
    }
    let source = source_id(id);
    if map.has_source(&source) {
        match map.remove_source(&source) {
            Ok(()) => report.source = true,
            Err(e) => warn!(%id, error = %e, "Map source not removed"),
        }
    }

    if report.shape {
        surface.request_render();
    }
    if report.is_noop() {
        debug!(%id, "Nothing to delete");
    } else {
        info!(%id, ?report, "Zone deleted");
    }
    report
}
