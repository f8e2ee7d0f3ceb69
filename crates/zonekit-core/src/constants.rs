//! Shared constants.

/// Stroke width of finalized zone outlines, in canvas pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

/// Stroke width of the provisional guide segments shown while drawing.
pub const GUIDE_STROKE_WIDTH: f64 = 3.0;

/// Stroke color of the provisional guide segments.
pub const GUIDE_STROKE_COLOR: &str = "purple";

/// Outline color used when a feature carries no usable `color_rgb`.
pub const FALLBACK_STROKE_COLOR: &str = "#58c";

/// Fill color of zone outlines on the canvas (fully transparent).
pub const SHAPE_FILL_COLOR: &str = "rgba(0,0,0,0)";

/// Opacity of the map fill layers.
pub const MAP_FILL_OPACITY: f64 = 0.8;

/// Padding in pixels used when fitting the map to the first zone.
pub const MAP_FIT_PADDING: f64 = 20.0;

/// Number of clicks after which a drawn zone is finalized automatically.
/// The last click closes the ring and is not kept as a vertex.
pub const AUTO_CLOSE_CLICKS: usize = 4;

/// Minimum number of vertices of a finalized zone.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Default base URL of the zone service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:42001";

/// Path of the zone feature collection endpoint.
pub const POLYGONS_GEOJSON_PATH: &str = "/api/polygons/geojson";

/// Request timeout of the zone fetch, in milliseconds.
pub const FETCH_TIMEOUT_MS: u64 = 5000;

/// Source id prefix used on the map overlay.
pub const MAP_SOURCE_PREFIX: &str = "source-polygon-";

/// Layer id prefix used on the map overlay.
pub const MAP_LAYER_PREFIX: &str = "layer-polygon-";
