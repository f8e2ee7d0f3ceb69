//! # ZoneKit Designer
//!
//! Drawing, editing and deleting zones over a georeferenced image.
//!
//! A zone lives in three places at once: a [`PolygonShape`] on the
//! [`RenderingSurface`], a [`GeoFeature`](zonekit_core::GeoFeature) record in
//! the [`FeatureStore`], and a source/layer pair on the [`MapOverlay`]. The
//! [`ZoneEditor`] routes operator input through the interaction state
//! machine and keeps the three consistent.
//!
//! ## Architecture
//!
//! ```text
//! ZoneEditor (façade)
//!   ├── InteractionState + transition (modes, draw buffer, guides)
//!   ├── RenderingSurface (shapes, guides, viewport)
//!   │     └── PolygonShape + VertexControl (anchor-preserving vertex drag)
//!   ├── FeatureStore (id -> record, normalized coordinates)
//!   └── MapOverlay (geojson source + fill layer per zone)
//!
//! sync: store <-> canvas <-> map projections
//! viewport: page <-> canvas <-> normalized coordinates
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zonekit_designer::{EditorOptions, ImageScale, InMemoryCanvas, InMemoryMap, ZoneEditor};
//!
//! let mut editor = ZoneEditor::new(
//!     InMemoryCanvas::default(),
//!     InMemoryMap::new(),
//!     ImageScale::identity(),
//!     EditorOptions::default(),
//! );
//! editor.command_add();
//! ```

pub mod canvas;
pub mod controls;
pub mod editor;
pub mod feature_store;
pub mod interaction;
pub mod map_overlay;
pub mod shapes;
pub mod sync;
pub mod transform;
pub mod viewport;

pub use canvas::{InMemoryCanvas, RenderingSurface};
pub use controls::{
    action_handler, anchored_action, controls_for, drag_vertex, position_handler, toggle_edit,
    VertexControl,
};
pub use editor::{EditorOptions, ZoneEditor};
pub use feature_store::FeatureStore;
pub use interaction::{
    transition, Command, DrawingRules, Effect, InputEvent, InteractionState, Mode, MouseButton,
};
pub use map_overlay::{
    layer_id, source_id, FillLayer, FillPaint, GeoJsonSource, InMemoryMap, LngLatBounds,
    MapOverlay, OverlayError,
};
pub use shapes::{CornerStyle, EditAffordance, EditableShape, GuideId, GuideLine, PolygonShape};
pub use sync::{
    canvas_outline, commit_edit, delete_everywhere, finalize_drawn, fit_to_first, project_to_map,
    render_all, shape_for_feature, DeleteReport, ZoneStyle,
};
pub use transform::AffineTransform;
pub use viewport::{min_x, min_y, to_canvas_local, to_normalized, to_pixel, ImageScale, Viewport};
