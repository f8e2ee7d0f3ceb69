//! Zone editor façade for UI integration.
//!
//! Owns the rendering surface, the map overlay, the feature store, the
//! interaction state and the image scale, and is the only entry point for
//! toolbar commands, pointer input and data loading.
//!
//! Split into submodules:
//! - `input`: commands and pointer events
//! - `effects`: execution of state machine effects
//! - `loading`: remote data, map readiness and deletion

mod effects;
mod input;
mod loading;

use crate::canvas::RenderingSurface;
use crate::feature_store::FeatureStore;
use crate::interaction::{DrawingRules, InteractionState, Mode};
use crate::map_overlay::MapOverlay;
use crate::sync::ZoneStyle;
use crate::viewport::ImageScale;
use zonekit_core::GeoFeature;

/// Tunables of the editor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorOptions {
    pub rules: DrawingRules,
    pub style: ZoneStyle,
}

/// Zone editor state for UI integration.
pub struct ZoneEditor<S: RenderingSurface, M: MapOverlay> {
    surface: S,
    map: M,
    store: FeatureStore,
    state: InteractionState,
    scale: ImageScale,
    options: EditorOptions,
    map_loaded: bool,
    /// The map viewport has been fitted to a zone.
    map_fitted: bool,
    /// Features waiting for the map to finish loading.
    pending_map: Vec<GeoFeature>,
}

impl<S: RenderingSurface, M: MapOverlay> ZoneEditor<S, M> {
    /// Creates an editor with an empty store, in `Waiting` mode.
    pub fn new(surface: S, map: M, scale: ImageScale, options: EditorOptions) -> Self {
        Self {
            surface,
            map,
            store: FeatureStore::new(),
            state: InteractionState::new(),
            scale,
            options,
            map_loaded: false,
            map_fitted: false,
            pending_map: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.state
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn scale(&self) -> &ImageScale {
        &self.scale
    }

    /// Changes the image scale used for records committed from now on.
    pub fn set_scale(&mut self, scale: ImageScale) {
        self.scale = scale;
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn is_map_loaded(&self) -> bool {
        self.map_loaded
    }

    pub fn is_map_fitted(&self) -> bool {
        self.map_fitted
    }
}
