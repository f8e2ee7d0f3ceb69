use std::collections::{HashMap, HashSet};

use tracing::{debug, info};
use zonekit_core::{FeatureCollection, GeoFeature, PolygonId};

use super::ZoneEditor;
use crate::canvas::RenderingSurface;
use crate::map_overlay::MapOverlay;
use crate::sync::{self, DeleteReport};

impl<S: RenderingSurface, M: MapOverlay> ZoneEditor<S, M> {
    /// Stores and draws a loaded feature collection. Returns the number of
    /// shapes added.
    ///
    /// Zones already known under an incoming id are replaced; features that
    /// cannot form a polygon are dropped. Map layers are
    /// added right away once the map is loaded, otherwise on
    /// [`ZoneEditor::on_map_loaded`].
    pub fn load_features(&mut self, collection: FeatureCollection) -> usize {
        let incoming: HashSet<PolygonId> =
            collection.features.iter().map(|f| f.id.clone()).collect();
        for id in &incoming {
            if self.store.contains(id) || self.surface.contains_shape(id) {
                self.remove_everywhere(id);
            }
        }
        self.pending_map.retain(|f| !incoming.contains(&f.id));

        self.store.extend_from_collection(&collection);
        let rendered = sync::render_all(
            &mut self.surface,
            &self.store,
            &self.scale,
            &self.options.style,
        );

        // the store kept the last feature per id; the map gets the same one
        let mut features = dedup_last_wins(collection.features);
        // records that could not be drawn are not kept
        features.retain(|f| {
            let drawn = self.surface.contains_shape(&f.id);
            if !drawn {
                self.store.remove(&f.id);
            }
            drawn
        });

        if self.map_loaded {
            self.project(&features);
        } else {
            self.pending_map.extend(features);
        }
        info!(
            features = incoming.len(),
            rendered,
            map_loaded = self.map_loaded,
            "Zones loaded"
        );
        rendered
    }

    /// The map finished loading: projects every loaded zone still present.
    pub fn on_map_loaded(&mut self) {
        if self.map_loaded {
            debug!("Map already loaded");
            return;
        }
        self.map_loaded = true;
        let pending: Vec<_> = std::mem::take(&mut self.pending_map)
            .into_iter()
            .filter(|f| self.store.contains(&f.id))
            .collect();
        let layers = self.project(&pending);
        info!(layers, "Map overlay ready");
    }

    /// Adds map layers and fits the map the first time zones are shown.
    fn project(&mut self, features: &[GeoFeature]) -> usize {
        let layers = sync::project_to_map(&mut self.map, features, &self.options.style);
        if !self.map_fitted {
            self.map_fitted = sync::fit_to_first(&mut self.map, features, &self.options.style);
        }
        layers
    }

    /// Deletes a zone from the canvas, the store and the map.
    pub fn delete_polygon(&mut self, id: &PolygonId) -> DeleteReport {
        self.remove_everywhere(id)
    }

    fn remove_everywhere(&mut self, id: &PolygonId) -> DeleteReport {
        let effects = self.state.forget_shape(id);
        self.apply(effects);
        self.pending_map.retain(|f| &f.id != id);
        sync::delete_everywhere(&mut self.surface, &mut self.store, &mut self.map, id)
    }
}

/// Keeps one feature per id, the last occurrence, in first-seen order.
fn dedup_last_wins(features: Vec<GeoFeature>) -> Vec<GeoFeature> {
    let mut index: HashMap<PolygonId, usize> = HashMap::new();
    let mut unique: Vec<GeoFeature> = Vec::with_capacity(features.len());
    for feature in features {
        match index.get(&feature.id) {
            Some(&i) => unique[i] = feature,
            None => {
                index.insert(feature.id.clone(), unique.len());
                unique.push(feature);
            }
        }
    }
    unique
}
