//! In-memory zone records, keyed by polygon id.

use std::collections::HashMap;

use zonekit_core::{FeatureCollection, GeoFeature, PolygonId};

/// The single in-memory source of truth for zone records.
///
/// Ordering is not meaningful.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    features: HashMap<PolygonId, GeoFeature>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the record for `feature.id`, returning the
    /// previous record.
    pub fn upsert(&mut self, feature: GeoFeature) -> Option<GeoFeature> {
        self.features.insert(feature.id.clone(), feature)
    }

    /// Upserts every feature of a collection. Returns the number stored.
    pub fn extend_from_collection(&mut self, collection: &FeatureCollection) -> usize {
        for feature in &collection.features {
            self.upsert(feature.clone());
        }
        collection.len()
    }

    pub fn remove(&mut self, id: &PolygonId) -> Option<GeoFeature> {
        self.features.remove(id)
    }

    pub fn get(&self, id: &PolygonId) -> Option<&GeoFeature> {
        self.features.get(id)
    }

    pub fn get_mut(&mut self, id: &PolygonId) -> Option<&mut GeoFeature> {
        self.features.get_mut(id)
    }

    pub fn contains(&self, id: &PolygonId) -> bool {
        self.features.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeoFeature> {
        self.features.values()
    }

    /// Ids of all records, sorted.
    pub fn ids(&self) -> Vec<PolygonId> {
        let mut ids: Vec<PolygonId> = self.features.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn clear(&mut self) {
        self.features.clear();
    }

    /// Snapshot of the store as a collection, sorted by id.
    pub fn to_collection(&self) -> FeatureCollection {
        let mut features: Vec<GeoFeature> = self.features.values().cloned().collect();
        features.sort_by(|a, b| a.id.cmp(&b.id));
        FeatureCollection::new(features)
    }
}
