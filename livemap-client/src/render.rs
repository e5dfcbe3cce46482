use std::collections::BTreeMap;

use livemap_entities::feature::{FeatureCollection, Geometry};

/// Name of the data source that holds the displayed features.
pub const PLACES_SOURCE_ID: &str = "places";

/// Name of the label layer that renders [`PLACES_SOURCE_ID`].
pub const PLACES_LAYER_ID: &str = "places-labels";

/// A feature prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFeature {
    pub id: String,
    pub label: String,
    pub geometry: Geometry<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Source {
    pub features: Vec<RenderedFeature>,
}

impl From<&FeatureCollection> for Source {
    fn from(from: &FeatureCollection) -> Self {
        let features = from
            .features
            .iter()
            .map(|f| RenderedFeature {
                id: f.id.to_string(),
                label: f.label().to_owned(),
                geometry: f.geometry.clone(),
            })
            .collect();
        Self { features }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub id: String,
    pub source: String,
}

/// The drawing surface of a map widget.
pub trait MapSurface {
    fn has_layer(&self, id: &str) -> bool;
    fn remove_layer(&mut self, id: &str);
    fn has_source(&self, id: &str) -> bool;
    fn remove_source(&mut self, id: &str);
    fn add_source(&mut self, id: &str, source: Source);
    fn add_layer(&mut self, layer: Layer);
}

/// Swaps the displayed features wholesale.
#[derive(Debug, Clone)]
pub struct LayerReplacer {
    source_id: String,
    layer_id: String,
}

impl Default for LayerReplacer {
    fn default() -> Self {
        Self::new(PLACES_SOURCE_ID, PLACES_LAYER_ID)
    }
}

impl LayerReplacer {
    pub fn new(source_id: impl Into<String>, layer_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            layer_id: layer_id.into(),
        }
    }

    /// Remove the previous layer and source, then install the new ones.
    ///
    /// An empty collection clears the display.
    pub fn replace<S>(&self, surface: &mut S, collection: &FeatureCollection)
    where
        S: MapSurface + ?Sized,
    {
        // The layer references the source and must go first
        if surface.has_layer(&self.layer_id) {
            surface.remove_layer(&self.layer_id);
        }
        if surface.has_source(&self.source_id) {
            surface.remove_source(&self.source_id);
        }
        surface.add_source(&self.source_id, Source::from(collection));
        surface.add_layer(Layer {
            id: self.layer_id.clone(),
            source: self.source_id.clone(),
        });
        log::debug!(
            "Displaying {} feature(s) in '{}'",
            collection.len(),
            collection.lang
        );
    }
}

/// A surface that only keeps its state in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySurface {
    sources: BTreeMap<String, Source>,
    layers: Vec<Layer>,
}

impl MemorySurface {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn source(&self, id: &str) -> Option<&Source> {
        self.sources.get(id)
    }

    /// The labels of all features rendered by a layer.
    pub fn labels(&self, layer_id: &str) -> Vec<&str> {
        self.layers
            .iter()
            .filter(|l| l.id == layer_id)
            .filter_map(|l| self.sources.get(&l.source))
            .flat_map(|s| s.features.iter().map(|f| f.label.as_str()))
            .collect()
    }
}

impl MapSurface for MemorySurface {
    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|l| l.id == id)
    }

    fn remove_layer(&mut self, id: &str) {
        self.layers.retain(|l| l.id != id);
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn remove_source(&mut self, id: &str) {
        debug_assert!(
            !self.layers.iter().any(|l| l.source == id),
            "source '{id}' is still in use"
        );
        self.sources.remove(id);
    }

    fn add_source(&mut self, id: &str, source: Source) {
        debug_assert!(!self.sources.contains_key(id), "duplicate source '{id}'");
        self.sources.insert(id.to_owned(), source);
    }

    fn add_layer(&mut self, layer: Layer) {
        debug_assert!(!self.has_layer(&layer.id), "duplicate layer '{}'", layer.id);
        self.layers.push(layer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livemap_entities::{builders::*, feature::Feature, geo::MapPoint};

    fn collection(features: Vec<Feature>) -> FeatureCollection {
        FeatureCollection {
            bbox: "77.55,12.90,77.60,12.95".parse().unwrap(),
            lang: "kn".parse().unwrap(),
            features,
        }
    }

    fn lalbagh() -> Feature {
        Feature::build()
            .id("lalbagh")
            .name("Lalbagh")
            .translated_name("ಲಾಲ್‌ಬಾಗ್")
            .pos(MapPoint::from_lat_lng_deg(12.95, 77.585))
            .finish()
    }

    fn cubbon_park() -> Feature {
        Feature::build()
            .id("cubbon")
            .name("Cubbon Park")
            .pos(MapPoint::from_lat_lng_deg(12.97, 77.59))
            .finish()
    }

    #[test]
    fn prefer_translated_labels() {
        let mut surface = MemorySurface::default();
        LayerReplacer::default().replace(&mut surface, &collection(vec![lalbagh(), cubbon_park()]));
        assert_eq!(
            surface.labels(PLACES_LAYER_ID),
            vec!["ಲಾಲ್‌ಬಾಗ್", "Cubbon Park"]
        );
    }

    #[test]
    fn replacement_is_idempotent() {
        let replacer = LayerReplacer::default();
        let c = collection(vec![lalbagh(), cubbon_park()]);
        let mut once = MemorySurface::default();
        replacer.replace(&mut once, &c);
        let mut twice = MemorySurface::default();
        replacer.replace(&mut twice, &c);
        replacer.replace(&mut twice, &c);
        assert_eq!(once, twice);
        assert_eq!(twice.layers().len(), 1);
    }

    #[test]
    fn never_accumulate_features() {
        let replacer = LayerReplacer::default();
        let mut surface = MemorySurface::default();
        replacer.replace(&mut surface, &collection(vec![lalbagh()]));
        replacer.replace(&mut surface, &collection(vec![cubbon_park()]));
        assert_eq!(surface.labels(PLACES_LAYER_ID), vec!["Cubbon Park"]);
    }

    #[test]
    fn empty_collection_clears_display() {
        let replacer = LayerReplacer::default();
        let mut surface = MemorySurface::default();
        replacer.replace(&mut surface, &collection(vec![lalbagh()]));
        replacer.replace(&mut surface, &collection(vec![]));
        assert!(surface.labels(PLACES_LAYER_ID).is_empty());
        assert_eq!(surface.source(PLACES_SOURCE_ID), Some(&Source::default()));
    }
}
