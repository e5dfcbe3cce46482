pub use geo_types::Geometry;

use crate::{geo::MapBbox, id::Id, language::Language};

/// A single mapped entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Stable across queries for the same underlying entity.
    pub id: Id,
    pub geometry: Geometry<f64>,
    pub category: String,
    pub name: String,
    pub translated_name: Option<String>,
}

impl Feature {
    /// The text that should be displayed as label.
    pub fn label(&self) -> &str {
        self.translated_name.as_deref().unwrap_or(&self.name)
    }
}

/// The result of a single viewport query.
///
/// A collection is never modified after it has been produced.
/// Refreshing the view always means replacing it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    pub bbox: MapBbox,
    pub lang: Language,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(|f| f.name.as_str())
    }

    pub fn is_translated(&self) -> bool {
        !self.features.is_empty() && self.features.iter().all(|f| f.translated_name.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::*;

    #[test]
    fn label_prefers_translated_name() {
        let mut feature = Feature::build().name("Lalbagh").finish();
        assert_eq!(feature.label(), "Lalbagh");
        feature.translated_name = Some("ಲಾಲ್‌ಬಾಗ್".into());
        assert_eq!(feature.label(), "ಲಾಲ್‌ಬಾಗ್");
    }
}
