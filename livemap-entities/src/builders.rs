pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::feature_builder::*;

pub mod feature_builder {

    use super::*;
    use crate::{feature::*, geo::*, id::*};
    use geo_types::{Coord, LineString, Point, Polygon};

    #[derive(Debug)]
    pub struct FeatureBuild {
        feature: Feature,
    }

    impl FeatureBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.feature.id = id.into();
            self
        }
        pub fn name(mut self, name: &str) -> Self {
            self.feature.name = name.into();
            self
        }
        pub fn category(mut self, category: &str) -> Self {
            self.feature.category = category.into();
            self
        }
        pub fn translated_name(mut self, name: &str) -> Self {
            self.feature.translated_name = Some(name.into());
            self
        }
        pub fn pos(mut self, pos: MapPoint) -> Self {
            self.feature.geometry = Point::new(pos.lng(), pos.lat()).into();
            self
        }
        /// A polyline through the given `(lng, lat)` pairs.
        pub fn line(mut self, coords: &[(f64, f64)]) -> Self {
            self.feature.geometry = LineString::from(coords.to_vec()).into();
            self
        }
        /// A closed polygon through the given `(lng, lat)` pairs.
        pub fn polygon(mut self, coords: &[(f64, f64)]) -> Self {
            let exterior = coords
                .iter()
                .map(|&(x, y)| Coord { x, y })
                .collect::<Vec<_>>();
            self.feature.geometry = Polygon::new(exterior.into(), vec![]).into();
            self
        }
        pub fn finish(self) -> Feature {
            self.feature
        }
    }

    impl Builder for Feature {
        type Build = FeatureBuild;
        fn build() -> FeatureBuild {
            FeatureBuild {
                feature: Feature {
                    id: Id::new(),
                    geometry: Point::new(0.0, 0.0).into(),
                    category: "amenity".into(),
                    name: "".into(),
                    translated_name: None,
                },
            }
        }
    }
}
