use super::*;
use livemap_entities as e;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Geometry(#[from] geojson::Error),
    #[error(transparent)]
    Bbox(#[from] e::geo::BboxParseError),
    #[error(transparent)]
    Language(#[from] e::language::LanguageParseError),
}

impl From<&e::feature::Feature> for Feature {
    fn from(from: &e::feature::Feature) -> Self {
        let e::feature::Feature {
            id,
            geometry,
            category,
            name,
            translated_name,
        } = from;
        Self {
            type_: FeatureType::Feature,
            geometry: Geometry::new(geojson::Value::from(geometry)),
            properties: FeatureProperties {
                id: id.to_string(),
                name: name.clone(),
                category: category.clone(),
                name_translated: translated_name.clone(),
            },
        }
    }
}

impl TryFrom<Feature> for e::feature::Feature {
    type Error = ConversionError;
    fn try_from(from: Feature) -> Result<Self, Self::Error> {
        let Feature {
            geometry,
            properties,
            ..
        } = from;
        let FeatureProperties {
            id,
            name,
            category,
            name_translated,
        } = properties;
        Ok(Self {
            id: id.into(),
            geometry: geometry.try_into()?,
            category,
            name,
            translated_name: name_translated,
        })
    }
}

impl From<&e::feature::FeatureCollection> for FeatureCollection {
    fn from(from: &e::feature::FeatureCollection) -> Self {
        let e::feature::FeatureCollection {
            bbox,
            lang,
            features,
        } = from;
        Self {
            type_: FeatureCollectionType::FeatureCollection,
            bbox: bbox.to_array(),
            lang: lang.to_string(),
            features: features.iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<FeatureCollection> for e::feature::FeatureCollection {
    type Error = ConversionError;
    fn try_from(from: FeatureCollection) -> Result<Self, Self::Error> {
        let FeatureCollection {
            bbox,
            lang,
            features,
            ..
        } = from;
        let [west, south, east, north] = bbox;
        let bbox = e::geo::MapBbox::try_from_west_south_east_north(west, south, east, north)?;
        let lang = lang.parse()?;
        let features = features
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<_, _>>()?;
        Ok(Self {
            bbox,
            lang,
            features,
        })
    }
}
