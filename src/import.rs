use std::{fs, path::Path};

use anyhow::{anyhow, Result};
use geojson::{feature::Id as GeoJsonId, GeoJson};
use livemap_core::repositories::{Error as RepoError, FeatureRepo};
use livemap_db_sqlite::Connections;
use livemap_entities::{
    feature::{Feature, Geometry},
    id::Id,
};
use serde_json::Value;

pub fn import_from_geojson_file(connections: &Connections, file_path: &Path) -> Result<usize> {
    info!("Importing features from {}", file_path.display());
    let json = fs::read_to_string(file_path)?;
    let features = features_from_geojson(&json)?;
    import_features(connections, &features)
}

/// All features are stored or none.
pub fn import_features(connections: &Connections, features: &[Feature]) -> Result<usize> {
    connections.exclusive()?.transaction(|conn| {
        for feature in features {
            conn.create_or_update_feature(feature)?;
        }
        Ok::<_, RepoError>(())
    })?;
    info!("Imported {} feature(s)", features.len());
    Ok(features.len())
}

pub fn features_from_geojson(json: &str) -> Result<Vec<Feature>> {
    let features = match json.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(anyhow!("Expected a feature collection instead of a geometry"))
        }
    };
    features
        .into_iter()
        .enumerate()
        .map(|(i, feature)| {
            feature_from_geojson(feature).map_err(|err| anyhow!("Invalid feature #{i}: {err}"))
        })
        .collect()
}

fn text_property(feature: &geojson::Feature, key: &str) -> Option<String> {
    match feature.property(key)? {
        Value::String(s) => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
    .filter(|s| !s.is_empty())
}

fn feature_from_geojson(from: geojson::Feature) -> Result<Feature> {
    let id = match &from.id {
        Some(GeoJsonId::String(id)) => Some(id.trim().to_owned()).filter(|id| !id.is_empty()),
        Some(GeoJsonId::Number(id)) => Some(id.to_string()),
        None => text_property(&from, "id"),
    }
    .map(Id::from)
    .unwrap_or_else(|| {
        let id = Id::new();
        debug!("Generated id {id} for feature without id");
        id
    });
    let name = text_property(&from, "name").unwrap_or_default();
    let category = text_property(&from, "category").unwrap_or_default();
    let geometry = from
        .geometry
        .ok_or_else(|| anyhow!("Missing geometry"))?;
    let geometry = Geometry::<f64>::try_from(geometry)?;
    Ok(Feature {
        id,
        geometry,
        category,
        name,
        translated_name: None,
    })
}
