use super::*;

fn geometry_to_json(feature: &Feature) -> Result<String> {
    let geometry = geojson::Geometry::new(geojson::Value::from(&feature.geometry));
    serde_json::to_string(&geometry).map_err(|err| repo::Error::Other(err.into()))
}

fn geometry_from_json(id: &str, json: &str) -> Result<Geometry<f64>> {
    serde_json::from_str::<geojson::Geometry>(json)
        .ok()
        .and_then(|geometry| geometry.try_into().ok())
        .ok_or_else(|| repo::Error::InvalidGeometry(id.to_owned()))
}

fn load_feature(model: models::Feature) -> Result<Feature> {
    let models::Feature {
        id,
        name,
        category,
        geometry,
    } = model;
    let geometry = geometry_from_json(&id, &geometry)?;
    Ok(Feature {
        id: id.into(),
        geometry,
        category,
        name,
        translated_name: None,
    })
}

/// All features whose envelope overlaps the bounding box.
pub fn features_in_bbox(conn: &mut SqliteConnection, bbox: &MapBbox) -> Result<Vec<Feature>> {
    use schema::features::dsl;
    dsl::features
        .select((dsl::id, dsl::name, dsl::category, dsl::geometry))
        .filter(dsl::min_lng.le(bbox.east()))
        .filter(dsl::max_lng.ge(bbox.west()))
        .filter(dsl::min_lat.le(bbox.north()))
        .filter(dsl::max_lat.ge(bbox.south()))
        .order_by(dsl::id)
        .load::<models::Feature>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_feature)
        .collect()
}

pub fn create_or_update_feature(conn: &mut SqliteConnection, feature: &Feature) -> Result<()> {
    let env = envelope(feature)
        .ok_or_else(|| repo::Error::InvalidGeometry(feature.id.to_string()))?;
    let new_feature = models::NewFeature {
        id: feature.id.as_str(),
        name: &feature.name,
        category: &feature.category,
        geometry: geometry_to_json(feature)?,
        min_lng: env.min().x,
        min_lat: env.min().y,
        max_lng: env.max().x,
        max_lat: env.max().y,
    };
    diesel::replace_into(schema::features::table)
        .values(&new_feature)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

pub fn count_features(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::features::dsl;
    Ok(dsl::features
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}
