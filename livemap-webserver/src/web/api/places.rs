use super::*;

/// The same snapshot as the first event of a stream, as a single response.
#[get("/places?<bbox>&<lang>")]
pub async fn get_places(
    db: sqlite::Connections,
    translation: &State<Translation>,
    cfg: &State<Cfg>,
    bbox: Option<&str>,
    lang: Option<&str>,
) -> Result<json::FeatureCollection> {
    let query = usecases::parse_viewport_query(bbox, lang, &cfg.source_lang)?;
    let collection = load_feature_collection_within(
        db,
        translation.0.clone(),
        cfg.source_lang.clone(),
        query,
        cfg.query_timeout,
    )
    .await?;
    Ok(Json(json::FeatureCollection::from(&collection)))
}
