use super::*;

#[get("/places-live?<bbox>")]
pub async fn get_places_live(poi: &State<Poi>, bbox: Option<&str>) -> Result<json::LivePlaces> {
    let bbox = bbox
        .filter(|bbox| !bbox.trim().is_empty())
        .map(str::parse::<MapBbox>)
        .transpose()
        .map_err(usecases::Error::from)?;
    let poi = poi.0.clone();
    let places =
        rocket::tokio::task::spawn_blocking(move || usecases::live_places(&*poi, bbox)).await??;
    Ok(Json(json::LivePlaces {
        places: places.into_iter().map(to_json::live_place).collect(),
    }))
}
