use std::collections::HashSet;

use super::prelude::*;
use crate::gateways::poi::{Poi, PoiGateway};

/// Maximum number of places of a single live query.
pub const LIVE_PLACES_LIMIT: usize = 200;

/// Used if a live query comes without a bounding box (South Bangalore).
pub const DEFAULT_LIVE_BBOX: [f64; 4] = [77.54, 12.88, 77.62, 12.96];

const UNNAMED: &str = "unnamed";

#[derive(Debug, Clone, PartialEq)]
pub struct LivePlace {
    /// `<kind>-<id>`, e.g. `node-42`
    pub id: String,
    pub name: String,
    pub pos: MapPoint,
    pub tags: Vec<(String, String)>,
}

pub fn default_live_bbox() -> MapBbox {
    let [west, south, east, north] = DEFAULT_LIVE_BBOX;
    MapBbox::new(
        MapPoint::from_lat_lng_deg(south, west),
        MapPoint::from_lat_lng_deg(north, east),
    )
}

fn display_name(tags: &[(String, String)]) -> String {
    let tag = |key: &str| {
        tags.iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.clone())
    };
    tag("name")
        .or_else(|| tag("name:en"))
        .or_else(|| tags.first().map(|(_, v)| v.clone()))
        .unwrap_or_else(|| UNNAMED.to_owned())
}

fn into_live_place(poi: Poi) -> Option<LivePlace> {
    let Poi {
        kind,
        id,
        pos,
        tags,
    } = poi;
    let pos = pos.filter(|p| p.is_valid())?;
    Some(LivePlace {
        id: format!("{kind}-{id}"),
        name: display_name(&tags),
        pos,
        tags,
    })
}

/// Points of interest from the public POI database.
///
/// Entries without coordinates are skipped, duplicates removed
/// and the result is capped at [`LIVE_PLACES_LIMIT`].
pub fn live_places<G>(gateway: &G, bbox: Option<MapBbox>) -> Result<Vec<LivePlace>>
where
    G: PoiGateway + ?Sized,
{
    let bbox = bbox.unwrap_or_else(default_live_bbox);
    let pois = gateway.pois_in_bbox(&bbox)?;
    let mut seen = HashSet::new();
    let places = pois
        .into_iter()
        .filter_map(into_live_place)
        .filter(|p| seen.insert(p.id.clone()))
        .take(LIVE_PLACES_LIMIT)
        .collect();
    Ok(places)
}
