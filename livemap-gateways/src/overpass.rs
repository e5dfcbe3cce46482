use livemap_core::{
    entities::{MapBbox, MapPoint},
    gateways::poi::{Error, Poi, PoiGateway},
};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Tags of point-like features that are considered as POI.
const POI_TAG_KEYS: [&str; 5] = ["amenity", "tourism", "shop", "leisure", "historic"];

/// Element kinds with a position.
const POI_KINDS: [&str; 2] = ["node", "way"];

/// A POI gateway based on the Overpass API of OpenStreetMap.
#[derive(Debug, Clone)]
pub struct Overpass {
    pub api_url: String,
}

#[derive(Debug, Deserialize)]
struct Center {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct Element {
    #[serde(rename = "type")]
    kind: String,
    id: i64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<Center>,
    #[serde(default)]
    tags: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    elements: Vec<Element>,
}

/// Overpass QL expects `south,west,north,east`.
fn build_query(bbox: &MapBbox) -> String {
    let area = format!(
        "{},{},{},{}",
        bbox.south(),
        bbox.west(),
        bbox.north(),
        bbox.east()
    );
    let statements: String = POI_TAG_KEYS
        .iter()
        .map(|key| format!("node[\"{key}\"]({area});"))
        .collect();
    format!("[out:json][timeout:25];({statements});out center;")
}

fn element_to_poi(element: Element) -> Poi {
    let Element {
        kind,
        id,
        lat,
        lon,
        center,
        tags,
    } = element;
    let pos = match (lat, lon, center) {
        (Some(lat), Some(lng), _) => Some(MapPoint::from_lat_lng_deg(lat, lng)),
        (_, _, Some(Center { lat, lon })) => Some(MapPoint::from_lat_lng_deg(lat, lon)),
        _ => None,
    };
    let tags = tags
        .into_iter()
        .filter_map(|(k, v)| match v {
            Value::String(v) => Some((k, v)),
            Value::Null => None,
            v => Some((k, v.to_string())),
        })
        .collect();
    Poi {
        kind,
        id,
        pos,
        tags,
    }
}

fn parse_response(status: u16, body: &str) -> Result<Vec<Poi>, Error> {
    if !(200..300).contains(&status) {
        return Err(Error::Status(status));
    }
    let response: Response =
        serde_json::from_str(body).map_err(|err| Error::MalformedBody(err.to_string()))?;
    Ok(response
        .elements
        .into_iter()
        .filter(|e| POI_KINDS.contains(&e.kind.as_str()))
        .map(element_to_poi)
        .collect())
}

#[cfg(not(test))]
fn send_raw(url: &str, query: String) -> Result<(u16, String), Error> {
    let unreachable = |err: reqwest::Error| Error::Unreachable(err.to_string());
    let response = super::blocking_client()
        .map_err(unreachable)?
        .post(url)
        .header(reqwest::header::CONTENT_TYPE, "text/plain")
        .body(query)
        .send()
        .map_err(unreachable)?;
    let status = response.status().as_u16();
    let body = response.text().map_err(unreachable)?;
    Ok((status, body))
}

/// Don't query the public Overpass instance while running the tests.
#[cfg(test)]
fn send_raw(_: &str, _: String) -> Result<(u16, String), Error> {
    let body = r#"{"elements":[
        {"type":"node","id":1,"lat":12.95,"lon":77.58,"tags":{"amenity":"cafe","name":"Koshy's"}},
        {"type":"relation","id":2,"tags":{"name":"Bangalore"}}
    ]}"#;
    Ok((200, body.to_owned()))
}

impl PoiGateway for Overpass {
    fn pois_in_bbox(&self, bbox: &MapBbox) -> Result<Vec<Poi>, Error> {
        let query = build_query(bbox);
        log::debug!("Querying POIs within {bbox}");
        let (status, body) = send_raw(&self.api_url, query)?;
        let pois = parse_response(status, &body).inspect_err(|err| {
            log::warn!("POI request failed: {err}");
        })?;
        log::debug!("Received {} POI(s)", pois.len());
        Ok(pois)
    }
}
