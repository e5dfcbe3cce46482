use crate::entities::{MapBbox, MapPoint};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("POI provider unreachable: {0}")]
    Unreachable(String),
    #[error("POI provider responded with HTTP status {0}")]
    Status(u16),
    #[error("Malformed response from POI provider: {0}")]
    MalformedBody(String),
}

/// A raw point of interest as delivered by a public POI database.
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    /// Element kind, e.g. `node` or `way`.
    pub kind: String,
    pub id: i64,
    pub pos: Option<MapPoint>,
    /// Tags in the order of the provider's response.
    pub tags: Vec<(String, String)>,
}

pub trait PoiGateway {
    fn pois_in_bbox(&self, bbox: &MapBbox) -> Result<Vec<Poi>, Error>;
}
