use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[cfg(feature = "entity-conversions")]
pub use conv::ConversionError;

pub use geojson::Geometry;

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
pub enum FeatureCollectionType {
    #[default]
    FeatureCollection,
}

#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
pub enum FeatureType {
    #[default]
    Feature,
}

/// A GeoJSON feature collection with LiveMap specific foreign members.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub type_: FeatureCollectionType,
    /// `[west, south, east, north]`
    pub bbox: [f64; 4],
    pub lang: String,
    pub features: Vec<Feature>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Feature {
    #[serde(rename = "type")]
    pub type_: FeatureType,
    pub geometry: Geometry,
    pub properties: FeatureProperties,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct FeatureProperties {
    pub id              : String,
    pub name            : String,
    pub category        : String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name_translated : Option<String>,
}

/// Payload of the final event of a stream that failed.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct StreamError {
    pub error: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct TranslateRequest {
    #[serde(default)]
    pub texts: Vec<String>,
    pub target: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct TranslatedText {
    pub original: String,
    pub translated: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct TranslateResponse {
    pub translated: Vec<TranslatedText>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct LivePlace {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub tags: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct LivePlaces {
    pub places: Vec<LivePlace>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq))]
pub struct Health {
    pub status: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq, Eq, thiserror::Error))]
#[cfg_attr(feature = "extra-derive", error("{message}"))]
pub struct Error {
    /// The HTTP status code of the response
    pub http_status: u16,
    pub message: String,
}
