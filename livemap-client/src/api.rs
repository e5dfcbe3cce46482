use livemap_entities::{feature::FeatureCollection, geo::MapBbox, language::Language};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;

use crate::{into_json, Error, Result};

/// Public LiveMap API
#[derive(Debug, Clone)]
pub struct PublicApi {
    url: String,
}

/// `west,south,east,north`
#[must_use]
pub fn bbox_string(bbox: &MapBbox) -> String {
    let [west, south, east, north] = bbox.to_array();
    format!("{west},{south},{east},{north}")
}

impl PublicApi {
    /// `url` points to the API root, e.g. `http://localhost:8080/api`.
    #[must_use]
    pub fn new(url: String) -> Self {
        let url = url.trim_end_matches('/').to_owned();
        Self { url }
    }

    #[must_use]
    pub fn places_stream_url(&self, bbox: &MapBbox, lang: &Language) -> String {
        let encoded_lang = utf8_percent_encode(lang.as_str(), NON_ALPHANUMERIC);
        format!(
            "{}/places-stream?bbox={}&lang={encoded_lang}",
            self.url,
            bbox_string(bbox)
        )
    }

    #[must_use]
    pub fn places_url(&self, bbox: &MapBbox, lang: &Language) -> String {
        let encoded_lang = utf8_percent_encode(lang.as_str(), NON_ALPHANUMERIC);
        format!(
            "{}/places?bbox={}&lang={encoded_lang}",
            self.url,
            bbox_string(bbox)
        )
    }

    /// The same snapshot as the first event of a stream.
    pub async fn places(
        &self,
        client: &Client,
        bbox: &MapBbox,
        lang: &Language,
    ) -> Result<FeatureCollection> {
        let response = client.get(self.places_url(bbox, lang)).send().await?;
        let collection: livemap_boundary::FeatureCollection = into_json(response).await?;
        collection
            .try_into()
            .map_err(|err: livemap_boundary::ConversionError| Error::Decode(err.to_string()))
    }
}
