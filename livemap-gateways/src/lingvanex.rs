use livemap_core::{
    entities::Language,
    gateways::translate::{Error, TranslationGateway},
};
use serde::{Deserialize, Serialize};

/// A translation gateway based on the Lingvanex B2B API.
#[derive(Debug, Clone)]
pub struct Lingvanex {
    pub api_url: String,
    pub api_key: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    from: &'a str,
    to: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    err: Option<String>,
    #[serde(default)]
    result: Option<String>,
}

fn parse_response(status: u16, body: &str) -> Result<String, Error> {
    if !(200..300).contains(&status) {
        return Err(Error::Status(status));
    }
    let response: TranslateResponse =
        serde_json::from_str(body).map_err(|err| Error::MalformedBody(err.to_string()))?;
    if let Some(err) = response.err.filter(|e| !e.is_empty()) {
        log::warn!("Lingvanex reported an error: {err}");
    }
    response.result.ok_or(Error::MissingResult)
}

#[cfg(not(test))]
fn send_raw(url: &str, api_key: &str, request: &TranslateRequest) -> Result<(u16, String), Error> {
    let unreachable = |err: reqwest::Error| Error::Unreachable(err.to_string());
    let response = super::blocking_client()
        .map_err(unreachable)?
        .post(url)
        // The key is sent as is, without any scheme
        .header(reqwest::header::AUTHORIZATION, api_key)
        .json(request)
        .send()
        .map_err(unreachable)?;
    let status = response.status().as_u16();
    let body = response.text().map_err(unreachable)?;
    Ok((status, body))
}

/// Don't send requests to the provider while running the tests.
/// Responds with the upper-cased input instead.
#[cfg(test)]
fn send_raw(_: &str, _: &str, request: &TranslateRequest) -> Result<(u16, String), Error> {
    let body = serde_json::json!({ "err": null, "result": request.data.to_uppercase() });
    Ok((200, body.to_string()))
}

impl TranslationGateway for Lingvanex {
    fn translate_batch(&self, from: &Language, to: &Language, batch: &str) -> Result<String, Error> {
        let request = TranslateRequest {
            from: from.as_str(),
            to: to.as_str(),
            data: batch,
        };
        log::debug!(
            "Requesting translation of {} line(s) from '{from}' to '{to}'",
            batch.lines().count()
        );
        let (status, body) = send_raw(&self.api_url, &self.api_key, &request)?;
        parse_response(status, &body).inspect_err(|err| {
            log::warn!("Translation request failed: {err}");
        })
    }
}
