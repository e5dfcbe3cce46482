use super::prelude::*;

/// A validated viewport request.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportQuery {
    pub bbox: MapBbox,
    pub lang: Language,
}

/// Validate the raw `bbox` and `lang` parameters of a viewport request.
///
/// A missing or blank `lang` falls back to the source language.
pub fn parse_viewport_query(
    bbox: Option<&str>,
    lang: Option<&str>,
    source_lang: &Language,
) -> Result<ViewportQuery> {
    let bbox = bbox
        .filter(|s| !s.trim().is_empty())
        .ok_or(Error::MissingBbox)?
        .parse::<MapBbox>()?;
    let lang = match lang.map(str::trim).filter(|s| !s.is_empty()) {
        Some(lang) => lang.parse()?,
        None => source_lang.clone(),
    };
    Ok(ViewportQuery { bbox, lang })
}
