use thiserror::Error;

use super::prelude::*;
use crate::gateways::translate::{self, TranslationGateway, BATCH_DELIMITER};

/// Reasons why a collection is delivered without translated names.
///
/// Never fatal for a stream, only logged.
#[derive(Debug, Error)]
pub enum TranslationDegraded {
    #[error(transparent)]
    Gateway(#[from] translate::Error),
    #[error("Expected {expected} translated names but received {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

/// Names must not contain the batch delimiter, otherwise
/// the positional alignment of the response breaks.
fn sanitize_name(name: &str) -> String {
    name.replace(['\r', BATCH_DELIMITER], " ")
}

pub(crate) fn join_batch<S: AsRef<str>>(texts: &[S]) -> String {
    texts
        .iter()
        .map(|t| sanitize_name(t.as_ref()))
        .collect::<Vec<_>>()
        .join(&BATCH_DELIMITER.to_string())
}

pub(crate) fn split_batch(batch: &str) -> Vec<String> {
    batch.split(BATCH_DELIMITER).map(str::to_owned).collect()
}

/// Translates all texts with a single gateway call.
///
/// The result has exactly the same length and order as `texts`.
pub fn translate_batch<G, S>(
    gateway: &G,
    from: &Language,
    to: &Language,
    texts: &[S],
) -> std::result::Result<Vec<String>, TranslationDegraded>
where
    G: TranslationGateway + ?Sized,
    S: AsRef<str>,
{
    let response = gateway.translate_batch(from, to, &join_batch(texts))?;
    let translated = split_batch(&response);
    if translated.len() != texts.len() {
        return Err(TranslationDegraded::CountMismatch {
            expected: texts.len(),
            actual: translated.len(),
        });
    }
    Ok(translated)
}

/// Attach translated names to every feature of the collection.
///
/// Features with a blank translation keep their original name only.
/// If the requested language equals the source language or the
/// collection is empty the gateway is not called at all. If the
/// translation fails the collection is returned with its original
/// names. Geometry, ids and order of the features never change.
pub fn merge_translations<G>(
    gateway: &G,
    source_lang: &Language,
    mut collection: FeatureCollection,
) -> FeatureCollection
where
    G: TranslationGateway + ?Sized,
{
    if collection.lang == *source_lang || collection.is_empty() {
        return collection;
    }
    let names: Vec<_> = collection.names().collect();
    match translate_batch(gateway, source_lang, &collection.lang, &names) {
        Ok(translated) => {
            for (feature, name) in collection.features.iter_mut().zip(translated) {
                // A blank line means no translation is available
                feature.translated_name = Some(name).filter(|t| !t.trim().is_empty());
            }
        }
        Err(err) => {
            log::warn!(
                "Translation degraded, delivering {} feature(s) with original names: {err}",
                collection.len()
            );
            for feature in &mut collection.features {
                feature.translated_name = None;
            }
        }
    }
    collection
}
