use super::{
    merge_translations::{join_batch, split_batch},
    prelude::*,
};
use crate::gateways::translate::TranslationGateway;

/// Pairs of original and translated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedText {
    pub original: String,
    pub translated: String,
}

/// Translate arbitrary texts on behalf of a client.
///
/// Unlike [`merge_translations`](super::merge_translations) a failing
/// gateway is reported to the caller. Missing or empty lines in the
/// response fall back to the original text at that position.
pub fn translate_texts<G>(
    gateway: &G,
    from: &Language,
    to: &Language,
    texts: Vec<String>,
) -> Result<Vec<TranslatedText>>
where
    G: TranslationGateway + ?Sized,
{
    if texts.is_empty() {
        return Err(Error::EmptyTexts);
    }
    let mut translated = if from == to {
        vec![]
    } else {
        let response = gateway.translate_batch(from, to, &join_batch(&texts))?;
        split_batch(&response)
    }
    .into_iter();
    if translated.len() != texts.len() && from != to {
        log::warn!(
            "Expected {} translated texts but received {}",
            texts.len(),
            translated.len()
        );
    }
    Ok(texts
        .into_iter()
        .map(|original| {
            let translated = translated
                .next()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| original.clone());
            TranslatedText {
                original,
                translated,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{super::tests::*, *};

    fn en() -> Language {
        "en".parse().unwrap()
    }

    fn kn() -> Language {
        "kn".parse().unwrap()
    }

    #[test]
    fn translate_all_texts() {
        let gw = UppercaseTranslator::default();
        let res = translate_texts(&gw, &en(), &kn(), vec!["park".into(), "road".into()]).unwrap();
        assert_eq!(
            res,
            vec![
                TranslatedText {
                    original: "park".into(),
                    translated: "PARK".into()
                },
                TranslatedText {
                    original: "road".into(),
                    translated: "ROAD".into()
                },
            ]
        );
        assert_eq!(gw.calls.get(), 1);
    }

    #[test]
    fn reject_empty_texts() {
        let gw = UppercaseTranslator::default();
        let err = translate_texts(&gw, &en(), &kn(), vec![]).unwrap_err();
        assert!(matches!(err, Error::EmptyTexts));
        assert!(err.is_invalid_request());
        assert_eq!(gw.calls.get(), 0);
    }

    #[test]
    fn report_gateway_errors() {
        let err = translate_texts(&FailingTranslator, &en(), &kn(), vec!["park".into()]).unwrap_err();
        assert!(matches!(err, Error::Translation(_)));
        assert!(!err.is_invalid_request());
    }

    #[test]
    fn fill_missing_lines_with_originals() {
        let gw = FixedTranslator("ಉದ್ಯಾನ".into());
        let res = translate_texts(&gw, &en(), &kn(), vec!["park".into(), "road".into()]).unwrap();
        assert_eq!(res[0].translated, "ಉದ್ಯಾನ");
        assert_eq!(res[1].translated, "road");
    }

    #[test]
    fn same_language_needs_no_gateway() {
        let gw = UppercaseTranslator::default();
        let res = translate_texts(&gw, &en(), &en(), vec!["park".into()]).unwrap();
        assert_eq!(res[0].translated, "park");
        assert_eq!(gw.calls.get(), 0);
    }
}
