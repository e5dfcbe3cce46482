use livemap_core::{
    entities::Language,
    gateways::translate::{Error, TranslationGateway},
};

/// Stands in for a translation provider without credentials.
///
/// Every request fails, so viewport streams fall back to the
/// original names while the server keeps running.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl TranslationGateway for Unconfigured {
    fn translate_batch(&self, _: &Language, to: &Language, _: &str) -> Result<String, Error> {
        log::debug!("Cannot translate to '{to}' without a configured provider");
        Err(Error::NotConfigured)
    }
}
