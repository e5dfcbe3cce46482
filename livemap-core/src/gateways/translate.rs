use crate::entities::Language;
use thiserror::Error;

/// Separates the texts of a batch in both the request and the response.
pub const BATCH_DELIMITER: char = '\n';

#[derive(Debug, Error)]
pub enum Error {
    #[error("No translation provider configured")]
    NotConfigured,
    #[error("Translation provider unreachable: {0}")]
    Unreachable(String),
    #[error("Translation provider responded with HTTP status {0}")]
    Status(u16),
    #[error("Malformed response from translation provider: {0}")]
    MalformedBody(String),
    #[error("Response of translation provider contains no result")]
    MissingResult,
}

pub trait TranslationGateway {
    /// Translates a batch of texts joined by [`BATCH_DELIMITER`].
    ///
    /// Returns the translated batch joined by the same delimiter.
    fn translate_batch(&self, from: &Language, to: &Language, batch: &str) -> Result<String, Error>;
}
