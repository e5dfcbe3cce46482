use thiserror::Error;

use crate::{
    entities::{BboxParseError, LanguageParseError},
    gateways::{poi, translate},
    repositories,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing bounding box")]
    MissingBbox,
    #[error("Bounding box is invalid: {0}")]
    Bbox(#[from] BboxParseError),
    #[error("Language is invalid: {0}")]
    Language(#[from] LanguageParseError),
    #[error("No texts to translate")]
    EmptyTexts,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
    #[error(transparent)]
    Translation(#[from] translate::Error),
    #[error(transparent)]
    Poi(#[from] poi::Error),
}

impl Error {
    /// The request itself is malformed and must not be retried unchanged.
    pub const fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Self::MissingBbox | Self::Bbox(_) | Self::Language(_) | Self::EmptyTexts
        )
    }
}
