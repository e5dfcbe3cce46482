// Low-level access traits of the spatial data store.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The spatial data store is unavailable")]
    Unavailable,
    #[error("The stored geometry of feature '{0}' is invalid")]
    InvalidGeometry(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait FeatureRepo {
    /// Candidates for a bounding box query.
    ///
    /// Implementations are allowed to return a superset, e.g.
    /// all features whose envelope overlaps the rectangle.
    fn features_in_bbox(&self, bbox: &MapBbox) -> Result<Vec<Feature>>;

    fn create_or_update_feature(&self, feature: &Feature) -> Result<()>;

    fn count_features(&self) -> Result<usize>;
}
