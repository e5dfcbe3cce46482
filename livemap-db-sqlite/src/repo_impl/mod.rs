use diesel::{
    self,
    prelude::*,
    result::Error as DieselError,
};

use livemap_core::{
    bbox::envelope,
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod feature;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        _ => repo::Error::Other(err.into()),
    }
}

impl FeatureRepo for DbReadOnly<'_> {
    fn features_in_bbox(&self, bbox: &MapBbox) -> Result<Vec<Feature>> {
        feature::features_in_bbox(&mut self.sqlite_conn(), bbox)
    }
    fn create_or_update_feature(&self, feature: &Feature) -> Result<()> {
        feature::create_or_update_feature(&mut self.sqlite_conn(), feature)
    }
    fn count_features(&self) -> Result<usize> {
        feature::count_features(&mut self.sqlite_conn())
    }
}

impl FeatureRepo for DbReadWrite<'_> {
    fn features_in_bbox(&self, bbox: &MapBbox) -> Result<Vec<Feature>> {
        feature::features_in_bbox(&mut self.sqlite_conn(), bbox)
    }
    fn create_or_update_feature(&self, feature: &Feature) -> Result<()> {
        feature::create_or_update_feature(&mut self.sqlite_conn(), feature)
    }
    fn count_features(&self) -> Result<usize> {
        feature::count_features(&mut self.sqlite_conn())
    }
}

impl FeatureRepo for DbConnection<'_> {
    fn features_in_bbox(&self, bbox: &MapBbox) -> Result<Vec<Feature>> {
        feature::features_in_bbox(&mut self.sqlite_conn(), bbox)
    }
    fn create_or_update_feature(&self, feature: &Feature) -> Result<()> {
        feature::create_or_update_feature(&mut self.sqlite_conn(), feature)
    }
    fn count_features(&self) -> Result<usize> {
        feature::count_features(&mut self.sqlite_conn())
    }
}
