use std::cell::{Cell, RefCell};

use super::prelude::*;
use crate::{
    gateways::{
        poi::{self, Poi, PoiGateway},
        translate::{self, TranslationGateway},
    },
    RepoError,
};

type RepoResult<T> = std::result::Result<T, RepoError>;

#[derive(Default)]
pub struct MockDb {
    pub features: RefCell<Vec<Feature>>,
    pub unavailable: Cell<bool>,
}

impl FeatureRepo for MockDb {
    /// Returns all stored features, leaving the exact test to the caller.
    fn features_in_bbox(&self, _: &MapBbox) -> RepoResult<Vec<Feature>> {
        if self.unavailable.get() {
            return Err(RepoError::Unavailable);
        }
        Ok(self.features.borrow().clone())
    }

    fn create_or_update_feature(&self, feature: &Feature) -> RepoResult<()> {
        let mut features = self.features.borrow_mut();
        match features.iter_mut().find(|f| f.id == feature.id) {
            Some(f) => *f = feature.clone(),
            None => features.push(feature.clone()),
        }
        Ok(())
    }

    fn count_features(&self) -> RepoResult<usize> {
        Ok(self.features.borrow().len())
    }
}

/// Translates by converting every line to upper case.
#[derive(Default)]
pub struct UppercaseTranslator {
    pub calls: Cell<usize>,
}

impl TranslationGateway for UppercaseTranslator {
    fn translate_batch(
        &self,
        _: &Language,
        _: &Language,
        batch: &str,
    ) -> std::result::Result<String, translate::Error> {
        self.calls.set(self.calls.get() + 1);
        Ok(batch.to_uppercase())
    }
}

pub struct FailingTranslator;

impl TranslationGateway for FailingTranslator {
    fn translate_batch(
        &self,
        _: &Language,
        _: &Language,
        _: &str,
    ) -> std::result::Result<String, translate::Error> {
        Err(translate::Error::Status(503))
    }
}

/// Always responds with the same text.
pub struct FixedTranslator(pub String);

impl TranslationGateway for FixedTranslator {
    fn translate_batch(
        &self,
        _: &Language,
        _: &Language,
        _: &str,
    ) -> std::result::Result<String, translate::Error> {
        Ok(self.0.clone())
    }
}

pub struct MockPoiGateway {
    pois: Vec<Poi>,
    pub requested: RefCell<Option<MapBbox>>,
}

impl MockPoiGateway {
    pub fn new(pois: Vec<Poi>) -> Self {
        Self {
            pois,
            requested: RefCell::new(None),
        }
    }
}

impl PoiGateway for MockPoiGateway {
    fn pois_in_bbox(&self, bbox: &MapBbox) -> std::result::Result<Vec<Poi>, poi::Error> {
        *self.requested.borrow_mut() = Some(*bbox);
        Ok(self.pois.clone())
    }
}
