use std::{ops::Deref, sync::Arc};

use crate::core::gateways::{poi::PoiGateway, translate::TranslationGateway};

pub type SharedTranslationGateway = Arc<dyn TranslationGateway + Send + Sync>;
pub type SharedPoiGateway = Arc<dyn PoiGateway + Send + Sync>;

/// Managed state, cloned into the blocking tasks of a request.
pub struct Translation(pub SharedTranslationGateway);

impl Deref for Translation {
    type Target = SharedTranslationGateway;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct Poi(pub SharedPoiGateway);

impl Deref for Poi {
    type Target = SharedPoiGateway;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub struct Version(pub &'static str);
