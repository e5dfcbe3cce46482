use itertools::Itertools;

use super::{prelude::*, ViewportQuery};
use crate::bbox::InBBox;

/// All features whose geometry intersects the bounding box.
///
/// The repository may return a superset of candidates, the exact
/// intersection test happens here. Every id occurs at most once.
pub fn query_features<R>(repo: &R, bbox: &MapBbox) -> Result<Vec<Feature>>
where
    R: FeatureRepo + ?Sized,
{
    let features = repo
        .features_in_bbox(bbox)?
        .into_iter()
        .filter(|f| f.in_bbox(bbox))
        .unique_by(|f| f.id.clone())
        .collect();
    Ok(features)
}

/// The untranslated feature collection for a viewport.
pub fn query_feature_collection<R>(repo: &R, query: &ViewportQuery) -> Result<FeatureCollection>
where
    R: FeatureRepo + ?Sized,
{
    let features = query_features(repo, &query.bbox)?;
    log::debug!(
        "Found {} feature(s) in bbox {}",
        features.len(),
        query.bbox
    );
    Ok(FeatureCollection {
        bbox: query.bbox,
        lang: query.lang.clone(),
        features,
    })
}
