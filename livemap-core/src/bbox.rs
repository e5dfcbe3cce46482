use geo::{coord, BoundingRect, Intersects, Rect};

use crate::entities::*;

pub fn to_rect(bbox: &MapBbox) -> Rect<f64> {
    Rect::new(
        coord! { x: bbox.west(), y: bbox.south() },
        coord! { x: bbox.east(), y: bbox.north() },
    )
}

/// The smallest rectangle that contains the whole geometry.
///
/// `None` for empty geometries.
pub fn envelope(feature: &Feature) -> Option<Rect<f64>> {
    feature.geometry.bounding_rect()
}

pub trait InBBox {
    fn in_bbox(&self, bbox: &MapBbox) -> bool;
}

impl InBBox for Feature {
    /// Boundary contact counts as intersection.
    fn in_bbox(&self, bbox: &MapBbox) -> bool {
        self.geometry.intersects(&to_rect(bbox))
    }
}
