use std::{fmt, str::FromStr};

use thiserror::Error;

const LAT_DEG_MIN: f64 = -90.0;
const LAT_DEG_MAX: f64 = 90.0;
const LNG_DEG_MIN: f64 = -180.0;
const LNG_DEG_MAX: f64 = 180.0;

/// A geographical location in WGS84 degrees (EPSG:4326).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub const fn from_lat_lng_deg(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        let pt = Self::from_lat_lng_deg(lat, lng);
        pt.is_valid().then_some(pt)
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (LAT_DEG_MIN..=LAT_DEG_MAX).contains(&self.lat)
            && (LNG_DEG_MIN..=LNG_DEG_MAX).contains(&self.lng)
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BboxParseError {
    #[error("Expected 4 comma-separated coordinates but found {0}")]
    Count(usize),
    #[error("Invalid coordinate '{0}'")]
    Number(String),
    #[error("Coordinate out of range")]
    Range,
    #[error("The south-west corner must be strictly below and left of the north-east corner")]
    Order,
}

/// The visible rectangle of a map viewport.
///
/// Corners are ordered: `west < east` and `south < north`.
/// Rectangles crossing the antimeridian are not supported.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MapBbox {
    sw: MapPoint,
    ne: MapPoint,
}

impl MapBbox {
    pub const fn new(sw: MapPoint, ne: MapPoint) -> Self {
        Self { sw, ne }
    }

    pub fn try_from_west_south_east_north(
        west: f64,
        south: f64,
        east: f64,
        north: f64,
    ) -> Result<Self, BboxParseError> {
        let sw = MapPoint::from_lat_lng_deg(south, west);
        let ne = MapPoint::from_lat_lng_deg(north, east);
        if !sw.is_valid() || !ne.is_valid() {
            return Err(BboxParseError::Range);
        }
        let bbox = Self::new(sw, ne);
        if !bbox.is_valid() {
            return Err(BboxParseError::Order);
        }
        Ok(bbox)
    }

    pub const fn southwest(&self) -> MapPoint {
        self.sw
    }

    pub const fn northeast(&self) -> MapPoint {
        self.ne
    }

    pub const fn west(&self) -> f64 {
        self.sw.lng
    }

    pub const fn south(&self) -> f64 {
        self.sw.lat
    }

    pub const fn east(&self) -> f64 {
        self.ne.lng
    }

    pub const fn north(&self) -> f64 {
        self.ne.lat
    }

    /// Coordinates in the order `[west, south, east, north]`.
    pub const fn to_array(&self) -> [f64; 4] {
        [self.west(), self.south(), self.east(), self.north()]
    }

    pub fn is_valid(&self) -> bool {
        self.sw.is_valid()
            && self.ne.is_valid()
            && self.sw.lat < self.ne.lat
            && self.sw.lng < self.ne.lng
    }

    /// Inclusive containment test.
    pub fn contains_point(&self, pt: MapPoint) -> bool {
        debug_assert!(self.is_valid());
        pt.lat >= self.sw.lat
            && pt.lat <= self.ne.lat
            && pt.lng >= self.sw.lng
            && pt.lng <= self.ne.lng
    }
}

impl fmt::Display for MapBbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.sw, self.ne)
    }
}

impl FromStr for MapBbox {
    type Err = BboxParseError;

    /// Parses `west,south,east,north`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<_> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::Count(parts.len()));
        }
        let mut coords = [0.0; 4];
        for (coord, part) in coords.iter_mut().zip(&parts) {
            *coord = part
                .parse::<f64>()
                .ok()
                .filter(|c| c.is_finite())
                .ok_or_else(|| BboxParseError::Number((*part).to_owned()))?;
        }
        let [west, south, east, north] = coords;
        Self::try_from_west_south_east_north(west, south, east, north)
    }
}
