use crate::metadata::{TagMap, TagValue};
use std::fmt;

pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }

    /// Great-circle distance in meters (haversine).
    pub fn distance(&self, other: &Coordinate) -> f64 {
        let (lat1, lon1) = (self.lat.to_radians(), self.lon.to_radians());
        let (lat2, lon2) = (other.lat.to_radians(), other.lon.to_radians());

        let dlat = lat2 - lat1;
        let dlon = lon2 - lon1;

        // rounding can push `a` just past 1 for antipodal points
        let a = ((dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2))
            .clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS * c
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}_{:.6}", self.lat, self.lon)
    }
}

pub fn dms_to_dd(deg: f64, min: f64, sec: f64) -> f64 {
    deg + min / 60.0 + sec / 3600.0
}

fn component(gps: &TagMap, value_tag: &str, ref_tag: &str, negative: &str) -> Option<f64> {
    let dms = gps.get(value_tag).and_then(TagValue::as_numbers)?;
    let reference = gps.get(ref_tag).and_then(TagValue::as_text)?;

    let &[d, m, s, ..] = dms else {
        return None;
    };
    let dd = dms_to_dd(d, m, s);

    if reference.trim().eq_ignore_ascii_case(negative) {
        Some(-dd)
    } else {
        Some(dd)
    }
}

/// Builds a signed coordinate from the GPS tag map. All four of
/// `GPSLatitude`, `GPSLatitudeRef`, `GPSLongitude` and `GPSLongitudeRef` must
/// be present; `S` and `W` references negate.
///
/// A value of exactly 0 degrees is a valid coordinate (equator or prime
/// meridian) and is kept.
pub fn extract_coordinates(gps: &TagMap) -> Option<Coordinate> {
    let lat = component(gps, "GPSLatitude", "GPSLatitudeRef", "S")?;
    let lon = component(gps, "GPSLongitude", "GPSLongitudeRef", "W")?;
    Some(Coordinate::new(lat, lon))
}
