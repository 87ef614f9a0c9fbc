//! Distance computations.
//!
//! Two different metrics live here on purpose. Simplification measures
//! point-to-segment distance on raw degrees treated as a flat plane, which
//! is only meaningful over short distances. Route length uses the
//! haversine great-circle distance in meters. Keep them separate: changing
//! the simplification metric changes which points a given epsilon keeps.

use crate::fix::Fix;

/// Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Approximate length of one degree of latitude in meters.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Haversine distance between two coordinates given in degrees, in meters.
pub fn haversine_distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlon / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Haversine distance between two fixes in meters.
pub fn haversine(a: &Fix, b: &Fix) -> f64 {
    haversine_distance_meters(a.latitude, a.longitude, b.latitude, b.longitude)
}

/// Total length of a trace in meters, summed over consecutive fixes.
pub fn trace_length_m(points: &[Fix]) -> f64 {
    points.windows(2).map(|w| haversine(&w[0], &w[1])).sum()
}

/// Straight-line distance between two fixes in degree space.
pub fn euclidean_distance(a: &Fix, b: &Fix) -> f64 {
    (a.longitude - b.longitude).hypot(a.latitude - b.latitude)
}

/// Distance from `p` to the segment `a`-`b`, in degrees, on a flat plane.
///
/// The projection parameter is clamped to the segment, so points beyond
/// either end measure to the nearest endpoint. A zero-length segment
/// degenerates to the distance from `p` to `a`.
pub fn perpendicular_distance(p: &Fix, a: &Fix, b: &Fix) -> f64 {
    let dx = b.longitude - a.longitude;
    let dy = b.latitude - a.latitude;
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        return euclidean_distance(p, a);
    }

    let px = p.longitude - a.longitude;
    let py = p.latitude - a.latitude;
    let u = ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0);

    (px - u * dx).hypot(py - u * dy)
}

/// Convert a distance in meters to a flat-degree tolerance.
///
/// Uses the north-south scale, the largest number of meters per degree
/// anywhere on the globe. A point within the returned number of degrees
/// is therefore within `meters` in every direction and at every latitude.
/// East-west at high latitudes the bound is looser than it needs to be.
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}
