//! Great-circle distance shared by every proximity judgment in the crate.

use geo::Point;

/// Mean Earth radius used by the haversine formula, in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two points.
///
/// Points follow the `geo` convention: `x` is longitude, `y` is latitude,
/// both in degrees.
pub fn haversine_km(a: Point<f64>, b: Point<f64>) -> f64 {
    let (lat1, lat2) = (a.y().to_radians(), b.y().to_radians());
    let d_lat = (b.y() - a.y()).to_radians();
    let d_lon = (b.x() - a.x()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push h a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Smallest haversine distance from `point` to any of `vertices`.
///
/// Returns `None` for an empty vertex list.
pub fn min_distance_km<I>(point: Point<f64>, vertices: I) -> Option<f64>
where
    I: IntoIterator<Item = Point<f64>>,
{
    vertices
        .into_iter()
        .map(|v| haversine_km(point, v))
        .min_by(f64::total_cmp)
}
