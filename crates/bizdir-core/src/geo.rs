//! Great-circle distance math.

use crate::types::Coordinate;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometres.
///
/// Always finite and non-negative: [`Coordinate`] construction already
/// rejected out-of-range or non-finite components, and the haversine term is
/// clamped to [0, 1] so floating error near antipodal or identical points
/// can never reach `sqrt` of a negative number.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude().to_radians().cos() * b.latitude().to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid test coordinate")
    }

    #[test]
    fn identical_points_are_zero_distance() {
        let p = coord(-33.9249, 18.4241);
        assert!((distance_km(p, p)).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let cape_town = coord(-33.9249, 18.4241);
        let johannesburg = coord(-26.2041, 28.0473);
        let there = distance_km(cape_town, johannesburg);
        let back = distance_km(johannesburg, cape_town);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn cape_town_to_johannesburg_is_about_1260_km() {
        let d = distance_km(coord(-33.9249, 18.4241), coord(-26.2041, 28.0473));
        assert!((1200.0..1330.0).contains(&d), "got {d} km");
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let d = distance_km(coord(0.0, 0.0), coord(0.0, 180.0));
        assert!(d.is_finite());
        // Half the Earth's circumference, roughly.
        assert!((d - std::f64::consts::PI * 6371.0).abs() < 1.0);
    }

    #[test]
    fn short_hop_is_positive_and_small() {
        // Two points ~1.1 km apart along a meridian (0.01 degrees latitude).
        let d = distance_km(coord(-33.92, 18.42), coord(-33.93, 18.42));
        assert!(d > 0.0);
        assert!((d - 1.11).abs() < 0.05, "got {d} km");
    }
}
