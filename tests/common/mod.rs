use approx::assert_abs_diff_eq;
use equinox::SphericalPair;

/// Assert two directions coincide to `epsilon` radians, comparing longitudes modulo 2π.
pub fn assert_pair_close(actual: &SphericalPair, expected: &SphericalPair, epsilon: f64) {
    let dlon = (actual.lon - expected.lon).sin().atan2((actual.lon - expected.lon).cos());
    assert_abs_diff_eq!(dlon * expected.lat.cos(), 0.0, epsilon = epsilon);
    assert_abs_diff_eq!(actual.lat, expected.lat, epsilon = epsilon);
}
