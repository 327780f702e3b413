use nalgebra::{Matrix3, Vector3};

use crate::constants::{
    ArcSec, Degree, Radian, Year, ARCSEC_PER_DEGREE, DPI, J2000_YEAR, RADEG, RADSEC,
};
use crate::frame_matrices::{
    to_matrix, B1950_TO_J2000, GALACTIC_TO_J2000, J2000_TO_B1950, J2000_TO_GALACTIC,
    NEW_TO_OLD_GALACTIC, OLD_TO_NEW_GALACTIC,
};

/// Below this value of `cos(lat)` a direction is treated as an exact pole.
const POLE_COS_EPS: f64 = 1e-12;

/// A direction on the celestial sphere.
///
/// `lon` is right-ascension-like (or Galactic longitude), `lat` declination-like
/// (or Galactic latitude), both in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphericalPair {
    pub lon: Radian,
    pub lat: Radian,
}

impl SphericalPair {
    pub fn new(lon: Radian, lat: Radian) -> Self {
        SphericalPair { lon, lat }
    }

    /// Build a pair from two angles given in arcseconds.
    pub fn from_arcsec(lon: ArcSec, lat: ArcSec) -> Self {
        SphericalPair {
            lon: lon * RADSEC,
            lat: lat * RADSEC,
        }
    }

    /// Unit Cartesian vector pointing in this direction.
    pub fn to_cartesian(&self) -> Vector3<f64> {
        let cos_lat = self.lat.cos();
        Vector3::new(
            self.lon.cos() * cos_lat,
            self.lon.sin() * cos_lat,
            self.lat.sin(),
        )
    }
}

/// Reference frames known to the converter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefSystem {
    /// Equatorial, mean equator and equinox of J2000.0
    J2000,
    /// Equatorial, mean equator and equinox of B1950.0
    B1950,
    /// Equatorial, mean equator and equinox of an arbitrary decimal year
    Equinox(Year),
    /// IAU 1958 Galactic coordinates
    Galactic,
    /// Galactic coordinates in use before 1958
    OldGalactic,
}

/// Convert a Cartesian vector to a spherical pair.
///
/// Arguments
/// ---------
/// * `cartesian`: any non-null vector; it does not need to be of unit length.
///
/// Return
/// ------
/// * the direction of `cartesian`, longitude in `[0, 2π)` and latitude in `[−π/2, π/2]`.
///
/// Remarks
/// -------
/// * The vector is normalized first, so rounding drift away from unit length is absorbed.
/// * At an exact pole the longitude is undefined and reported as `0`.
/// * A null vector gives `(0, 0)`.
pub(crate) fn cartesian_to_spherical(cartesian: Vector3<f64>) -> SphericalPair {
    let r = cartesian.norm();
    if r == 0. {
        return SphericalPair::default();
    }

    let lat = (cartesian.z / r).clamp(-1.0, 1.0).asin();

    let cos_lat = lat.cos();
    if cos_lat < POLE_COS_EPS {
        return SphericalPair::new(0.0, lat);
    }

    let cos_lon = cartesian.x / r / cos_lat;
    let sin_lon = cartesian.y / r / cos_lat;
    let lon = sin_lon.atan2(cos_lon);
    let lon = if lon < 0.0 { lon + DPI } else { lon };
    // tiny negative angles round up to a full turn
    let lon = if lon >= DPI { 0.0 } else { lon };
    SphericalPair::new(lon, lat)
}

/// Rotate a spherical pair into another frame.
///
/// The pair is turned into a unit vector `x`, post-multiplied by `matrix` as a row vector
/// (`x'[j] = Σᵢ x[i] · m[i, j]`) and turned back into a pair.
///
/// Arguments
/// ---------
/// * `pair`: the direction in the source frame.
/// * `matrix`: a direction-cosine matrix whose columns are the target axes expressed in the
///   source frame, as in [`crate::frame_matrices`].
///
/// Return
/// ------
/// * the direction in the target frame; latitude always in `[−π/2, π/2]`,
///   longitude in `[0, 2π)` (`0` at the poles).
pub fn transform(pair: &SphericalPair, matrix: &Matrix3<f64>) -> SphericalPair {
    let row = pair.to_cartesian().transpose() * matrix;
    cartesian_to_spherical(row.transpose())
}

/// Build a direction-cosine matrix from three successive rotation angles.
///
/// ```text
///  cC·cB·cA − sC·sA    sC·cB·cA + cC·sA   −sB·cA
/// −cC·cB·sA − sC·cA   −sC·cB·sA + cC·cA    sB·sA
///  cC·sB               sC·sB               cB
/// ```
///
/// This is the product `Rz(−a) · Ry(−b) · Rz(−c)` of active elemental rotations.
pub fn build_matrix(a: Radian, b: Radian, c: Radian) -> Matrix3<f64> {
    let (s_a, c_a) = a.sin_cos();
    let (s_b, c_b) = b.sin_cos();
    let (s_c, c_c) = c.sin_cos();

    Matrix3::new(
        c_c * c_b * c_a - s_c * s_a,
        s_c * c_b * c_a + c_c * s_a,
        -s_b * c_a,
        -c_c * c_b * s_a - s_c * c_a,
        -s_c * c_b * s_a + c_c * c_a,
        s_b * s_a,
        c_c * s_b,
        s_c * s_b,
        c_b,
    )
}

/// Precession angles ζ, θ and z between two epochs (IAU 1976, Lieske).
///
/// Time arguments are decimal-year differences divided by 100, used in place of Julian
/// centuries:
///
/// ```text
/// T = (fixed − 2000) / 100        t = (target − fixed) / 100
/// ζ = (2306.218 + 1.397 T) t + 1.095 t²
/// θ = (2004.311 − 0.853 T) t − 0.427 t²
/// z = (2306.218 + 1.397 T) t + 0.302 t²
/// ```
///
/// Return
/// ------
/// * `(ζ, θ, z)` in arcseconds
pub fn precession_angles(fixed: Year, target: Year) -> (ArcSec, ArcSec, ArcSec) {
    let big_t = (fixed - J2000_YEAR) / 100.0;
    let t = (target - fixed) / 100.0;

    let zeta = (2306.218 + 1.397 * big_t) * t + 1.095 * t * t;
    let theta = (2004.311 - 0.853 * big_t) * t - 0.427 * t * t;
    let z = (2306.218 + 1.397 * big_t) * t + 0.302 * t * t;
    (zeta, theta, z)
}

/// Precession matrix for the epoch pair `(fixed, target)`.
///
/// Under the row-vector convention of [`transform`], the matrix built for
/// `(2000, Y)` carries an equinox-`Y` direction to J2000, and the one built for `(Y, 2000)`
/// carries a J2000 direction to equinox `Y`. `build_precession_matrix(Y, Y)` is the identity.
///
/// See also
/// --------
/// * [`precession_angles`] – the polynomial angles
/// * [`build_matrix`] – the coefficient layout, fed with `(z, −θ, ζ)`
pub fn build_precession_matrix(fixed: Year, target: Year) -> Matrix3<f64> {
    let (zeta, theta, z) = precession_angles(fixed, target);
    build_matrix(z * RADSEC, -theta * RADSEC, zeta * RADSEC)
}

/// Closed-form conversion from new to old Galactic coordinates (Green, *Spherical
/// Astronomy*, p. 47).
///
/// ```text
/// b_old = b − 1.5° · cos(l − 20°)
/// l_old = l − 32.3° − 1.5° · tan(b) · sin(l − 20°)
/// ```
///
/// Remarks
/// -------
/// * Poor near the Galactic poles: `b_old` is clamped to ±90°, and within 1° of a pole
///   `l_old` is reported as `0`.
/// * [`transform`] with [`NEW_TO_OLD_GALACTIC`] gives the exact counterpart.
pub fn approx_new_to_old_galactic(galactic: &SphericalPair) -> SphericalPair {
    let SphericalPair { lon: l, lat: b } = *galactic;
    let half_pi = std::f64::consts::FRAC_PI_2;

    let lat = (b - 1.5 * RADEG * (l - 20.0 * RADEG).cos()).clamp(-half_pi, half_pi);

    let near_pole = b.abs() > 89.0 * RADEG;
    let lon = if near_pole {
        0.0
    } else {
        let lon = l - 32.3 * RADEG - 1.5 * RADEG * b.tan() * (l - 20.0 * RADEG).sin();
        if lon < 0.0 {
            lon + DPI
        } else if lon >= DPI {
            lon - DPI
        } else {
            lon
        }
    };

    SphericalPair::new(lon, lat)
}

/// Bring a direction expressed in `from` to the canonical J2000 frame.
pub fn to_j2000(pair: &SphericalPair, from: RefSystem) -> SphericalPair {
    match from {
        RefSystem::J2000 => *pair,
        RefSystem::B1950 => transform(pair, &to_matrix(&B1950_TO_J2000)),
        RefSystem::Galactic => transform(pair, &to_matrix(&GALACTIC_TO_J2000)),
        RefSystem::OldGalactic => {
            let new_galactic = transform(pair, &to_matrix(&OLD_TO_NEW_GALACTIC));
            transform(&new_galactic, &to_matrix(&GALACTIC_TO_J2000))
        }
        RefSystem::Equinox(year) => transform(pair, &build_precession_matrix(J2000_YEAR, year)),
    }
}

/// Express a J2000 direction in the `to` frame.
///
/// Old Galactic coordinates go through the new Galactic frame and the exact matrix;
/// see [`approx_new_to_old_galactic`] for the closed-form estimate.
pub fn from_j2000(pair: &SphericalPair, to: RefSystem) -> SphericalPair {
    match to {
        RefSystem::J2000 => *pair,
        RefSystem::B1950 => transform(pair, &to_matrix(&J2000_TO_B1950)),
        RefSystem::Galactic => transform(pair, &to_matrix(&J2000_TO_GALACTIC)),
        RefSystem::OldGalactic => {
            let new_galactic = transform(pair, &to_matrix(&J2000_TO_GALACTIC));
            transform(&new_galactic, &to_matrix(&NEW_TO_OLD_GALACTIC))
        }
        RefSystem::Equinox(year) => transform(pair, &build_precession_matrix(year, J2000_YEAR)),
    }
}

/// Convert degrees given as `(lon, lat)` into a [`SphericalPair`]; handy for tests and
/// callers holding decimal degrees.
pub fn pair_from_degrees(lon: Degree, lat: Degree) -> SphericalPair {
    SphericalPair::from_arcsec(lon * ARCSEC_PER_DEGREE, lat * ARCSEC_PER_DEGREE)
}
