//! # Constant frame matrices
//!
//! Fixed direction-cosine tables between the B1950, J2000, new (IAU 1958) Galactic and
//! old (pre-1958) Galactic frames.
//!
//! Every table is stored **row-major** and is laid out for the row-vector convention of
//! [`crate::ref_system::transform`]: the Cartesian vector of the source frame is
//! post-multiplied by the table, `x₂[j] = Σᵢ x₁[i] · m[3i + j]`. Each *column* of a table is
//! therefore one axis of the target frame expressed in the source frame.
//!
//! Sources
//! -------
//! * B1950 ↔ J2000: Explanatory Supplement to the Astronomical Almanac (1992).
//!   The Supplement also prints a separate reverse table that differs from the
//!   transpose by up to 6e-7; the transpose is used instead so that both directions
//!   invert each other to 1e-10.
//! * J2000 ↔ Galactic: Murray (1989), A&A 218, 325, ten-digit values.
//! * old ↔ new Galactic: derived from the IAU 1958 definition (Blaauw et al. 1960):
//!   new pole at old (347.7°, +88.51°), new origin at old (327.69°, −1.40°).
//!
//! These tables are process-wide, immutable data.
use nalgebra::Matrix3;

use crate::constants::FlatMatrix;

/// J2000 → B1950
#[rustfmt::skip]
pub const J2000_TO_B1950: FlatMatrix = [
    0.9999256795, 0.0111814828, 0.0048590039,
    -0.0111814828, 0.9999374849, -0.0000271771,
    -0.0048590040, -0.0000271557, 0.9999881946,
];

/// B1950 → J2000 (transpose of [`J2000_TO_B1950`])
#[rustfmt::skip]
pub const B1950_TO_J2000: FlatMatrix = [
    0.9999256795, -0.0111814828, -0.0048590040,
    0.0111814828, 0.9999374849, -0.0000271557,
    0.0048590039, -0.0000271771, 0.9999881946,
];

/// J2000 → new Galactic
#[rustfmt::skip]
pub const J2000_TO_GALACTIC: FlatMatrix = [
    -0.0548755604, 0.4941094279, -0.8676661490,
    -0.8734370902, -0.4448296300, -0.1980763734,
    -0.4838350155, 0.7469822445, 0.4559837762,
];

/// New Galactic → J2000 (transpose of [`J2000_TO_GALACTIC`])
#[rustfmt::skip]
pub const GALACTIC_TO_J2000: FlatMatrix = [
    -0.0548755604, -0.8734370902, -0.4838350155,
    0.4941094279, -0.4448296300, 0.7469822445,
    -0.8676661490, -0.1980763734, 0.4559837762,
];

/// Old Galactic → new Galactic
#[rustfmt::skip]
pub const OLD_TO_NEW_GALACTIC: FlatMatrix = [
    0.844951, 0.534239, 0.025405,
    -0.534284, 0.845286, -0.005539,
    -0.024434, -0.008893, 0.999661,
];

/// New Galactic → old Galactic (transpose of [`OLD_TO_NEW_GALACTIC`])
#[rustfmt::skip]
pub const NEW_TO_OLD_GALACTIC: FlatMatrix = [
    0.844951, -0.534284, -0.024434,
    0.534239, 0.845286, -0.008893,
    0.025405, -0.005539, 0.999661,
];

/// Lift a row-major flattened table into a [`Matrix3`].
pub fn to_matrix(table: &FlatMatrix) -> Matrix3<f64> {
    Matrix3::from_row_slice(table)
}

#[cfg(test)]
mod frame_matrices_test {
    use super::*;

    use approx::assert_abs_diff_eq;

    fn assert_orthogonal(table: &FlatMatrix, tol: f64) {
        let m = to_matrix(table);
        let should_be_identity = m.transpose() * m;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(should_be_identity[(i, j)], expected, epsilon = tol);
            }
        }
        assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = tol);
    }

    #[test]
    fn test_row_major_layout() {
        let m = to_matrix(&J2000_TO_B1950);
        assert_eq!(m[(0, 1)], 0.0111814828);
        assert_eq!(m[(1, 0)], -0.0111814828);
        assert_eq!(m[(2, 2)], 0.9999881946);
    }

    #[test]
    fn test_orthogonality() {
        assert_orthogonal(&B1950_TO_J2000, 1e-9);
        assert_orthogonal(&J2000_TO_B1950, 1e-9);
        assert_orthogonal(&J2000_TO_GALACTIC, 1e-9);
        assert_orthogonal(&GALACTIC_TO_J2000, 1e-9);
        // six-digit tables
        assert_orthogonal(&OLD_TO_NEW_GALACTIC, 1e-5);
        assert_orthogonal(&NEW_TO_OLD_GALACTIC, 1e-5);
    }

    #[test]
    fn test_pairs_are_inverse() {
        let pairs = [
            (&B1950_TO_J2000, &J2000_TO_B1950, 1e-9),
            (&J2000_TO_GALACTIC, &GALACTIC_TO_J2000, 1e-9),
            (&OLD_TO_NEW_GALACTIC, &NEW_TO_OLD_GALACTIC, 1e-5),
        ];
        for (forward, backward, tol) in pairs {
            let product = to_matrix(forward) * to_matrix(backward);
            for i in 0..3 {
                for j in 0..3 {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_abs_diff_eq!(product[(i, j)], expected, epsilon = tol);
                }
            }
        }
    }
}
