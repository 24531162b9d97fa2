//! 2x2 matrix helpers

use nalgebra::Matrix2;

use super::MathError;

pub type Mat2 = Matrix2<f64>;

/// Determinants smaller than this (in magnitude) are treated as singular
pub const SINGULARITY_EPSILON: f64 = 1e-6;

/// Analytic inverse of a 2x2 matrix
pub fn checked_inverse(m: &Mat2) -> Result<Mat2, MathError> {
    let determinant = m.determinant();
    if determinant.abs() < SINGULARITY_EPSILON {
        return Err(MathError::SingularMatrix { determinant });
    }
    let inv_det = determinant.recip();
    Ok(Mat2::new(
        m[(1, 1)] * inv_det,
        -m[(0, 1)] * inv_det,
        -m[(1, 0)] * inv_det,
        m[(0, 0)] * inv_det,
    ))
}

/// Counter-clockwise rotation by `angle` radians
pub fn rotation(angle: f64) -> Mat2 {
    let (s, c) = angle.sin_cos();
    Mat2::new(c, -s, s, c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2f;

    #[test]
    fn inverse_times_matrix_is_identity() {
        let m = Mat2::new(4.0, 7.0, 2.0, 6.0);
        let inv = checked_inverse(&m).unwrap();
        let id = m * inv;
        assert!((id - Mat2::identity()).norm() < 1e-12);
    }

    #[test]
    fn near_singular_matrix_is_rejected() {
        let m = Mat2::new(1.0, 2.0, 0.5, 1.0 + 1e-8);
        match checked_inverse(&m) {
            Err(MathError::SingularMatrix { determinant }) => assert!(determinant.abs() < 1e-6),
            other => panic!("expected singular matrix, got {other:?}"),
        }
    }

    #[test]
    fn rotation_quarter_turn() {
        let r = rotation(std::f64::consts::FRAC_PI_2);
        let p = r * Vec2f::new(1.0, 0.0);
        assert!((p - Vec2f::new(0.0, 1.0)).norm() < 1e-12);
        assert!((r.transpose() * r - Mat2::identity()).norm() < 1e-12);
    }
}
