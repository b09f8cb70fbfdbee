use nalgebra::{Matrix3, Matrix4, Vector2};

use crate::error::{Result, TransformError};
use crate::rotation::{matrix_from_euler, AxisSequence};

/// 2D homogeneous transform: rotate by `theta` about `point` (origin when
/// `None`), then translate by `offset`.
///
/// Equals `T(offset) · T(point) · R(theta) · T(-point)`. With `point = None`,
/// `theta = 0`, and a zero offset the result is exactly the identity.
pub fn planar_matrix(
    offset: &Vector2<f64>,
    theta: f64,
    point: Option<&Vector2<f64>>,
) -> Result<Matrix3<f64>> {
    if !theta.is_finite() {
        return Err(TransformError::NonFinite { what: "theta" });
    }
    if !offset.iter().all(|v| v.is_finite()) {
        return Err(TransformError::NonFinite { what: "offset" });
    }
    let (s, c) = theta.sin_cos();
    let m = Matrix3::new(
        c, -s, offset.x, //
        s, c, offset.y, //
        0.0, 0.0, 1.0,
    );
    match point {
        None => Ok(m),
        Some(p) => {
            if !p.iter().all(|v| v.is_finite()) {
                return Err(TransformError::NonFinite { what: "point" });
            }
            Ok(Matrix3::new_translation(p) * m * Matrix3::new_translation(&-p))
        }
    }
}

/// Embed a 2D homogeneous transform in 3D; z and its translation stay identity.
pub fn planar_matrix_to_3d(m: &Matrix3<f64>) -> Matrix4<f64> {
    let mut out = Matrix4::identity();
    out.fixed_view_mut::<2, 2>(0, 0)
        .copy_from(&m.fixed_view::<2, 2>(0, 0));
    out[(0, 3)] = m[(0, 2)];
    out[(1, 3)] = m[(1, 2)];
    // carry a projective bottom row over to x, y, and w
    out[(3, 0)] = m[(2, 0)];
    out[(3, 1)] = m[(2, 1)];
    out[(3, 3)] = m[(2, 2)];
    out
}

/// Rotation taking the reference direction to spherical coordinates
/// (`theta`: polar, `phi`: azimuth), built as Euler angles `[0, phi, theta]`
/// under `axes`. `theta = phi = 0` gives exactly the identity.
pub fn spherical_matrix(theta: f64, phi: f64, axes: AxisSequence) -> Matrix4<f64> {
    matrix_from_euler([0.0, phi, theta], axes)
}
