use nalgebra::{Matrix3, Matrix4, Vector3};

use super::quaternion::quaternion_from_matrix;
use crate::algebra::unit3;
use crate::cfg::EPS;
use crate::error::{Result, TransformError};

/// Rotation by `angle` about the line through `point` along `axis`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisAngle {
    /// Radians, in `[0, π]` when produced by [`axis_angle_from_matrix`].
    pub angle: f64,
    /// Unit direction. Arbitrary (`+z`) when `angle` is zero.
    pub axis: Vector3<f64>,
    /// A point on the rotation axis.
    pub point: Vector3<f64>,
}

/// Homogeneous matrix rotating by `angle` about `axis` (through `point`, or
/// the origin when `None`). Rodrigues' formula on the normalized axis.
pub fn matrix_from_axis_angle(
    angle: f64,
    axis: &Vector3<f64>,
    point: Option<&Vector3<f64>>,
) -> Result<Matrix4<f64>> {
    let d = unit3(axis)?;
    let (s, c) = angle.sin_cos();
    let ds = d * s;
    let r = Matrix3::from_diagonal_element(c)
        + d * d.transpose() * (1.0 - c)
        + Matrix3::new(
            0.0, -ds.z, ds.y, //
            ds.z, 0.0, -ds.x, //
            -ds.y, ds.x, 0.0,
        );
    let mut m = Matrix4::identity();
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
    if let Some(p) = point {
        let t = p - r * p;
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&t);
    }
    Ok(m)
}

/// Angle, axis, and an axis point of the rigid motion `m`.
///
/// `point` is the least-squares fixed point, i.e. the point on the rotation
/// axis closest to the origin. A translation component along the axis (screw
/// motion) has no axis-angle counterpart and is dropped.
pub fn axis_angle_from_matrix(m: &Matrix4<f64>) -> Result<AxisAngle> {
    let q = quaternion_from_matrix(m)?;
    let v = Vector3::new(q.i, q.j, q.k);
    let s = v.norm();
    let angle = 2.0 * s.atan2(q.w);
    let axis = if s > EPS { v / s } else { Vector3::z() };

    let r = m.fixed_view::<3, 3>(0, 0).into_owned();
    let t = m.fixed_view::<3, 1>(0, 3).into_owned();
    let point = (Matrix3::identity() - r)
        .svd(true, true)
        .solve(&t, 1e-12)
        .map_err(|e| TransformError::degenerate(e))?;
    Ok(AxisAngle { angle, axis, point })
}
