use nalgebra::{Matrix3, Matrix4, Vector3};

use crate::algebra::unit3;
use crate::cfg::EPS;
use crate::error::{Result, TransformError};

#[inline]
fn set_linear(m: &mut Matrix4<f64>, l: &Matrix3<f64>) {
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(l);
}

#[inline]
fn set_translation(m: &mut Matrix4<f64>, t: &Vector3<f64>) {
    m.fixed_view_mut::<3, 1>(0, 3).copy_from(t);
}

/// Pure translation by `v`.
#[inline]
pub fn translation_matrix(v: &Vector3<f64>) -> Matrix4<f64> {
    Matrix4::new_translation(v)
}

/// Translation column of `m`.
#[inline]
pub fn translation_from_matrix(m: &Matrix4<f64>) -> Vector3<f64> {
    m.fixed_view::<3, 1>(0, 3).into_owned()
}

/// Mirror through the plane with the given point and normal.
pub fn reflection_matrix(point: &Vector3<f64>, normal: &Vector3<f64>) -> Result<Matrix4<f64>> {
    let n = unit3(normal)?;
    let mut m = Matrix4::identity();
    set_linear(&mut m, &(Matrix3::identity() - n * n.transpose() * 2.0));
    set_translation(&mut m, &(n * (2.0 * point.dot(&n))));
    Ok(m)
}

/// Mirror plane `(point, normal)` of a reflection matrix.
///
/// `point` is the plane point closest to the origin. Fails with `Degenerate`
/// if `m` is not a reflection.
pub fn reflection_from_matrix(m: &Matrix4<f64>) -> Result<(Vector3<f64>, Vector3<f64>)> {
    let l = m.fixed_view::<3, 3>(0, 0).into_owned();
    // I - L = 2 n nᵀ for a mirror; its largest column is parallel to n
    let a = Matrix3::identity() - l;
    let col = a
        .column_iter()
        .map(|c| c.into_owned())
        .max_by(|x, y| x.norm().total_cmp(&y.norm()))
        .unwrap_or_else(Vector3::zeros);
    let norm = col.norm();
    if norm <= EPS {
        return Err(TransformError::degenerate("matrix has no mirror plane"));
    }
    let n = col / norm;
    let expected = Matrix3::identity() - n * n.transpose() * 2.0;
    if (l - expected).amax() > 1e-8 {
        return Err(TransformError::degenerate("linear block is not a reflection"));
    }
    let t = translation_from_matrix(m);
    let point = n * (t.dot(&n) / 2.0);
    if (t - n * (2.0 * point.dot(&n))).amax() > 1e-8 {
        return Err(TransformError::degenerate(
            "translation is not perpendicular to the mirror plane",
        ));
    }
    Ok((point, n))
}

/// Scale by `factor` about `origin` (default: the coordinate origin).
///
/// With `direction` the scale acts along that direction only; otherwise it is
/// uniform.
pub fn scale_matrix(
    factor: f64,
    origin: Option<&Vector3<f64>>,
    direction: Option<&Vector3<f64>>,
) -> Result<Matrix4<f64>> {
    let mut m = Matrix4::identity();
    match direction {
        None => {
            set_linear(&mut m, &Matrix3::from_diagonal_element(factor));
            if let Some(o) = origin {
                set_translation(&mut m, &(o * (1.0 - factor)));
            }
        }
        Some(d) => {
            let d = unit3(d)?;
            let k = 1.0 - factor;
            set_linear(&mut m, &(Matrix3::identity() - d * d.transpose() * k));
            if let Some(o) = origin {
                set_translation(&mut m, &(d * (k * o.dot(&d))));
            }
        }
    }
    Ok(m)
}

/// How points are carried onto the projection plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    /// Along the plane normal.
    Orthogonal,
    /// Along a fixed direction (must not lie in the plane).
    Parallel { direction: Vector3<f64> },
    /// Towards an eye point. With `pseudo` the depth along the normal is
    /// preserved in the homogeneous result (pseudo-perspective).
    Perspective { eye: Vector3<f64>, pseudo: bool },
}

/// Projection onto the plane through `point` with `normal`.
///
/// Perspective results are homogeneous; divide by `w` after applying.
pub fn projection_matrix(
    point: &Vector3<f64>,
    normal: &Vector3<f64>,
    kind: Projection,
) -> Result<Matrix4<f64>> {
    let n = unit3(normal)?;
    let mut m = Matrix4::identity();
    match kind {
        Projection::Orthogonal => {
            set_linear(&mut m, &(Matrix3::identity() - n * n.transpose()));
            set_translation(&mut m, &(n * point.dot(&n)));
        }
        Projection::Parallel { direction } => {
            let scale = direction.dot(&n);
            if scale.abs() <= EPS {
                return Err(TransformError::degenerate(
                    "projection direction is parallel to the plane",
                ));
            }
            set_linear(
                &mut m,
                &(Matrix3::identity() - direction * n.transpose() / scale),
            );
            set_translation(&mut m, &(direction * (point.dot(&n) / scale)));
        }
        Projection::Perspective { eye, pseudo } => {
            let depth = (eye - point).dot(&n);
            if depth.abs() <= EPS {
                return Err(TransformError::degenerate("eye lies in the projection plane"));
            }
            let mut l = Matrix3::from_diagonal_element(depth) - eye * n.transpose();
            let t = if pseudo {
                l -= n * n.transpose();
                (eye + n) * point.dot(&n)
            } else {
                eye * point.dot(&n)
            };
            set_linear(&mut m, &l);
            set_translation(&mut m, &t);
            m[(3, 0)] = -n.x;
            m[(3, 1)] = -n.y;
            m[(3, 2)] = -n.z;
            m[(3, 3)] = eye.dot(&n);
        }
    }
    Ok(m)
}
