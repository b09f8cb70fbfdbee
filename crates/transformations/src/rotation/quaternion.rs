use nalgebra::{Matrix4, Quaternion, Vector3};

use crate::algebra::{all_close, unit3};
use crate::cfg::EPS;
use crate::error::{Result, TransformError};

/// Homogeneous rotation matrix for `q`. The quaternion is normalized first.
pub fn matrix_from_quaternion(q: &Quaternion<f64>) -> Result<Matrix4<f64>> {
    let n = q.coords.norm_squared();
    if !n.is_finite() {
        return Err(TransformError::NonFinite { what: "quaternion" });
    }
    if n < EPS {
        tracing::debug!(n, "rejecting zero quaternion");
        return Err(TransformError::ZeroVector);
    }
    Ok(rotation_from_nonzero(q, n))
}

/// Rotation matrix for a quaternion with known non-zero squared norm `n`.
pub(crate) fn rotation_from_nonzero(q: &Quaternion<f64>, n: f64) -> Matrix4<f64> {
    let s = (2.0 / n).sqrt();
    let (w, x, y, z) = (q.w * s, q.i * s, q.j * s, q.k * s);
    Matrix4::new(
        1.0 - y * y - z * z, x * y - z * w, x * z + y * w, 0.0, //
        x * y + z * w, 1.0 - x * x - z * z, y * z - x * w, 0.0, //
        x * z - y * w, y * z + x * w, 1.0 - x * x - y * y, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Unit quaternion for the rotation block of `m` (returned with `w >= 0`).
///
/// The largest of the four candidate components `4w², 4x², 4y², 4z²` is used
/// as pivot so that the division never goes through a small number; this keeps
/// rotations near 180° accurate.
pub fn quaternion_from_matrix(m: &Matrix4<f64>) -> Result<Quaternion<f64>> {
    if !m.iter().all(|v| v.is_finite()) {
        return Err(TransformError::NonFinite { what: "matrix" });
    }
    let trace = m[(0, 0)] + m[(1, 1)] + m[(2, 2)];
    // q = [w, x, y, z]
    let mut q = [0.0; 4];
    let t;
    if trace > 0.0 {
        t = trace + 1.0;
        q[0] = t;
        q[1] = m[(2, 1)] - m[(1, 2)];
        q[2] = m[(0, 2)] - m[(2, 0)];
        q[3] = m[(1, 0)] - m[(0, 1)];
    } else {
        let (mut i, mut j, mut k) = (0, 1, 2);
        if m[(1, 1)] > m[(0, 0)] {
            (i, j, k) = (1, 2, 0);
        }
        if m[(2, 2)] > m[(i, i)] {
            (i, j, k) = (2, 0, 1);
        }
        t = m[(i, i)] - (m[(j, j)] + m[(k, k)]) + 1.0;
        q[i + 1] = t;
        q[j + 1] = m[(i, j)] + m[(j, i)];
        q[k + 1] = m[(k, i)] + m[(i, k)];
        q[0] = m[(k, j)] - m[(j, k)];
    }
    if t <= EPS {
        return Err(TransformError::degenerate(
            "rotation block has no positive quaternion pivot",
        ));
    }
    let s = 0.5 / t.sqrt();
    let sign = if q[0] < 0.0 { -s } else { s };
    let out = Quaternion::new(q[0] * sign, q[1] * sign, q[2] * sign, q[3] * sign);
    // scaled or sheared blocks are projected back onto the unit sphere
    Ok(out.normalize())
}

/// Quaternion for a rotation of `angle` radians about `axis`.
pub fn quaternion_about_axis(angle: f64, axis: &Vector3<f64>) -> Result<Quaternion<f64>> {
    let axis = unit3(axis)?;
    let (s, c) = (angle / 2.0).sin_cos();
    Ok(Quaternion::new(c, axis.x * s, axis.y * s, axis.z * s))
}

/// Hamilton product `a · b` (apply `b` first, then `a`).
#[inline]
pub fn quaternion_multiply(a: &Quaternion<f64>, b: &Quaternion<f64>) -> Quaternion<f64> {
    a * b
}

#[inline]
pub fn quaternion_conjugate(q: &Quaternion<f64>) -> Quaternion<f64> {
    q.conjugate()
}

/// Multiplicative inverse `q* / |q|²`.
pub fn quaternion_inverse(q: &Quaternion<f64>) -> Result<Quaternion<f64>> {
    let n = q.coords.norm_squared();
    if n < EPS {
        return Err(TransformError::ZeroVector);
    }
    Ok(q.conjugate() / n)
}

#[inline]
pub fn quaternion_real(q: &Quaternion<f64>) -> f64 {
    q.w
}

#[inline]
pub fn quaternion_imag(q: &Quaternion<f64>) -> Vector3<f64> {
    Vector3::new(q.i, q.j, q.k)
}

/// Spherical linear interpolation between `q0` (fraction 0) and `q1` (fraction 1).
///
/// `spin` adds whole half-turns to the interpolation arc; with `shortest_path`
/// the arc through the closer of `q1` / `-q1` is taken.
pub fn quaternion_slerp(
    q0: &Quaternion<f64>,
    q1: &Quaternion<f64>,
    fraction: f64,
    spin: i32,
    shortest_path: bool,
) -> Result<Quaternion<f64>> {
    let q0 = q0.coords.try_normalize(EPS).map(Quaternion::from).ok_or(TransformError::ZeroVector)?;
    let mut q1 = q1.coords.try_normalize(EPS).map(Quaternion::from).ok_or(TransformError::ZeroVector)?;
    if fraction == 0.0 {
        return Ok(q0);
    }
    if fraction == 1.0 {
        return Ok(q1);
    }
    let mut d = q0.coords.dot(&q1.coords).clamp(-1.0, 1.0);
    if ((d.abs()) - 1.0).abs() < EPS {
        return Ok(q0);
    }
    if shortest_path && d < 0.0 {
        d = -d;
        q1 = -q1;
    }
    let angle = d.acos() + f64::from(spin) * std::f64::consts::PI;
    if angle.abs() < EPS {
        return Ok(q0);
    }
    let isin = 1.0 / angle.sin();
    Ok(q0 * (((1.0 - fraction) * angle).sin() * isin) + q1 * ((fraction * angle).sin() * isin))
}

/// True if `a` and `b` are equal up to sign.
pub fn is_same_quaternion(a: &Quaternion<f64>, b: &Quaternion<f64>) -> bool {
    let (a, b) = (a.coords, b.coords);
    all_close(a.as_slice(), b.as_slice(), 1e-5, 1e-8)
        || all_close(a.as_slice(), (-b).as_slice(), 1e-5, 1e-8)
}
