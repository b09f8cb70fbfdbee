use nalgebra::{DVector, Vector3};

use crate::cfg::EPS;
use crate::error::{Result, TransformError};

/// Euclidean length of `v`.
#[inline]
pub fn vector_norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn checked_norm(norm: f64) -> Result<f64> {
    if !norm.is_finite() {
        return Err(TransformError::NonFinite { what: "vector" });
    }
    if norm <= EPS {
        tracing::debug!(norm, "rejecting zero-length vector");
        return Err(TransformError::ZeroVector);
    }
    Ok(norm)
}

/// `v / |v|`. Fails with `ZeroVector` instead of returning NaNs.
pub fn unit_vector(v: &[f64]) -> Result<DVector<f64>> {
    let norm = checked_norm(vector_norm(v))?;
    Ok(DVector::from_iterator(v.len(), v.iter().map(|x| x / norm)))
}

/// Fixed-size variant of [`unit_vector`] used by the rotation builders.
#[inline]
pub(crate) fn unit3(v: &Vector3<f64>) -> Result<Vector3<f64>> {
    let norm = checked_norm(v.norm())?;
    Ok(v / norm)
}

fn same_len(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(TransformError::dims(
            format!("vectors of equal length ({})", a.len()),
            format!("length {}", b.len()),
        ));
    }
    Ok(())
}

/// Inner product of two N-vectors of equal length.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    same_len(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Cross product; defined for 3-vectors only.
pub fn cross(a: &[f64], b: &[f64]) -> Result<Vector3<f64>> {
    for v in [a, b] {
        if v.len() != 3 {
            return Err(TransformError::dims("3-vector", format!("length {}", v.len())));
        }
    }
    let a = Vector3::new(a[0], a[1], a[2]);
    let b = Vector3::new(b[0], b[1], b[2]);
    Ok(a.cross(&b))
}

/// Angle between `a` and `b` in radians.
///
/// With `directed = false` the sign of the vectors is ignored and the result
/// lies in `[0, π/2]`; otherwise in `[0, π]`.
pub fn angle_between_vectors(a: &[f64], b: &[f64], directed: bool) -> Result<f64> {
    let d = dot(a, b)?;
    let na = checked_norm(vector_norm(a))?;
    let nb = checked_norm(vector_norm(b))?;
    let mut c = d / (na * nb);
    if !directed {
        c = c.abs();
    }
    // rounding can push |c| marginally above 1
    Ok(c.clamp(-1.0, 1.0).acos())
}
