//! Least-squares registration of corresponding point sets.
//!
//! Kabsch/Umeyama: center both sets, take the SVD of the cross-covariance,
//! and flip the smallest singular direction if the product would reflect.

use nalgebra::{Matrix3, Matrix4, Vector3};

use crate::cfg::EPS;
use crate::error::{Result, TransformError};

// relative to the largest singular value of the cross-covariance
const COLLINEAR_RTOL: f64 = 1e-10;

fn centroid(points: &[Vector3<f64>]) -> Vector3<f64> {
    points.iter().fold(Vector3::zeros(), |acc, p| acc + p) / points.len() as f64
}

/// Rigid transform (rotation + translation, optionally uniform scale) that
/// best maps `v0[i]` onto `v1[i]` in the least-squares sense.
pub fn superimposition_matrix(
    v0: &[Vector3<f64>],
    v1: &[Vector3<f64>],
    scale: bool,
) -> Result<Matrix4<f64>> {
    if v0.len() != v1.len() {
        return Err(TransformError::dims(
            format!("{} corresponding points", v0.len()),
            format!("{} points", v1.len()),
        ));
    }
    if v0.len() < 3 {
        return Err(TransformError::degenerate(format!(
            "need at least 3 correspondences, got {}",
            v0.len()
        )));
    }
    let c0 = centroid(v0);
    let c1 = centroid(v1);
    let mut h = Matrix3::zeros();
    let mut spread = 0.0;
    for (a, b) in v0.iter().zip(v1) {
        let a = a - c0;
        let b = b - c1;
        h += b * a.transpose();
        spread += a.norm_squared();
    }
    let svd = h.svd(true, true);
    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => return Err(TransformError::degenerate("SVD did not converge")),
    };
    let mut sigma = svd.singular_values;
    let mut sorted = [sigma[0], sigma[1], sigma[2]];
    sorted.sort_by(|a, b| b.total_cmp(a));
    if sorted[1] <= COLLINEAR_RTOL * sorted[0] {
        return Err(TransformError::degenerate("point sets are collinear"));
    }
    let mut d = Matrix3::identity();
    if (u * v_t).determinant() < 0.0 {
        // flip the direction with the least support
        let k = sigma.imin();
        d[(k, k)] = -1.0;
        sigma[k] = -sigma[k];
    }
    let r = u * d * v_t;
    let s = if scale {
        if spread <= EPS {
            return Err(TransformError::degenerate("source points coincide"));
        }
        sigma.sum() / spread
    } else {
        1.0
    };

    let mut m = Matrix4::identity();
    m.fixed_view_mut::<3, 3>(0, 0).copy_from(&(r * s));
    m.fixed_view_mut::<3, 1>(0, 3).copy_from(&(c1 - r * c0 * s));
    tracing::debug!(points = v0.len(), scale = s, "superimposed point sets");
    Ok(m)
}
