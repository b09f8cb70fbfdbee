use nalgebra::{Matrix3, Matrix4, RowVector4, Vector3};

use crate::error::{Result, TransformError};

fn linear(m: &Matrix4<f64>) -> Matrix3<f64> {
    m.fixed_view::<3, 3>(0, 0).into_owned()
}

/// True iff `m` is a proper rigid motion within `tolerance`: orthogonal linear
/// block (`L Lᵀ = I`), determinant +1, and bottom row `[0, 0, 0, 1]`.
pub fn is_rigid(m: &Matrix4<f64>, tolerance: f64) -> bool {
    if !m.iter().all(|v| v.is_finite()) {
        return false;
    }
    let bottom = m.row(3) - RowVector4::new(0.0, 0.0, 0.0, 1.0);
    if bottom.amax() > tolerance {
        return false;
    }
    let l = linear(m);
    if (l * l.transpose() - Matrix3::identity()).amax() > tolerance {
        return false;
    }
    (l.determinant() - 1.0).abs() <= tolerance
}

/// Snap a nearly rigid matrix onto the closest rotation (polar factor via SVD)
/// and reset the bottom row.
///
/// Fails with `Degenerate` if `L Lᵀ` deviates from the identity by more than
/// `max_deviance`, or if the linear block is a reflection.
pub fn fix_rigid(m: &Matrix4<f64>, max_deviance: f64) -> Result<Matrix4<f64>> {
    let l = linear(m);
    let deviance = (l * l.transpose() - Matrix3::identity()).amax();
    if !deviance.is_finite() {
        return Err(TransformError::NonFinite { what: "matrix" });
    }
    if deviance > max_deviance {
        return Err(TransformError::degenerate(format!(
            "orthogonality deviance {deviance:e} exceeds {max_deviance:e}"
        )));
    }
    let svd = l.svd(true, true);
    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => return Err(TransformError::degenerate("SVD did not converge")),
    };
    let r = u * v_t;
    if r.determinant() < 0.0 {
        return Err(TransformError::degenerate("linear block is a reflection"));
    }
    let mut out = *m;
    out.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
    out.set_row(3, &RowVector4::new(0.0, 0.0, 0.0, 1.0));
    Ok(out)
}

/// True if applying `m` reverses triangle winding (negative linear determinant).
pub fn flips_winding(m: &Matrix4<f64>) -> bool {
    linear(m).determinant() < 0.0
}

/// Per-axis scale followed by a translation.
pub fn scale_and_translate(scale: &Vector3<f64>, translate: &Vector3<f64>) -> Matrix4<f64> {
    let mut m = Matrix4::new_nonuniform_scaling(scale);
    m.fixed_view_mut::<3, 1>(0, 3).copy_from(translate);
    m
}
